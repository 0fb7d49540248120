use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distinguishes the two ways a call can disagree with a definition.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arity {
    TooMany,
    TooFew,
}

/// What went wrong. Each kind aborts the current statement only.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    /// A bare name was neither a parameter of the current call nor a global variable.
    UndefinedIdentifier,
    UndefinedFunction,
    ArityMismatch(Arity),
    /// A call argument is neither a global variable nor a numeric literal.
    UninitializedArgument,
    DivisionByZero,
    /// Operand stack underflow, leftover operands, or unbalanced parentheses.
    MalformedExpression,
    InvalidOperator,
    /// The statement parser could not make sense of a line.
    Syntax,
}

/// This will be thrown at you if the evaluation of a line went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    pub kind: ErrorKind,
    pub msg: String,
}
impl ExError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        ExError {
            kind,
            msg: msg.into(),
        }
    }
}
impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl Error for ExError {}

/// Stackcalc's result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given [`ErrorKind`](ErrorKind) with a formatted message.
///
/// ```rust
/// use stackcalc::{exerr, ErrorKind};
/// let e = exerr!(UndefinedIdentifier, "{} is undefined", "y");
/// assert_eq!(e.kind, ErrorKind::UndefinedIdentifier);
/// assert_eq!(e.msg, "y is undefined");
/// ```
#[macro_export]
macro_rules! exerr {
    ($kind:ident($sub:ident), $s:literal $(, $exps:expr)* $(,)?) => {
        $crate::ExError::new(
            $crate::ErrorKind::$kind($crate::Arity::$sub),
            format!($s $(, $exps)*),
        )
    };
    ($kind:ident, $s:literal $(, $exps:expr)* $(,)?) => {
        $crate::ExError::new($crate::ErrorKind::$kind, format!($s $(, $exps)*))
    };
}

#[test]
fn test_display() {
    let e = exerr!(ArityMismatch(TooFew), "insufficient parameters");
    assert_eq!(format!("{e}"), "insufficient parameters");
    assert_eq!(e.kind, ErrorKind::ArityMismatch(Arity::TooFew));
}
