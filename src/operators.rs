use crate::{exerr, CalcFloat, ExError, ExResult};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All recognized operator and grouping symbols. The rank of a symbol is its position
/// in this string divided by two, i.e., `(` `)` << `+` `-` << `/` `*`.
pub const OPS_STR: &str = "()+-/*";

/// Returns the precedence rank of a recognized symbol. A binary operation with a higher
/// rank is reduced first. Symbols outside of [`OPS_STR`](OPS_STR) have no rank.
///
/// ```rust
/// use stackcalc::precedence;
/// assert_eq!(precedence('('), Some(0));
/// assert_eq!(precedence('-'), Some(1));
/// assert_eq!(precedence('*'), Some(2));
/// assert_eq!(precedence('^'), None);
/// ```
pub fn precedence(symbol: char) -> Option<usize> {
    OPS_STR.find(symbol).map(|idx| idx / 2)
}

/// The four left-associative binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Representation of the operator in the string to be parsed, e.g., `-`.
    pub fn repr(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn prio(&self) -> usize {
        // every operator is part of OPS_STR
        precedence(self.repr()).unwrap_or(0)
    }

    /// Applies the operator to the left operand `a` and the right operand `b`.
    ///
    /// # Errors
    ///
    /// Division fails if the right operand is zero. The check happens before dividing.
    pub fn apply<T: CalcFloat>(&self, a: T, b: T) -> ExResult<T> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mul => Ok(a * b),
            Operator::Div => {
                if b == T::zero() {
                    Err(exerr!(DivisionByZero, "division by zero"))
                } else {
                    Ok(a / b)
                }
            }
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

impl FromStr for Operator {
    type Err = ExError;
    fn from_str(s: &str) -> ExResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Operator::from_symbol(c).ok_or_else(|| exerr!(InvalidOperator, "invalid operator {}", s))
            }
            _ => Err(exerr!(InvalidOperator, "invalid operator {}", s)),
        }
    }
}
