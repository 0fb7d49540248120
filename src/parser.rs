use crate::operators::{Operator, OPS_STR};
use crate::CalcFloat;
use std::fmt::{self, Debug, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Paren {
    Open,
    Close,
}

/// Lexical unit of a line. Tokens are created once by [`tokenize`](tokenize) and are
/// never re-parsed during evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token<T> {
    Num(T),
    Var(String),
    Op(Operator),
    Paren(Paren),
}

impl<T: Debug> Display for Token<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n:?}"),
            Token::Var(name) => write!(f, "{name}"),
            Token::Op(op) => write!(f, "{op}"),
            Token::Paren(Paren::Open) => write!(f, "("),
            Token::Paren(Paren::Close) => write!(f, ")"),
        }
    }
}

/// Puts spaces around all symbols of [`OPS_STR`](crate::OPS_STR) to simplify tokenizing.
/// Symbols are replaced as plain characters, no pattern semantics involved.
///
/// ```rust
/// use stackcalc::separate_ops;
/// assert_eq!(separate_ops("(a+1)*2"), "( a + 1 )  * 2");
/// ```
pub fn separate_ops(text: &str) -> String {
    let mut separated = text.to_string();
    for c in OPS_STR.chars() {
        separated = separated.replace(c, &format!(" {c} "));
    }
    separated.trim().to_string()
}

/// Returns true if the whole text is a number literal, i.e., it consists of digits and
/// at most one dot and contains at least one digit.
pub fn is_numeric_text(text: &str) -> bool {
    let mut n_dots = 0;
    let mut n_digits = 0;
    let only_num_chars = text.chars().all(|c| {
        if c == '.' {
            n_dots += 1;
            true
        } else if c.is_ascii_digit() {
            n_digits += 1;
            true
        } else {
            false
        }
    });
    only_num_chars && n_digits > 0 && n_dots < 2
}

fn classify<T: CalcFloat>(piece: &str) -> Token<T> {
    let mut chars = piece.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c == '(' {
            return Token::Paren(Paren::Open);
        } else if c == ')' {
            return Token::Paren(Paren::Close);
        } else if let Some(op) = Operator::from_symbol(c) {
            return Token::Op(op);
        }
    }
    if is_numeric_text(piece) {
        if let Ok(n) = piece.parse::<T>() {
            return Token::Num(n);
        }
    }
    Token::Var(piece.to_string())
}

/// Splits a line into tokens. Every piece between operators and whitespace that is not a number
/// literal becomes a variable token. Whether the variable exists is decided at evaluation time.
/// Number literals consist of digits and at most one dot. Signs and exponents are not part of a
/// literal, `-1` is an operator followed by a number and `1e3` is a variable.
///
/// # Arguments
///
/// * `text` - expression to be tokenized, e.g., `2 * (x + 1)`
///
pub fn tokenize<T: CalcFloat>(text: &str) -> Vec<Token<T>> {
    separate_ops(text)
        .split_whitespace()
        .map(classify)
        .collect()
}

/// Creates a string from tokens that tokenizes to the same tokens again.
pub fn unparse<T: Debug>(tokens: &[Token<T>]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_separate_ops() {
    assert_eq!(separate_ops("1+2"), "1 + 2");
    assert_eq!(separate_ops("  x  "), "x");
    assert_eq!(separate_ops("a*(b-c)/d"), "a *  ( b - c )  / d");
    assert_eq!(separate_ops("3.5"), "3.5");
    assert_eq!(separate_ops(""), "");
}

#[test]
fn test_is_numeric() {
    assert!(is_numeric_text("6"));
    assert!(is_numeric_text("4."));
    assert!(is_numeric_text(".4"));
    assert!(is_numeric_text("23.414"));
    assert!(!is_numeric_text("."));
    assert!(!is_numeric_text(""));
    assert!(!is_numeric_text("o.4"));
    assert!(!is_numeric_text("3.4."));
    assert!(!is_numeric_text("inf"));
    assert!(!is_numeric_text("NaN"));
    assert!(!is_numeric_text("1e5"));
}

#[test]
fn test_tokenize() {
    let tokens = tokenize::<f64>("2*(x1 + .5)");
    assert_eq!(
        tokens,
        vec![
            Token::Num(2.0),
            Token::Op(Operator::Mul),
            Token::Paren(Paren::Open),
            Token::Var("x1".to_string()),
            Token::Op(Operator::Add),
            Token::Num(0.5),
            Token::Paren(Paren::Close),
        ]
    );
    assert_eq!(tokenize::<f64>("42"), vec![Token::Num(42.0)]);
    assert_eq!(tokenize::<f64>("inf"), vec![Token::Var("inf".to_string())]);
    assert_eq!(tokenize::<f64>("3.4.5"), vec![Token::Var("3.4.5".to_string())]);
    assert!(tokenize::<f64>("   ").is_empty());
}

#[test]
fn test_unparse() {
    let text = "(a + 1.5) * b / 2";
    let tokens = tokenize::<f64>(text);
    assert_eq!(unparse(&tokens), "( a + 1.5 ) * b / 2.0");
    assert_eq!(tokenize::<f64>(&unparse(&tokens)), tokens);
}
