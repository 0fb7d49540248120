#![doc(html_root_url = "https://docs.rs/stackcalc/0.1.0")]
//! Stackcalc is an interactive four-function calculator that evaluates arithmetic expressions
//! with Dijkstra's two-stack algorithm. Besides `+`, `-`, `*`, `/`, and parentheses it knows
//! variables and functions of one level, i.e., a function body may use its parameters and
//! global variables but cannot call other functions.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use stackcalc::Session;
//! let mut session = Session::<f64>::new();
//! assert_eq!(session.exec_line("8 - 3 - 2")?, Some(3.0));
//! assert_eq!(session.exec_line("x = (2 + 3) * 4")?, None);
//! assert_eq!(session.exec_line("def half(a) = a / 2")?, None);
//! assert_eq!(session.exec_line("half(x)")?, Some(10.0));
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! Every line is one statement of the following kinds.
//!
//! * `<expr>` evaluates the expression, e.g., `2 + 3 * 4`,
//! * `<name> = <expr>` assigns the value of the expression to a global variable,
//! * `def <name>(<params>) = <expr>` defines a function,
//! * `<name>(<args>)` calls a function where each argument is a variable name or a number.
//!
//! Errors abort the current statement and never leave partial changes behind.
//!
//! ```rust
//! use stackcalc::{ErrorKind, Session};
//! let mut session = Session::<f64>::new();
//! let err = session.exec_line("y = 5 / 0").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::DivisionByZero);
//! assert!(session.var("y").is_none());
//! ```
//!
//! The crate is generic over the number type. Anything that implements
//! [`num::Float`](num::Float), [`FromStr`](std::str::FromStr), and [`Debug`](std::fmt::Debug)
//! can be used, see [`CalcFloat`](CalcFloat).
//!
//! With the feature `serde`, sessions can be serialized and deserialized.

mod data_type;
mod environment;
mod expression;
mod operators;
mod parser;
mod repl;
mod result;
mod statements;

pub use {
    data_type::CalcFloat,
    environment::{Environment, FunctionDef, FunctionTable, ParamVec, N_PARAMS_ON_STACK},
    expression::{eval, eval_tokens, N_NODES_ON_STACK},
    operators::{precedence, Operator, OPS_STR},
    parser::{is_numeric_text, separate_ops, tokenize, unparse, Paren, Token},
    repl::{repl, PROMPT},
    result::{Arity, ErrorKind, ExError, ExResult},
    statements::{Session, Statement},
};
