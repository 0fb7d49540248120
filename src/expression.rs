use crate::environment::Environment;
use crate::operators::{precedence, Operator};
use crate::parser::{tokenize, Paren, Token};
use crate::{exerr, CalcFloat, ExResult};
use log::trace;
use smallvec::SmallVec;

/// Stack sizes of the evaluation up to which no heap allocation takes place.
pub const N_NODES_ON_STACK: usize = 16;

type OpStack = SmallVec<[Pending; N_NODES_ON_STACK]>;
type ValStack<T> = SmallVec<[T; N_NODES_ON_STACK]>;

/// Entry of the operator stack. Closing parentheses are never pushed.
#[derive(Copy, Clone, Debug)]
enum Pending {
    Open,
    Op(Operator),
}

impl Pending {
    fn prio(&self) -> usize {
        match self {
            Pending::Open => precedence('(').unwrap_or(0),
            Pending::Op(op) => op.prio(),
        }
    }
}

fn lookup<T: CalcFloat>(name: &str, local: &Environment<T>, global: &Environment<T>) -> ExResult<T> {
    local
        .get(name)
        .or_else(|| global.get(name))
        .ok_or_else(|| exerr!(UndefinedIdentifier, "{} is undefined", name))
}

/// Pops the right and then the left operand, applies `op`, and pushes the result.
fn reduce<T: CalcFloat>(op: Operator, vals: &mut ValStack<T>) -> ExResult<()> {
    match (vals.pop(), vals.pop()) {
        (Some(b), Some(a)) => {
            let res = op.apply(a, b)?;
            trace!("reduced {a:?} {op} {b:?} to {res:?}");
            vals.push(res);
            Ok(())
        }
        _ => Err(exerr!(
            MalformedExpression,
            "operator {} is missing an operand",
            op
        )),
    }
}

/// Reduces pending operators as long as their rank is at least `prio`. Returns `true` if
/// an opening parenthesis stopped the reduction. The parenthesis is discarded in this case.
fn fold<T: CalcFloat>(prio: usize, ops: &mut OpStack, vals: &mut ValStack<T>) -> ExResult<bool> {
    while let Some(top) = ops.last().copied() {
        // strict comparison of the incoming rank makes operators of one tier fold left
        if prio > top.prio() {
            return Ok(false);
        }
        ops.pop();
        match top {
            Pending::Open => return Ok(true),
            Pending::Op(op) => reduce(op, vals)?,
        }
    }
    Ok(false)
}

/// Evaluates tokens with Dijkstra's two-stack algorithm.
///
/// # Arguments
///
/// * `tokens` - tokens as created by [`tokenize`](crate::tokenize)
/// * `local` - variables that are looked up first, e.g., parameters of a function call
/// * `global` - variables that are looked up if `local` does not contain a name
///
/// # Errors
///
/// Undefined variables, division by zero, and malformed token sequences such as
/// unbalanced parentheses, trailing operators, or adjacent operands.
///
pub fn eval_tokens<T: CalcFloat>(
    tokens: &[Token<T>],
    local: &Environment<T>,
    global: &Environment<T>,
) -> ExResult<T> {
    let mut ops = OpStack::new();
    let mut vals = ValStack::<T>::new();
    for token in tokens {
        match token {
            Token::Num(n) => vals.push(*n),
            Token::Var(name) => vals.push(lookup(name, local, global)?),
            Token::Paren(Paren::Open) => ops.push(Pending::Open),
            Token::Paren(Paren::Close) => {
                let close_prio = precedence(')').unwrap_or(0);
                if !fold(close_prio, &mut ops, &mut vals)? {
                    return Err(exerr!(MalformedExpression, "parentheses mismatch"));
                }
            }
            Token::Op(op) => {
                fold(op.prio(), &mut ops, &mut vals)?;
                ops.push(Pending::Op(*op));
            }
        }
    }
    while let Some(top) = ops.pop() {
        match top {
            Pending::Open => return Err(exerr!(MalformedExpression, "parentheses mismatch")),
            Pending::Op(op) => reduce(op, &mut vals)?,
        }
    }
    match vals.as_slice() {
        [res] => Ok(*res),
        [] => Err(exerr!(MalformedExpression, "cannot evaluate empty expression")),
        _ => Err(exerr!(
            MalformedExpression,
            "{} operands left without operator",
            vals.len()
        )),
    }
}

/// Parses and evaluates a string that does not contain any variables.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let x = stackcalc::eval::<f64>("(2 + 3) * 4")?;
/// assert!((x - 20.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn eval<T: CalcFloat>(text: &str) -> ExResult<T> {
    eval_tokens(&tokenize(text), &Environment::new(), &Environment::new())
}

#[cfg(test)]
mod test {
    use super::{eval, eval_tokens};
    use crate::{parser::tokenize, Environment, ErrorKind};

    fn env(bindings: &[(&str, f64)]) -> Environment<f64> {
        bindings.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_eval() {
        assert_eq!(eval::<f64>("1.5+0.5").unwrap(), 2.0);
        assert_eq!(eval::<f64>("2+3*4").unwrap(), 14.0);
        assert_eq!(eval::<f64>("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval::<f64>("8-3-2").unwrap(), 3.0);
        assert_eq!(eval::<f64>("16/4/2").unwrap(), 2.0);
        assert_eq!(eval::<f64>("2*(3+(4-1))*2").unwrap(), 24.0);
        assert_eq!(eval::<f64>("((7))").unwrap(), 7.0);
        assert_eq!(eval::<f32>("1-2*3+4").unwrap(), -1.0);
    }

    #[test]
    fn test_lookup_order() {
        let tokens = tokenize("a*b");
        let global = env(&[("a", 2.0), ("b", 5.0)]);
        let local = env(&[("a", 3.0)]);
        assert_eq!(eval_tokens(&tokens, &local, &global).unwrap(), 15.0);
        assert_eq!(eval_tokens(&tokens, &Environment::new(), &global).unwrap(), 10.0);
        let err = eval_tokens(&tokens, &local, &Environment::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier);
        assert_eq!(err.msg, "b is undefined");
    }

    #[test]
    fn test_malformed() {
        for text in ["", "()", "1 2", "1+", "*2", "(1+2", "1+2)", ")(", "1+(2*3", "2 (3)"] {
            let err = eval::<f64>(text).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MalformedExpression, "{text}");
        }
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval::<f64>("5/0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        let err = eval::<f64>("1/(2-2)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(eval::<f64>("0/5").unwrap(), 0.0);
    }
}
