use crate::environment::{Environment, FunctionDef, FunctionTable, ParamVec};
use crate::expression::eval_tokens;
use crate::parser::{tokenize, Token};
use crate::{exerr, CalcFloat, ExResult};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref RE_NAME: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z_0-9]*$").unwrap();
    static ref RE_DEF_KEYWORD: Regex = Regex::new(r"^\s*def\b").unwrap();
    static ref RE_DEF: Regex =
        Regex::new(r"^\s*def\s+([a-zA-Z_][a-zA-Z_0-9]*)\s*\(([^()]*)\)\s*=(.*)$").unwrap();
    static ref RE_ASSIGN: Regex = Regex::new(r"^\s*([a-zA-Z_][a-zA-Z_0-9]*)\s*=(.*)$").unwrap();
    static ref RE_CALL: Regex =
        Regex::new(r"^\s*([a-zA-Z_][a-zA-Z_0-9]*)\s*\(([^()]*)\)\s*$").unwrap();
}

/// One line of input, classified.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement<T> {
    /// Expression whose value is printed.
    Eval(Vec<Token<T>>),
    /// `x = <expr>` binds the value of the expression to a global variable.
    Assign { name: String, expr: Vec<Token<T>> },
    /// `def f(a, b) = <expr>`
    Def(FunctionDef<T>),
    /// `f(1, x)` where the arguments are variable names or number literals.
    Call { name: String, args: Vec<String> },
}

fn tokenize_expr<T: CalcFloat>(text: &str) -> ExResult<Vec<Token<T>>> {
    if text.contains('=') {
        return Err(exerr!(Syntax, "unexpected '=' in {}", text.trim()));
    }
    Ok(tokenize(text))
}

fn split_list(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        vec![]
    } else {
        text.split(',').map(|s| s.trim()).collect()
    }
}

/// `def` starts a definition and cannot be used as name of a variable, function, or parameter.
const KEYWORD_DEF: &str = "def";

fn check_name(name: &str) -> ExResult<()> {
    if name == KEYWORD_DEF {
        Err(exerr!(Syntax, "{} is a keyword and cannot be used as name", name))
    } else {
        Ok(())
    }
}

fn parse_params(text: &str) -> ExResult<ParamVec> {
    let mut params = ParamVec::new();
    for p in split_list(text) {
        check_name(p)?;
        if !RE_NAME.is_match(p) {
            return Err(exerr!(Syntax, "invalid parameter name '{}'", p));
        }
        if params.iter().any(|known| known == p) {
            return Err(exerr!(Syntax, "duplicate parameter {}", p));
        }
        params.push(p.to_string());
    }
    Ok(params)
}

impl<T: CalcFloat> Statement<T> {
    /// Classifies a line and tokenizes its expression. Returns `None` for blank lines.
    ///
    /// # Errors
    ///
    /// Invalid function headers, invalid parameter or argument lists, empty right-hand sides,
    /// and `=` in places other than directly after the assigned name.
    ///
    pub fn parse(line: &str) -> ExResult<Option<Self>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let statement = if RE_DEF_KEYWORD.is_match(line) {
            let caps = RE_DEF
                .captures(line)
                .ok_or_else(|| exerr!(Syntax, "invalid function definition {}", line.trim()))?;
            check_name(&caps[1])?;
            let body = tokenize_expr(&caps[3])?;
            if body.is_empty() {
                return Err(exerr!(Syntax, "function {} has an empty body", &caps[1]));
            }
            Statement::Def(FunctionDef {
                name: caps[1].to_string(),
                params: parse_params(&caps[2])?,
                body,
            })
        } else if let Some(caps) = RE_ASSIGN.captures(line) {
            check_name(&caps[1])?;
            let expr = tokenize_expr(&caps[2])?;
            if expr.is_empty() {
                return Err(exerr!(Syntax, "nothing to assign to {}", &caps[1]));
            }
            Statement::Assign {
                name: caps[1].to_string(),
                expr,
            }
        } else if let Some(caps) = RE_CALL.captures(line) {
            check_name(&caps[1])?;
            let args = split_list(&caps[2]);
            if args.iter().any(|a| a.is_empty()) {
                return Err(exerr!(Syntax, "empty argument in call of {}", &caps[1]));
            }
            Statement::Call {
                name: caps[1].to_string(),
                args: args.into_iter().map(|a| a.to_string()).collect(),
            }
        } else {
            Statement::Eval(tokenize_expr(line)?)
        };
        Ok(Some(statement))
    }
}

/// Global variables and function definitions that persist from one statement to the next.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use stackcalc::Session;
/// let mut session = Session::<f64>::default();
/// session.exec_line("x = 5")?;
/// session.exec_line("def f(a, b) = a * b + x")?;
/// assert_eq!(session.exec_line("f(2, 3)")?, Some(11.0));
/// assert_eq!(session.exec_line("x + 1")?, Some(6.0));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session<T> {
    vars: Environment<T>,
    funcs: FunctionTable<T>,
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Session {
            vars: Environment::default(),
            funcs: FunctionTable::default(),
        }
    }
}

impl<T: CalcFloat> Session<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars(&self) -> &Environment<T> {
        &self.vars
    }

    pub fn funcs(&self) -> &FunctionTable<T> {
        &self.funcs
    }

    pub fn var(&self, name: &str) -> Option<T> {
        self.vars.get(name)
    }

    pub fn func(&self, name: &str) -> Option<&FunctionDef<T>> {
        self.funcs.get(name)
    }

    /// Evaluates an expression against the global variables.
    pub fn eval_str(&self, text: &str) -> ExResult<T> {
        eval_tokens(&tokenize_expr(text)?, &Environment::new(), &self.vars)
    }

    /// Calls a user defined function. Each argument is looked up as global variable first
    /// and parsed as number if there is no such variable. The parameters are only visible
    /// during this call. Arguments are parsed with [`str::parse`], so unlike literals inside
    /// expressions they may carry a sign or an exponent, e.g., `-1` or `1e3`.
    ///
    /// # Errors
    ///
    /// Unknown functions, wrong number of arguments, arguments that are neither variables
    /// nor numbers, and all errors of evaluating the function body.
    ///
    pub fn call<S: AsRef<str>>(&self, name: &str, args: &[S]) -> ExResult<T> {
        let def = self
            .funcs
            .get(name)
            .ok_or_else(|| exerr!(UndefinedFunction, "undefined function {}", name))?;
        if args.len() > def.arity() {
            return Err(exerr!(
                ArityMismatch(TooMany),
                "too many parameters, {} expects {} but got {}",
                name,
                def.arity(),
                args.len()
            ));
        } else if args.len() < def.arity() {
            return Err(exerr!(
                ArityMismatch(TooFew),
                "insufficient parameters, {} expects {} but got {}",
                name,
                def.arity(),
                args.len()
            ));
        }
        let mut local = Environment::new();
        for (param, arg) in def.params.iter().zip(args) {
            let arg = arg.as_ref().trim();
            let value = self
                .vars
                .get(arg)
                .or_else(|| arg.parse::<T>().ok())
                .ok_or_else(|| {
                    exerr!(
                        UninitializedArgument,
                        "the variable {} has not been initialized",
                        arg
                    )
                })?;
            local.insert(param, value);
        }
        debug!("calling {} with {:?}", name, local);
        eval_tokens(&def.body, &local, &self.vars)
    }

    /// Executes a statement. Evaluations and calls return their value, assignments and
    /// definitions return `None`. State is only changed if the statement succeeds.
    pub fn exec(&mut self, statement: Statement<T>) -> ExResult<Option<T>> {
        match statement {
            Statement::Eval(tokens) => {
                debug!("evaluating {} tokens", tokens.len());
                eval_tokens(&tokens, &Environment::new(), &self.vars).map(Some)
            }
            Statement::Assign { name, expr } => {
                let value = eval_tokens(&expr, &Environment::new(), &self.vars)?;
                debug!("assigning {value:?} to {name}");
                self.vars.insert(&name, value);
                Ok(None)
            }
            Statement::Def(def) => {
                debug!("defining {def}");
                self.funcs.insert(def);
                Ok(None)
            }
            Statement::Call { name, args } => self.call(&name, &args).map(Some),
        }
    }

    /// Parses a line and executes it, see [`exec`](Session::exec). Blank lines are ignored.
    pub fn exec_line(&mut self, line: &str) -> ExResult<Option<T>> {
        match Statement::parse(line)? {
            Some(statement) => self.exec(statement),
            None => Ok(None),
        }
    }
}
