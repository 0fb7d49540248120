use crate::parser::{unparse, Token};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of parameter names a definition keeps on the stack before allocating.
pub const N_PARAMS_ON_STACK: usize = 4;

pub type ParamVec = SmallVec<[String; N_PARAMS_ON_STACK]>;

/// Ordered mapping from variable names to values. Iteration yields names in
/// alphabetical order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Environment<T> {
    bindings: BTreeMap<String, T>,
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Environment {
            bindings: BTreeMap::new(),
        }
    }
}

impl<T: Copy> Environment<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<T> {
        self.bindings.get(name).copied()
    }

    /// Binds `name` to `value` and returns the value that was bound before, if any.
    pub fn insert(&mut self, name: &str, value: T) -> Option<T> {
        self.bindings.insert(name.to_string(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<T: Copy> FromIterator<(String, T)> for Environment<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Environment {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// A user defined function, created by a `def` statement and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDef<T> {
    pub name: String,
    pub params: ParamVec,
    pub body: Vec<Token<T>>,
}

impl<T> FunctionDef<T> {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl<T: Debug> Display for FunctionDef<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "def {}({}) = {}",
            self.name,
            self.params.join(", "),
            unparse(&self.body)
        )
    }
}

/// Function definitions by name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionTable<T> {
    defs: BTreeMap<String, FunctionDef<T>>,
}

impl<T> Default for FunctionTable<T> {
    fn default() -> Self {
        FunctionTable {
            defs: BTreeMap::new(),
        }
    }
}

impl<T> FunctionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef<T>> {
        self.defs.get(name)
    }

    /// Stores a definition. An existing definition with the same name is replaced and returned.
    pub fn insert(&mut self, def: FunctionDef<T>) -> Option<FunctionDef<T>> {
        self.defs.insert(def.name.clone(), def)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef<T>> {
        self.defs.values()
    }
}
