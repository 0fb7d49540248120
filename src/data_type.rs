use num::Float;
use std::{fmt::Debug, str::FromStr};

/// Gathers `Float`, `FromStr`, and `Debug` in one trait.
/// Every type that is used as value of the calculator needs to implement at least this.
/// An implementation is provided for `f32` and `f64` automatically.
pub trait CalcFloat: Float + FromStr + Debug {}
impl<T: Float + FromStr + Debug> CalcFloat for T {}
