//! Implements the linear viscoelastic (Prony series) stress update and its sensitivities

mod linear_viscoelasticity;
mod prony_series;
pub use crate::viscoelastic::linear_viscoelasticity::*;
pub use crate::viscoelastic::prony_series::*;
