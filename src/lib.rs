//! Stress invariants, yield functions and viscoelastic updates with analytic Jacobians
//!
//! All tensors are row-major flattened d×d arrays stored in [russell_lab::Vector]; derivatives of
//! vector-valued quantities are [russell_lab::Matrix] with rows for outputs and columns for inputs.
//! Every operation is a pure function of its arguments and returns a [StressError] on invalid input.

mod base;
mod invariants;
mod material;
mod viscoelastic;
pub use crate::base::*;
pub use crate::invariants::*;
pub use crate::material::*;
pub use crate::viscoelastic::*;
