//! Implements the stress invariants and their derivatives

mod deviatoric_stress;
mod mean_stress;
mod von_mises_stress;
pub use crate::invariants::deviatoric_stress::*;
pub use crate::invariants::mean_stress::*;
pub use crate::invariants::von_mises_stress::*;
