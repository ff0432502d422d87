//! Implements yield surfaces, scalar response laws and stiffness conversions

mod drucker_prager;
mod jaumann_stiffness;
mod linear_hardening;
mod perzyna;
mod volumetric_neo_hookean;
pub use crate::material::drucker_prager::*;
pub use crate::material::jaumann_stiffness::*;
pub use crate::material::linear_hardening::*;
pub use crate::material::perzyna::*;
pub use crate::material::volumetric_neo_hookean::*;
