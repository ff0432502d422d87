//! Implements the error type, settings and layout helpers shared by all modules

mod error;
mod layout;
mod order;
mod settings;
#[cfg(test)]
pub(crate) mod testing;
pub use crate::base::error::*;
pub use crate::base::layout::*;
pub use crate::base::order::*;
pub use crate::base::settings::*;
