use serde::{Deserialize, Serialize};

/// Holds the numerical tolerances of the designed discontinuities
///
/// None of these values is a physical parameter; they only decide where a branch
/// is taken. The defaults are returned by [Settings::new].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Von Mises stress at or below which the stress is taken as hydrostatic (apex)
    ///
    /// At the apex, the first and second derivatives of the von Mises stress are set to zero.
    pub apex_tolerance: f64,

    /// Gradient norm at or below which the unit normal of a yield surface is undefined
    pub normal_tolerance: f64,

    /// Yield function value at or below which the Perzyna flow rate is zero
    pub flow_tolerance: f64,

    /// Relaxation time at or below which a Prony element relaxes instantaneously
    pub relaxation_tolerance: f64,
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            apex_tolerance: 1e-14,
            normal_tolerance: 1e-14,
            flow_tolerance: 0.0,
            relaxation_tolerance: 0.0,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
