/// Error types for parameter handling
use thiserror::Error;

use crate::params::ParamName;

/// Failures while turning user input into strip parameters.
///
/// Geometry and rendering never fail; numeric edge cases surface as empty
/// or degenerate output instead.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("unknown parameter `{0}` (expected radius, twist, u_steps or v_steps)")]
    UnknownParameter(String),

    #[error("invalid parameter change `{input}`: {reason}")]
    Syntax { input: String, reason: String },

    #[error("{name} must be a finite, non-negative step count, got {value}")]
    InvalidSteps { name: ParamName, value: f64 },
}
