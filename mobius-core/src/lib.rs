/// Möbius strip core: mesh generation and a painter's-algorithm draw pass.
///
/// Everything here is toolkit-agnostic. A presentation shell implements
/// [`Surface`] and drives a [`Session`] from its input events.

pub mod error;
pub mod geometry;
pub mod params;
pub mod projection;
pub mod render;
pub mod session;
pub mod transform;

// Re-export commonly used types
pub use error::ParamError;
pub use geometry::{generate, Mesh, Triangle};
pub use params::{ParamChange, ParamName, ParamRange, StripParams};
pub use projection::Camera;
pub use render::{DepthSort, DrawCommand, Renderer, Rgb, ScreenPoint, Surface, Viewport};
pub use session::Session;
pub use transform::RotationState;
