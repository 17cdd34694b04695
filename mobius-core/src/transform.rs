/// View rotation about the vertical axis
use nalgebra::{Point3, Rotation3, Vector3};

/// Accumulated camera yaw in radians.
///
/// The angle grows without wraparound; it only ever reaches sin/cos.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub angle: f64,
}

impl RotationState {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by a delta amount (in radians)
    pub fn rotate(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Rotation taking model space into camera space.
    ///
    /// `x' = x cosθ - z sinθ`, `z' = x sinθ + z cosθ`, `y' = y`. That is a
    /// right-handed rotation about +y by `-θ`.
    pub fn matrix(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), -self.angle)
    }

    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix() * *point
    }
}
