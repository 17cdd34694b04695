/// Camera, perspective projection and point-light shading
use nalgebra::Point3;

use crate::transform::RotationState;

/// Distance from the eye to the origin along the view axis
pub const DEFAULT_DISTANCE: f64 = 5.0;

/// Squared distance at which the point light stops contributing
pub const LIGHT_FALLOFF: f64 = 100.0;

/// Orbiting camera with a fixed point light.
///
/// Only the yaw changes at runtime. Distance and light position are fixed
/// when the camera is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub rotation: RotationState,
    pub dist: f64,
    pub light_pos: Point3<f64>,
}

impl Camera {
    pub fn new(dist: f64) -> Self {
        Self {
            rotation: RotationState::zero(),
            dist,
            light_pos: Point3::new(5.0, 5.0, 5.0),
        }
    }

    pub fn with_light(mut self, light_pos: Point3<f64>) -> Self {
        self.light_pos = light_pos;
        self
    }

    pub fn angle(&self) -> f64 {
        self.rotation.angle
    }

    pub fn rotate(&mut self, delta: f64) {
        self.rotation.rotate(delta);
    }

    /// Depth of `point` after the camera yaw is applied
    pub fn view_depth(&self, point: &Point3<f64>) -> f64 {
        self.rotation.apply(point).z
    }

    /// Project a model-space point to the unscaled image plane.
    ///
    /// Both axes are multiplied by `dist / (dist + z')`. Points with
    /// `dist + z' == 0` are not guarded and come back infinite or NaN.
    pub fn project(&self, point: &Point3<f64>) -> (f64, f64) {
        let view = self.rotation.apply(point);
        let f = self.dist / (self.dist + view.z);
        (view.x * f, view.y * f)
    }

    /// Quadratic falloff in `[0, 1]`, zero once the squared distance reaches 100
    pub fn light_intensity(&self, point: &Point3<f64>) -> f64 {
        let distance_sq = (point - self.light_pos).norm_squared();
        (1.0 - distance_sq / LIGHT_FALLOFF).max(0.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}
