/// Viewer session: the single owner of mutable viewer state
use crate::error::ParamError;
use crate::geometry::{generate, Mesh};
use crate::params::{ParamChange, ParamName, StripParams};
use crate::projection::Camera;
use crate::render::{Renderer, Surface};

/// Parameters, camera and the current mesh.
///
/// Parameter edits are staged and only reach the mesh on
/// [`Session::on_rebuild_requested`]. Rotation redraws the existing mesh.
#[derive(Debug, Clone)]
pub struct Session {
    params: StripParams,
    camera: Camera,
    renderer: Renderer,
    mesh: Mesh,
}

impl Session {
    /// Build the initial mesh for `params`
    pub fn new(params: StripParams, camera: Camera, renderer: Renderer) -> Self {
        let mesh = generate(&params);
        Self {
            params,
            camera,
            renderer,
            mesh,
        }
    }

    pub fn params(&self) -> &StripParams {
        &self.params
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Store a new value without rebuilding
    pub fn on_parameter_change(&mut self, name: ParamName, value: f64) -> Result<(), ParamError> {
        self.params.set(name, value)?;
        log::debug!("{name} set to {}", self.params.get(name));
        Ok(())
    }

    pub fn apply(&mut self, change: ParamChange) -> Result<(), ParamError> {
        self.on_parameter_change(change.name, change.value)
    }

    /// Regenerate the mesh from the staged parameters and redraw
    pub fn on_rebuild_requested<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.mesh = generate(&self.params);
        log::debug!("rebuilt mesh with {} triangles", self.mesh.len());
        self.redraw(surface);
    }

    /// Turn the camera and redraw the current mesh
    pub fn on_rotate<S: Surface + ?Sized>(&mut self, delta: f64, surface: &mut S) {
        self.camera.rotate(delta);
        self.redraw(surface);
    }

    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.renderer.draw(&self.mesh, &self.camera, surface);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StripParams::default(), Camera::default(), Renderer::default())
    }
}
