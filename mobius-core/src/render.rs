/// Painter's-algorithm draw pass
use std::fmt;

use crate::geometry::{Mesh, Triangle};
use crate::projection::Camera;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Light violet base fill
    pub const STRIP: Rgb = Rgb::new(0xA6, 0x89, 0xE1);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `intensity`, truncating toward zero.
    pub fn scaled(self, intensity: f64) -> Self {
        // `as u8` saturates and maps NaN to 0
        let channel = |c: u8| (f64::from(c) * intensity) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Maps the image plane onto canvas pixels, with y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn to_screen(&self, (x, y): (f64, f64)) -> ScreenPoint {
        ScreenPoint {
            x: self.center_x + x * self.scale,
            y: self.center_y - y * self.scale,
        }
    }
}

impl Default for Viewport {
    /// Fits an 800x600 canvas
    fn default() -> Self {
        Self {
            center_x: 400.0,
            center_y: 300.0,
            scale: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// One filled polygon, ready for a presentation surface
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub points: [ScreenPoint; 3],
    pub fill: Rgb,
    pub outline: Rgb,
    /// Key the command was ordered by
    pub depth: f64,
}

/// Anything that can show filled polygons: a window canvas, a terminal,
/// or a recorder in tests.
pub trait Surface {
    fn clear_surface(&mut self);

    fn draw_filled_polygon(&mut self, points: &[ScreenPoint], fill: Rgb, outline: Rgb);
}

/// Which depth drives the back-to-front order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthSort {
    /// Un-rotated centroid z. Ignores the camera yaw, so occlusion is only
    /// right near the starting view.
    #[default]
    ModelZ,
    /// Centroid depth after the camera yaw
    ViewSpace,
}

/// Converts a mesh and camera into ordered draw commands
#[derive(Debug, Clone)]
pub struct Renderer {
    pub viewport: Viewport,
    pub base_color: Rgb,
    pub outline: Rgb,
    pub depth_sort: DepthSort,
}

impl Renderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            base_color: Rgb::STRIP,
            outline: Rgb::BLACK,
            depth_sort: DepthSort::ModelZ,
        }
    }

    pub fn with_depth_sort(mut self, depth_sort: DepthSort) -> Self {
        self.depth_sort = depth_sort;
        self
    }

    fn depth_of(&self, triangle: &Triangle, camera: &Camera) -> f64 {
        match self.depth_sort {
            DepthSort::ModelZ => triangle.centroid().z,
            DepthSort::ViewSpace => camera.view_depth(triangle.centroid()),
        }
    }

    /// Build draw commands farthest-first.
    ///
    /// Equal depths keep mesh order. NaN coordinates are passed through as
    /// degenerate polygons.
    pub fn render(&self, mesh: &Mesh, camera: &Camera) -> Vec<DrawCommand> {
        let mut ordered: Vec<(f64, &Triangle)> = mesh
            .triangles
            .iter()
            .map(|t| (self.depth_of(t, camera), t))
            .collect();
        ordered.sort_by(|a, b| b.0.total_cmp(&a.0));

        ordered
            .into_iter()
            .map(|(depth, triangle)| self.shade_and_project(triangle, camera, depth))
            .collect()
    }

    fn shade_and_project(&self, triangle: &Triangle, camera: &Camera, depth: f64) -> DrawCommand {
        let vertices = triangle.vertices();
        let intensity = vertices
            .iter()
            .map(|p| camera.light_intensity(p))
            .sum::<f64>()
            / 3.0;

        DrawCommand {
            points: vertices.map(|p| self.viewport.to_screen(camera.project(&p))),
            fill: self.base_color.scaled(intensity),
            outline: self.outline,
            depth,
        }
    }

    /// Full redraw: clear the surface, then paint every triangle back to front
    pub fn draw<S: Surface + ?Sized>(&self, mesh: &Mesh, camera: &Camera, surface: &mut S) {
        let commands = self.render(mesh, camera);
        log::trace!(
            "draw pass: {} polygons at angle {:.3}",
            commands.len(),
            camera.angle()
        );

        surface.clear_surface();
        for command in &commands {
            surface.draw_filled_polygon(&command.points, command.fill, command.outline);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
