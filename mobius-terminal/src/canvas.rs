/// Character-cell canvas that paints filled polygons in true color
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use mobius_core::{Rgb, ScreenPoint, Surface};
use std::io::Write;

/// Glyph used for polygon outlines on top of the fill color
const OUTLINE_GLYPH: char = '·';

/// Canvas background, like a blank white drawing area
const BACKGROUND: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub fill: Rgb,
    /// Outline color when the cell lies on the top-most polygon's edge
    pub edge: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            fill: BACKGROUND,
            edge: None,
        }
    }
}

/// Terminal surface that scales a logical pixel canvas onto cells.
///
/// Polygons overwrite what is beneath them in draw order; there is no depth
/// buffer.
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    logical_width: f64,
    logical_height: f64,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    /// `logical_*` is the pixel size the viewport targets (800x600 by default)
    pub fn new(width: usize, height: usize, logical_width: f64, logical_height: f64) -> Self {
        Self {
            width,
            height,
            logical_width,
            logical_height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width * height];
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Logical pixel to fractional cell coordinates
    fn to_cells(&self, p: &ScreenPoint) -> (f64, f64) {
        (
            p.x * self.width as f64 / self.logical_width,
            p.y * self.height as f64 / self.logical_height,
        )
    }

    fn rasterize_triangle(&mut self, v: [(f64, f64); 3], fill: Rgb) {
        let [v0, v1, v2] = v;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to canvas bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let idx = y as usize * self.width + x as usize;
                        self.cells[idx] = Cell { fill, edge: None };
                    }
                }
            }
        }
    }

    fn stroke_edge(&mut self, a: (f64, f64), b: (f64, f64), fill: Rgb, outline: Rgb) {
        // Clip first so the step count is bounded by the canvas size
        let Some((a, b)) = clip_segment(a, b, self.width as f64, self.height as f64) else {
            return;
        };
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (a.0 + (b.0 - a.0) * t).floor();
            let y = (a.1 + (b.1 - a.1) * t).floor();
            if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
                continue;
            }
            let idx = y as usize * self.width + x as usize;
            self.cells[idx] = Cell {
                fill,
                edge: Some(outline),
            };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];
                writer.queue(SetBackgroundColor(to_color(cell.fill)))?;
                match cell.edge {
                    Some(outline) => {
                        writer.queue(SetForegroundColor(to_color(outline)))?;
                        writer.queue(Print(OUTLINE_GLYPH))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            writer.queue(ResetColor)?;
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalCanvas {
    fn clear_surface(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn draw_filled_polygon(&mut self, points: &[ScreenPoint], fill: Rgb, outline: Rgb) {
        if points.len() != 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            log::trace!("skipping degenerate polygon {:?}", points);
            return;
        }

        let v = [
            self.to_cells(&points[0]),
            self.to_cells(&points[1]),
            self.to_cells(&points[2]),
        ];
        self.rasterize_triangle(v, fill);
        for i in 0..3 {
            self.stroke_edge(v[i], v[(i + 1) % 3], fill, outline);
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Liang-Barsky clip of segment `a`-`b` to `[0, width] x [0, height]`
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else if r < t0 {
            return None;
        } else {
            t1 = t1.min(r);
        }
    }

    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
