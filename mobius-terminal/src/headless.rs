/// Plain-text surface for scripted runs without a terminal UI
use mobius_core::{Rgb, ScreenPoint, Surface};
use std::io::{self, Write};

/// Records each polygon as `#rrggbb x,y x,y x,y` in paint order
#[derive(Debug, Default)]
pub struct PolygonLog {
    lines: Vec<String>,
}

impl PolygonLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

impl Surface for PolygonLog {
    fn clear_surface(&mut self) {
        self.lines.clear();
    }

    fn draw_filled_polygon(&mut self, points: &[ScreenPoint], fill: Rgb, _outline: Rgb) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        self.lines.push(format!("{fill} {}", coords.join(" ")));
    }
}
