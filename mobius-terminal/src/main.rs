/// Möbius Strip Viewer - terminal front end
///
/// Controls:
///   - Left / Right: Rotate the camera
///   - r/R, t/T, u/U, v/V: Adjust radius, twist, length and width detail
///   - Enter / Space: Rebuild the strip with the adjusted parameters
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use mobius_core::{ParamChange, Renderer, Session};
use std::path::PathBuf;

use mobius_terminal::config::{Overrides, Resolved};
use mobius_terminal::{FileConfig, PolygonLog, SortMode, TerminalApp};

/// Render an interactive Möbius strip in the terminal
///
/// Examples:
///   # Default strip
///   mobius-terminal
///
///   # Wider, denser strip
///   mobius-terminal --radius 2.0 --u-steps 60 --v-steps 12
///
///   # Print the polygons of one frame instead of opening the viewer
///   mobius-terminal --headless --set twist=1.5 --angle 0.3
#[derive(Parser, Debug)]
#[command(name = "mobius-terminal")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches mobius.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strip radius
    #[arg(long)]
    radius: Option<f64>,

    /// Twist (height of the cross-section)
    #[arg(long)]
    twist: Option<f64>,

    /// Subdivisions along the strip
    #[arg(long)]
    u_steps: Option<u32>,

    /// Subdivisions across the strip
    #[arg(long)]
    v_steps: Option<u32>,

    /// Parameter change such as `radius=2.5`, applied after the other options
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<ParamChange>,

    /// Initial camera angle in radians
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    angle: f64,

    /// Radians per arrow key press
    #[arg(long)]
    rotate_step: Option<f64>,

    /// Depth used for back-to-front ordering
    #[arg(long, value_enum)]
    depth_sort: Option<SortMode>,

    /// Print one frame of polygons to stdout and exit
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    let args = Args::parse();

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let Resolved {
        params,
        depth_sort,
        rotate_step,
    } = file_config.resolve(&Overrides {
        radius: args.radius,
        twist: args.twist,
        u_steps: args.u_steps,
        v_steps: args.v_steps,
        set: args.set.clone(),
        rotate_step: args.rotate_step,
        depth_sort: args.depth_sort,
    })?;

    let mut camera = file_config.camera();
    camera.rotate(args.angle);
    let renderer = Renderer::default().with_depth_sort(depth_sort.into());

    log::info!(
        "strip: radius={} twist={} steps={}x{} sort={:?}",
        params.radius,
        params.twist,
        params.u_steps,
        params.v_steps,
        depth_sort
    );
    let session = Session::new(params, camera, renderer);

    if args.headless {
        let mut polygons = PolygonLog::new();
        session.redraw(&mut polygons);
        polygons
            .write_to(&mut std::io::stdout().lock())
            .context("Failed to write polygons")?;
        return Ok(());
    }

    let mut app =
        TerminalApp::new(session, rotate_step).context("Failed to query terminal size")?;
    app.run().context("Terminal viewer failed")?;

    Ok(())
}
