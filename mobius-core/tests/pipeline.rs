use std::f64::consts::PI;

use mobius_core::{generate, Camera, Renderer, Rgb, ScreenPoint, Session, StripParams, Surface};

#[derive(Default)]
struct Canvas {
    polygons: Vec<([ScreenPoint; 3], Rgb)>,
}

impl Surface for Canvas {
    fn clear_surface(&mut self) {
        self.polygons.clear();
    }

    fn draw_filled_polygon(&mut self, points: &[ScreenPoint], fill: Rgb, _outline: Rgb) {
        self.polygons.push(([points[0], points[1], points[2]], fill));
    }
}

fn small_strip() -> StripParams {
    StripParams {
        radius: 1.0,
        twist: 0.5,
        u_steps: 4,
        v_steps: 2,
    }
}

#[test]
fn regression_first_triangle_centroid() {
    let mesh = generate(&small_strip());
    assert_eq!(mesh.len(), 16);

    // first cell: u1 = 0, v in {-0.5, 0.0}; the third vertex sits at u2 = π/2
    let z = |u: f64, v: f64| 0.5 * v * (u / 2.0).sin();
    let expected = (z(0.0, -0.5) + z(0.0, 0.0) + z(PI / 2.0, -0.5)) / 3.0;
    let centroid = mesh.triangles[0].centroid();
    assert!((centroid.z - expected).abs() < 1e-12);
    assert!((centroid.z + 0.25 * (PI / 4.0).sin() / 3.0).abs() < 1e-12);
}

#[test]
fn draw_order_is_non_increasing_in_depth() {
    let params = StripParams {
        radius: 2.0,
        twist: 1.5,
        u_steps: 60,
        v_steps: 12,
    };
    let mesh = generate(&params);
    let mut camera = Camera::default();
    camera.rotate(0.8);

    let commands = Renderer::default().render(&mesh, &camera);
    assert_eq!(commands.len(), mesh.len());
    for pair in commands.windows(2) {
        assert!(pair[0].depth >= pair[1].depth);
    }
}

#[test]
fn full_turn_redraw_matches_start() {
    let mut session = Session::default();
    let mut canvas = Canvas::default();
    session.redraw(&mut canvas);
    let start = canvas.polygons.clone();

    for _ in 0..63 {
        session.on_rotate(0.1, &mut canvas);
    }
    // 63 * 0.1 falls short of 2π; finish the turn exactly
    session.on_rotate(2.0 * PI - 6.3, &mut canvas);

    assert_eq!(start.len(), canvas.polygons.len());
    for ((a, fill_a), (b, fill_b)) in start.iter().zip(&canvas.polygons) {
        assert_eq!(fill_a, fill_b);
        for (p, q) in a.iter().zip(b) {
            assert!((p.x - q.x).abs() < 1e-6);
            assert!((p.y - q.y).abs() < 1e-6);
        }
    }
}

#[test]
fn fills_stay_within_base_color() {
    let mut session = Session::default();
    let mut canvas = Canvas::default();
    session.on_rebuild_requested(&mut canvas);

    for (_, fill) in &canvas.polygons {
        assert!(fill.r <= Rgb::STRIP.r);
        assert!(fill.g <= Rgb::STRIP.g);
        assert!(fill.b <= Rgb::STRIP.b);
    }
}
