/// Geometry primitives and Möbius strip tessellation
use nalgebra::Point3;
use std::f64::consts::PI;

use crate::params::StripParams;

/// A triangle face with its centroid fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f64>; 3],
    centroid: Point3<f64>,
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        let centroid = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0);
        Self {
            vertices: [v0, v1, v2],
            centroid,
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>; 3] {
        &self.vertices
    }

    /// Mean of the three vertices, used as the painter's depth key
    pub fn centroid(&self) -> &Point3<f64> {
        &self.centroid
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Evaluate the Möbius parametrization at `(u, v)`.
///
/// The half angle `u / 2` flips the cross-section once per revolution, which
/// is what makes the surface one-sided.
pub fn mobius_point(radius: f64, twist: f64, u: f64, v: f64) -> Point3<f64> {
    let half = u / 2.0;
    let r = radius + v * half.cos();
    Point3::new(r * u.cos(), r * u.sin(), twist * v * half.sin())
}

/// Tessellate the strip into `2 * u_steps * v_steps` triangles.
///
/// Cells are visited u-major, v-minor. Each quad is split along the same
/// diagonal: `(p1, p2, p3)` then `(p2, p4, p3)`. A zero step count produces
/// an empty mesh.
pub fn generate(params: &StripParams) -> Mesh {
    let StripParams {
        radius,
        twist,
        u_steps,
        v_steps,
    } = *params;

    if u_steps == 0 || v_steps == 0 {
        log::debug!("zero tessellation ({u_steps}x{v_steps}), empty mesh");
        return Mesh::new();
    }

    let mut mesh = Mesh::with_capacity(2 * u_steps as usize * v_steps as usize);
    let u_at = |i: u32| 2.0 * PI * f64::from(i) / f64::from(u_steps);
    let v_at = |j: u32| -0.5 + f64::from(j) / f64::from(v_steps);

    for i in 0..u_steps {
        let (u1, u2) = (u_at(i), u_at(i + 1));
        for j in 0..v_steps {
            let (v1, v2) = (v_at(j), v_at(j + 1));

            let p1 = mobius_point(radius, twist, u1, v1);
            let p2 = mobius_point(radius, twist, u1, v2);
            let p3 = mobius_point(radius, twist, u2, v1);
            let p4 = mobius_point(radius, twist, u2, v2);

            mesh.add_triangle(Triangle::new(p1, p2, p3));
            mesh.add_triangle(Triangle::new(p2, p4, p3));
        }
    }

    log::debug!(
        "mobius strip r={radius} twist={twist} {u_steps}x{v_steps}: {} triangles",
        mesh.len()
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f64, twist: f64, u_steps: u32, v_steps: u32) -> StripParams {
        StripParams {
            radius,
            twist,
            u_steps,
            v_steps,
        }
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 3.0),
            Point3::new(0.0, 3.0, 6.0),
        );
        assert!((tri.centroid() - Point3::new(1.0, 1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_triangle_count() {
        for (u, v) in [(1, 1), (4, 2), (10, 5), (100, 30), (7, 13)] {
            let mesh = generate(&params(1.5, 1.0, u, v));
            assert_eq!(mesh.len(), 2 * u as usize * v as usize);
        }
    }

    #[test]
    fn test_zero_steps_is_empty() {
        assert!(generate(&params(1.0, 0.5, 0, 5)).is_empty());
        assert!(generate(&params(1.0, 0.5, 10, 0)).is_empty());
    }

    #[test]
    fn test_vertices_are_distinct() {
        for (u, v) in [(2, 1), (3, 1), (10, 5), (40, 12)] {
            let mesh = generate(&params(1.0, 0.5, u, v));
            for tri in &mesh.triangles {
                let [a, b, c] = tri.vertices();
                assert!((a - b).norm() > 1e-9);
                assert!((b - c).norm() > 1e-9);
                assert!((a - c).norm() > 1e-9);
            }
        }
    }

    #[test]
    fn test_single_revolution_cell_folds_on_seam() {
        // with one u step both cell edges sit on the seam, and the half twist
        // maps v = -0.5 at u = 2π onto v = +0.5 at u = 0
        let mesh = generate(&params(1.0, 0.5, 1, 1));
        let [_, p2, p3] = mesh.triangles[0].vertices();
        assert!((p2 - p3).norm() < 1e-9);
    }

    #[test]
    fn test_cell_diagonal_order() {
        let mesh = generate(&params(2.0, 1.0, 3, 2));
        let u1 = 0.0;
        let u2 = 2.0 * PI / 3.0;
        let p1 = mobius_point(2.0, 1.0, u1, -0.5);
        let p2 = mobius_point(2.0, 1.0, u1, 0.0);
        let p3 = mobius_point(2.0, 1.0, u2, -0.5);
        let p4 = mobius_point(2.0, 1.0, u2, 0.0);

        assert_eq!(mesh.triangles[0].vertices(), &[p1, p2, p3]);
        assert_eq!(mesh.triangles[1].vertices(), &[p2, p4, p3]);
    }

    #[test]
    fn test_half_twist_at_seam() {
        // cos(u/2) changes sign across one revolution
        let near_end = 2.0 * PI - 1e-6;
        assert!((0.0_f64 / 2.0).cos() > 0.0);
        assert!((near_end / 2.0).cos() < 0.0);

        // the edge v = +w at u = 2π lands on the edge v = -w at u = 0
        let start = mobius_point(1.0, 0.5, 0.0, -0.25);
        let end = mobius_point(1.0, 0.5, 2.0 * PI, 0.25);
        assert!((start - end).norm() < 1e-9);
    }
}
