use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Vertices of a regular n-gon. Vertex 0 sits at the top of the circle
/// (angle −π/2) and the rest follow counter-clockwise.
pub fn regular_polygon_vertices(n: usize, center: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = -PI / 2.0 + i as f64 * 2.0 * PI / n as f64;
            (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        })
        .collect()
}

/// Interior angle of a regular n-gon in degrees: 180(n−2)/n.
pub fn interior_angle(n: usize) -> f64 {
    180.0 * (n as f64 - 2.0) / n as f64
}

/// V − E + F == 2 for a convex polyhedron.
pub fn euler_characteristic_holds(v: usize, e: usize, f: usize) -> bool {
    v as i64 - e as i64 + f as i64 == 2
}

/// The solids the explorer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    TriangularPrism,
    PentagonalPrism,
    SquarePyramid,
    TriangularPyramid,
}

impl Solid {
    /// The selector value the host form uses for this solid.
    pub fn key(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Cube => "cube",
            Solid::Octahedron => "octahedron",
            Solid::Dodecahedron => "dodecahedron",
            Solid::Icosahedron => "icosahedron",
            Solid::TriangularPrism => "triangular-prism",
            Solid::PentagonalPrism => "pentagonal-prism",
            Solid::SquarePyramid => "square-pyramid",
            Solid::TriangularPyramid => "triangular-pyramid",
        }
    }

    pub fn from_key(key: &str) -> Option<Solid> {
        Solid::ALL.into_iter().find(|s| s.key() == key)
    }

    pub const ALL: [Solid; 9] = [
        Solid::Tetrahedron,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
        Solid::TriangularPrism,
        Solid::PentagonalPrism,
        Solid::SquarePyramid,
        Solid::TriangularPyramid,
    ];
}

/// Static vertex/edge/face tables for one solid.
///
/// The dodecahedron and icosahedron carry their vertex clouds and declared
/// V/E/F counts but no edge or face topology; `topology_complete` reports
/// them unsupported rather than guessing the missing tables. The pentagonal
/// prism likewise lists no faces.
#[derive(Debug, Clone, Serialize)]
pub struct Polyhedron {
    pub name: &'static str,
    pub vertices: Vec<[f64; 3]>,
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<Vec<usize>>,
    pub v: usize,
    pub e: usize,
    pub f: usize,
}

impl Polyhedron {
    /// True when the edge and face tables actually carry the declared counts.
    pub fn topology_complete(&self) -> bool {
        self.edges.len() == self.e && self.faces.len() == self.f
    }

    /// Euler check over the declared counts, not the table lengths.
    pub fn euler_holds(&self) -> bool {
        euler_characteristic_holds(self.v, self.e, self.f)
    }
}

impl Solid {
    pub fn descriptor(self) -> Polyhedron {
        match self {
            Solid::Tetrahedron => Polyhedron {
                name: "Tetrahedron",
                vertices: vec![
                    [0.0, 1.0, 0.0],
                    [-0.866, -0.5, -0.5],
                    [0.866, -0.5, -0.5],
                    [0.0, -0.5, 1.0],
                ],
                edges: vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]],
                faces: vec![
                    vec![0, 1, 2],
                    vec![0, 2, 3],
                    vec![0, 3, 1],
                    vec![1, 3, 2],
                ],
                v: 4,
                e: 6,
                f: 4,
            },
            Solid::Cube => Polyhedron {
                name: "Cube (Hexahedron)",
                vertices: vec![
                    [-1.0, -1.0, -1.0],
                    [1.0, -1.0, -1.0],
                    [1.0, 1.0, -1.0],
                    [-1.0, 1.0, -1.0],
                    [-1.0, -1.0, 1.0],
                    [1.0, -1.0, 1.0],
                    [1.0, 1.0, 1.0],
                    [-1.0, 1.0, 1.0],
                ],
                edges: vec![
                    [0, 1],
                    [1, 2],
                    [2, 3],
                    [3, 0],
                    [4, 5],
                    [5, 6],
                    [6, 7],
                    [7, 4],
                    [0, 4],
                    [1, 5],
                    [2, 6],
                    [3, 7],
                ],
                faces: vec![
                    vec![0, 1, 2, 3],
                    vec![4, 7, 6, 5],
                    vec![0, 4, 5, 1],
                    vec![2, 6, 7, 3],
                    vec![0, 3, 7, 4],
                    vec![1, 5, 6, 2],
                ],
                v: 8,
                e: 12,
                f: 6,
            },
            Solid::Octahedron => Polyhedron {
                name: "Octahedron",
                vertices: vec![
                    [0.0, 0.0, 1.414],
                    [1.0, 1.0, 0.0],
                    [1.0, -1.0, 0.0],
                    [-1.0, -1.0, 0.0],
                    [-1.0, 1.0, 0.0],
                    [0.0, 0.0, -1.414],
                ],
                edges: vec![
                    [0, 1],
                    [0, 2],
                    [0, 3],
                    [0, 4],
                    [5, 1],
                    [5, 2],
                    [5, 3],
                    [5, 4],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 1],
                ],
                faces: vec![
                    vec![0, 1, 2],
                    vec![0, 2, 3],
                    vec![0, 3, 4],
                    vec![0, 4, 1],
                    vec![5, 2, 1],
                    vec![5, 3, 2],
                    vec![5, 4, 3],
                    vec![5, 1, 4],
                ],
                v: 6,
                e: 12,
                f: 8,
            },
            Solid::Dodecahedron => Polyhedron {
                name: "Dodecahedron",
                vertices: vec![
                    [1.0, 1.0, 1.0],
                    [1.0, 1.0, -1.0],
                    [1.0, -1.0, 1.0],
                    [1.0, -1.0, -1.0],
                    [-1.0, 1.0, 1.0],
                    [-1.0, 1.0, -1.0],
                    [-1.0, -1.0, 1.0],
                    [-1.0, -1.0, -1.0],
                    [0.0, 1.618, 0.618],
                    [0.0, 1.618, -0.618],
                    [0.0, -1.618, 0.618],
                    [0.0, -1.618, -0.618],
                    [1.618, 0.618, 0.0],
                    [1.618, -0.618, 0.0],
                    [-1.618, 0.618, 0.0],
                    [-1.618, -0.618, 0.0],
                    [0.618, 0.0, 1.618],
                    [0.618, 0.0, -1.618],
                    [-0.618, 0.0, 1.618],
                    [-0.618, 0.0, -1.618],
                ],
                edges: Vec::new(),
                faces: Vec::new(),
                v: 20,
                e: 30,
                f: 12,
            },
            Solid::Icosahedron => Polyhedron {
                name: "Icosahedron",
                vertices: vec![
                    [0.0, 1.0, 1.618],
                    [0.0, 1.0, -1.618],
                    [0.0, -1.0, 1.618],
                    [0.0, -1.0, -1.618],
                    [1.0, 1.618, 0.0],
                    [1.0, -1.618, 0.0],
                    [-1.0, 1.618, 0.0],
                    [-1.0, -1.618, 0.0],
                    [1.618, 0.0, 1.0],
                    [1.618, 0.0, -1.0],
                    [-1.618, 0.0, 1.0],
                    [-1.618, 0.0, -1.0],
                ],
                edges: Vec::new(),
                faces: Vec::new(),
                v: 12,
                e: 30,
                f: 20,
            },
            Solid::TriangularPrism => Polyhedron {
                name: "Triangular Prism",
                vertices: vec![
                    [-1.0, -0.577, -1.0],
                    [1.0, -0.577, -1.0],
                    [0.0, 1.155, -1.0],
                    [-1.0, -0.577, 1.0],
                    [1.0, -0.577, 1.0],
                    [0.0, 1.155, 1.0],
                ],
                edges: vec![
                    [0, 1],
                    [1, 2],
                    [2, 0],
                    [3, 4],
                    [4, 5],
                    [5, 3],
                    [0, 3],
                    [1, 4],
                    [2, 5],
                ],
                faces: vec![
                    vec![0, 1, 2],
                    vec![3, 5, 4],
                    vec![0, 3, 4, 1],
                    vec![1, 4, 5, 2],
                    vec![2, 5, 3, 0],
                ],
                v: 6,
                e: 9,
                f: 5,
            },
            Solid::PentagonalPrism => Polyhedron {
                name: "Pentagonal Prism",
                vertices: vec![
                    [1.0, 0.0, -1.0],
                    [0.309, 0.951, -1.0],
                    [-0.809, 0.588, -1.0],
                    [-0.809, -0.588, -1.0],
                    [0.309, -0.951, -1.0],
                    [1.0, 0.0, 1.0],
                    [0.309, 0.951, 1.0],
                    [-0.809, 0.588, 1.0],
                    [-0.809, -0.588, 1.0],
                    [0.309, -0.951, 1.0],
                ],
                edges: vec![
                    [0, 1],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 0],
                    [5, 6],
                    [6, 7],
                    [7, 8],
                    [8, 9],
                    [9, 5],
                    [0, 5],
                    [1, 6],
                    [2, 7],
                    [3, 8],
                    [4, 9],
                ],
                faces: Vec::new(),
                v: 10,
                e: 15,
                f: 7,
            },
            Solid::SquarePyramid => Polyhedron {
                name: "Square Pyramid",
                vertices: vec![
                    [0.0, 1.5, 0.0],
                    [-1.0, 0.0, -1.0],
                    [1.0, 0.0, -1.0],
                    [1.0, 0.0, 1.0],
                    [-1.0, 0.0, 1.0],
                ],
                edges: vec![
                    [0, 1],
                    [0, 2],
                    [0, 3],
                    [0, 4],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 1],
                ],
                faces: vec![
                    vec![1, 2, 3, 4],
                    vec![0, 1, 2],
                    vec![0, 2, 3],
                    vec![0, 3, 4],
                    vec![0, 4, 1],
                ],
                v: 5,
                e: 8,
                f: 5,
            },
            Solid::TriangularPyramid => Polyhedron {
                name: "Triangular Pyramid",
                vertices: vec![
                    [0.0, 1.0, 0.0],
                    [-1.0, -0.5, -0.577],
                    [1.0, -0.5, -0.577],
                    [0.0, -0.5, 1.155],
                ],
                edges: vec![[0, 1], [0, 2], [0, 3], [1, 2], [2, 3], [3, 1]],
                faces: vec![
                    vec![1, 2, 3],
                    vec![0, 1, 2],
                    vec![0, 2, 3],
                    vec![0, 3, 1],
                ],
                v: 4,
                e: 6,
                f: 4,
            },
        }
    }
}

/// X-then-Y rotation followed by perspective division. Output is in camera
/// space with y up; the renderer adds its own center offset and y flip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projection {
    pub rot_x_deg: f64,
    pub rot_y_deg: f64,
    pub scale: f64,
    pub distance: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            rot_x_deg: 15.0,
            rot_y_deg: 25.0,
            scale: 80.0,
            distance: 5.0,
        }
    }
}

impl Projection {
    /// Returns (screen_x, screen_y, depth); depth is kept for painter's-order
    /// sorting.
    pub fn project_vertex(&self, vertex: [f64; 3]) -> (f64, f64, f64) {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rot_x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rot_y_deg.to_radians());
        let p = ry * (rx * Vector3::new(vertex[0], vertex[1], vertex[2]));
        let perspective = self.distance / (self.distance + p.z);
        (p.x * self.scale * perspective, p.y * self.scale * perspective, p.z)
    }
}
