//! Geometry, unit-circle, and calculator widgets. These panels are
//! stateless, so plain functions replace wrapper structs.

use mathboard_core::arithmetic::{self, BasicOp};
use mathboard_core::geometry::{
    euler_characteristic_holds, interior_angle, regular_polygon_vertices, Projection, Solid,
};
use js_sys::Float64Array;
use mathboard_core::unit_circle;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn serialize<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Vertex list of a regular n-gon as [{x, y}, ...] pairs, vertex 0 at the
/// top.
#[wasm_bindgen]
pub fn polygon_vertices(n: usize, cx: f64, cy: f64, radius: f64) -> Result<JsValue, JsValue> {
    if n < 3 {
        return Err(JsValue::from_str("a polygon needs at least 3 sides"));
    }
    serialize(&regular_polygon_vertices(n, (cx, cy), radius))
}

#[wasm_bindgen]
pub fn polygon_interior_angle(n: usize) -> Result<f64, JsValue> {
    if n < 3 {
        return Err(JsValue::from_str("a polygon needs at least 3 sides"));
    }
    Ok(interior_angle(n))
}

/// Selector keys for every solid the explorer offers.
#[wasm_bindgen]
pub fn polyhedron_keys() -> Vec<JsValue> {
    Solid::ALL
        .iter()
        .map(|s| JsValue::from_str(s.key()))
        .collect()
}

/// Full descriptor (vertices, edges, faces, counts) for one solid.
#[wasm_bindgen]
pub fn polyhedron_descriptor(key: &str) -> Result<JsValue, JsValue> {
    let solid =
        Solid::from_key(key).ok_or_else(|| JsValue::from_str("Unknown polyhedron"))?;
    serialize(&solid.descriptor())
}

#[wasm_bindgen]
pub fn polyhedron_topology_complete(key: &str) -> Result<bool, JsValue> {
    let solid =
        Solid::from_key(key).ok_or_else(|| JsValue::from_str("Unknown polyhedron"))?;
    Ok(solid.descriptor().topology_complete())
}

#[wasm_bindgen]
pub fn euler_check(v: usize, e: usize, f: usize) -> bool {
    euler_characteristic_holds(v, e, f)
}

/// Projects one vertex for the wireframe view; returns [screen_x, screen_y,
/// depth].
#[wasm_bindgen]
pub fn project_vertex(
    x: f64,
    y: f64,
    z: f64,
    rot_x_deg: f64,
    rot_y_deg: f64,
    scale: f64,
    distance: f64,
) -> Float64Array {
    let projection = Projection {
        rot_x_deg,
        rot_y_deg,
        scale,
        distance,
    };
    let (sx, sy, depth) = projection.project_vertex([x, y, z]);
    Float64Array::from(&[sx, sy, depth][..])
}

/// The full special-angle reference table.
#[wasm_bindgen]
pub fn unit_circle_table() -> Result<JsValue, JsValue> {
    serialize(&unit_circle::SPECIAL_ANGLES)
}

/// Exact-value entry for `radians` if it lands on a special angle, else
/// undefined.
#[wasm_bindgen]
pub fn unit_circle_exact(radians: f64) -> Result<JsValue, JsValue> {
    match unit_circle::exact_value(radians) {
        Some(angle) => serialize(&angle),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Nearest special angle, for the snap-to-angle control.
#[wasm_bindgen]
pub fn unit_circle_snap(radians: f64) -> Result<JsValue, JsValue> {
    serialize(&unit_circle::nearest_special_angle(radians))
}

/// One calculator keypress: `op` is "add", "sub", "mul", or "div".
#[wasm_bindgen]
pub fn calculator_apply(op: &str, a: f64, b: f64) -> Result<f64, JsValue> {
    let op = match op {
        "add" => BasicOp::Add,
        "sub" => BasicOp::Sub,
        "mul" => BasicOp::Mul,
        "div" => BasicOp::Div,
        _ => return Err(JsValue::from_str("Unknown operation")),
    };
    arithmetic::apply(op, a, b).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{
        calculator_apply, euler_check, polygon_interior_angle, polygon_vertices,
        polyhedron_descriptor, polyhedron_topology_complete, project_vertex,
    };
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn polygon_requires_three_sides() {
        assert!(polygon_vertices(2, 0.0, 0.0, 1.0).is_err());
        assert!(polygon_vertices(3, 0.0, 0.0, 1.0).is_ok());
        assert!(polygon_interior_angle(2).is_err());
    }

    #[wasm_bindgen_test]
    fn polyhedron_lookup_by_key() {
        assert!(polyhedron_descriptor("cube").is_ok());
        assert!(polyhedron_descriptor("hypercube").is_err());
        assert!(polyhedron_topology_complete("cube").expect("known"));
        assert!(!polyhedron_topology_complete("dodecahedron").expect("known"));
    }

    #[wasm_bindgen_test]
    fn euler_check_matches_the_formula() {
        assert!(euler_check(4, 6, 4));
        assert!(!euler_check(4, 6, 5));
    }

    #[wasm_bindgen_test]
    fn projection_returns_triplet() {
        let out = project_vertex(1.0, 0.0, 0.0, 0.0, 0.0, 80.0, 5.0).to_vec();
        assert_eq!(out.len(), 3);
        assert!((out[0] - 80.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn calculator_validates_input() {
        assert_eq!(calculator_apply("add", 2.0, 3.0).expect("sum"), 5.0);
        assert!(calculator_apply("div", 1.0, 0.0).is_err());
        assert!(calculator_apply("mod", 1.0, 2.0).is_err());
    }
}
