//! WASM bridge exposing the Mathboard widgets to the browser host.
//!
//! Each wrapper owns one widget's state; constructors validate their inputs
//! and return `Err(JsValue)` with a user-displayable message. Analysis
//! reports cross the boundary as plain JS objects via `serde_wasm_bindgen`.

pub mod analysis;
pub mod function;
pub mod geometry;
pub mod physics;
