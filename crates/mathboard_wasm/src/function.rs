//! Expression-plotting widget: parse once, evaluate per sample.

use mathboard_core::expression::Function;
use mathboard_core::scene::sample_function;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmFunction {
    inner: Function,
}

#[wasm_bindgen]
impl WasmFunction {
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> Result<WasmFunction, JsValue> {
        console_error_panic_hook::set_once();
        let inner = Function::parse(source).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmFunction { inner })
    }

    /// NaN for domain violations; the host skips those samples.
    pub fn eval(&self, x: f64) -> f64 {
        self.inner.eval(x)
    }

    /// Exact derivative via dual numbers, for the tangent-line overlay.
    pub fn derivative_at(&self, x: f64) -> f64 {
        self.inner.derivative(x)
    }

    /// Central difference, shown next to the exact value in the limits panel.
    pub fn approximate_derivative(&self, x: f64, h: f64) -> f64 {
        self.inner.approximate_derivative(x, h)
    }

    /// (f(a + h) - f(a)) / h for the secant-line demonstration.
    pub fn difference_quotient(&self, a: f64, h: f64) -> f64 {
        self.inner.difference_quotient(a, h)
    }

    pub fn source(&self) -> String {
        self.inner.source().to_string()
    }

    /// Plot primitives for [x_min, x_max], split at discontinuities.
    pub fn sample(
        &self,
        x_min: f64,
        x_max: f64,
        step: f64,
        y_clip: f64,
    ) -> Result<JsValue, JsValue> {
        if !(step > 0.0) {
            return Err(JsValue::from_str("step must be positive"));
        }
        let primitives = sample_function(&self.inner, x_min, x_max, step, y_clip);
        to_value(&primitives).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::WasmFunction;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn parses_and_evaluates() {
        let f = WasmFunction::new("x^2 + 1").expect("parse");
        assert!((f.eval(3.0) - 10.0).abs() < 1e-12);
        assert!((f.derivative_at(3.0) - 6.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn rejects_unknown_identifiers() {
        let result = WasmFunction::new("y + 1");
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn sample_rejects_bad_step() {
        let f = WasmFunction::new("x").expect("parse");
        assert!(f.sample(0.0, 1.0, 0.0, 10.0).is_err());
        assert!(f.sample(0.0, 1.0, 0.1, 10.0).is_ok());
    }
}
