//! Analysis widgets: cubic explorer, rational-function explorer, and the
//! Riemann-sum integrator.

use mathboard_core::cubic::Cubic;
use mathboard_core::integration::DataSeries;
use mathboard_core::rational::RationalFunction;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCubicExplorer {
    cubic: Cubic,
}

#[wasm_bindgen]
impl WasmCubicExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> WasmCubicExplorer {
        console_error_panic_hook::set_once();
        WasmCubicExplorer {
            cubic: Cubic::new(a, b, c, d),
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.cubic.eval(x)
    }

    pub fn deriv(&self, x: f64) -> f64 {
        self.cubic.deriv(x)
    }

    pub fn critical_points(&self) -> Vec<f64> {
        self.cubic.critical_points()
    }

    /// The full analysis panel as one JS object.
    pub fn analyze(&self) -> Result<JsValue, JsValue> {
        to_value(&self.cubic.analyze()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmRationalExplorer {
    function: RationalFunction,
}

#[wasm_bindgen]
impl WasmRationalExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new(numerator: &str, denominator: &str) -> Result<WasmRationalExplorer, JsValue> {
        console_error_panic_hook::set_once();
        let function = RationalFunction::parse(numerator, denominator)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmRationalExplorer { function })
    }

    /// NaN at discontinuities; the host breaks the curve there.
    pub fn eval(&self, x: f64) -> f64 {
        self.function.eval(x)
    }

    pub fn analyze(&self) -> Result<JsValue, JsValue> {
        to_value(&self.function.analyze()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmIntegrator {
    series: DataSeries,
}

#[wasm_bindgen]
impl WasmIntegrator {
    /// Builds the series from the widget's data textarea; malformed lines
    /// are skipped.
    #[wasm_bindgen(constructor)]
    pub fn new(table: &str) -> WasmIntegrator {
        console_error_panic_hook::set_once();
        WasmIntegrator {
            series: DataSeries::parse_table(table),
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.len()
    }

    pub fn interpolate(&self, x: f64) -> f64 {
        self.series.interpolate(x)
    }

    pub fn riemann_sums(&self, n: usize) -> Result<JsValue, JsValue> {
        let sums = self
            .series
            .riemann_sums(n)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&sums).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{WasmCubicExplorer, WasmIntegrator, WasmRationalExplorer};
    use mathboard_core::integration::RiemannSums;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn cubic_explorer_finds_critical_points() {
        let explorer = WasmCubicExplorer::new(1.0, -3.0, 0.0, 0.0);
        let cps = explorer.critical_points();
        assert_eq!(cps.len(), 2);
        assert!(explorer.analyze().is_ok());
    }

    #[wasm_bindgen_test]
    fn rational_explorer_rejects_bad_polynomials() {
        assert!(WasmRationalExplorer::new("x^", "x + 1").is_err());
        let explorer = WasmRationalExplorer::new("x - 1", "x^2 - 3x + 2").expect("parse");
        assert!(explorer.eval(2.0).is_nan());
    }

    #[wasm_bindgen_test]
    fn integrator_round_trips_sums() {
        let integrator = WasmIntegrator::new("0 0\n1 1\n2 4\n3 9");
        assert_eq!(integrator.point_count(), 4);
        let value = integrator.riemann_sums(3).expect("sums");
        let sums: RiemannSums = from_value(value).expect("deserialize");
        assert!((sums.trapezoidal - 9.5).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn integrator_reports_insufficient_data() {
        let integrator = WasmIntegrator::new("1 1");
        assert!(integrator.riemann_sums(3).is_err());
    }
}
