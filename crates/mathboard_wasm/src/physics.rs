//! Physics widgets: one wrapper per panel, each stepped once per animation
//! frame from the host's requestAnimationFrame loop.

use mathboard_core::physics::{
    CircularMotion, Collision, CollisionKind, CollisionSim, Oscillator, Projectile, SlidingBlock,
    DEFAULT_RESTITUTION,
};
use mathboard_core::traits::Simulation;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn to_js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmProjectile {
    inner: Projectile,
}

#[wasm_bindgen]
impl WasmProjectile {
    #[wasm_bindgen(constructor)]
    pub fn new(speed: f64, angle_deg: f64, gravity: f64) -> Result<WasmProjectile, JsValue> {
        console_error_panic_hook::set_once();
        let inner = Projectile::new(speed, angle_deg, gravity).map_err(to_js_err)?;
        Ok(WasmProjectile { inner })
    }

    pub fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    pub fn x(&self) -> f64 {
        self.inner.current_position().0
    }

    pub fn y(&self) -> f64 {
        self.inner.current_position().1
    }

    pub fn landed(&self) -> bool {
        self.inner.landed()
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.analyze()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmOscillator {
    inner: Oscillator,
}

#[wasm_bindgen]
impl WasmOscillator {
    pub fn spring(stiffness: f64, mass: f64, amplitude: f64) -> Result<WasmOscillator, JsValue> {
        console_error_panic_hook::set_once();
        let inner = Oscillator::spring(stiffness, mass, amplitude).map_err(to_js_err)?;
        Ok(WasmOscillator { inner })
    }

    pub fn pendulum(length: f64, gravity: f64, amplitude: f64) -> Result<WasmOscillator, JsValue> {
        console_error_panic_hook::set_once();
        let inner = Oscillator::pendulum(length, gravity, amplitude).map_err(to_js_err)?;
        Ok(WasmOscillator { inner })
    }

    pub fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    pub fn displacement(&self) -> f64 {
        self.inner.current_displacement()
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.analyze()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmCollisionSim {
    inner: CollisionSim,
}

#[wasm_bindgen]
impl WasmCollisionSim {
    /// `kind` is the panel's selector value: "elastic", "inelastic", or
    /// "perfectly-inelastic". The inelastic case uses the fixed restitution
    /// of 0.5.
    #[wasm_bindgen(constructor)]
    pub fn new(
        m1: f64,
        u1: f64,
        m2: f64,
        u2: f64,
        kind: &str,
        x1: f64,
        x2: f64,
    ) -> Result<WasmCollisionSim, JsValue> {
        console_error_panic_hook::set_once();
        let kind = match kind {
            "elastic" => CollisionKind::Elastic,
            "inelastic" => CollisionKind::Inelastic {
                restitution: DEFAULT_RESTITUTION,
            },
            "perfectly-inelastic" => CollisionKind::PerfectlyInelastic,
            _ => return Err(JsValue::from_str("Unknown collision type")),
        };
        let collision = Collision::new(m1, u1, m2, u2, kind).map_err(to_js_err)?;
        let inner = CollisionSim::new(collision, x1, x2).map_err(to_js_err)?;
        Ok(WasmCollisionSim { inner })
    }

    pub fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    pub fn x1(&self) -> f64 {
        self.inner.x1
    }

    pub fn x2(&self) -> f64 {
        self.inner.x2
    }

    pub fn v1(&self) -> f64 {
        self.inner.v1
    }

    pub fn v2(&self) -> f64 {
        self.inner.v2
    }

    pub fn has_collided(&self) -> bool {
        self.inner.has_collided()
    }

    /// Momentum/energy table shown beside the animation.
    pub fn outcome(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.outcome()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmCircular {
    inner: CircularMotion,
}

#[wasm_bindgen]
impl WasmCircular {
    #[wasm_bindgen(constructor)]
    pub fn new(mass: f64, radius: f64, omega: f64) -> Result<WasmCircular, JsValue> {
        console_error_panic_hook::set_once();
        let inner = CircularMotion::new(mass, radius, omega).map_err(to_js_err)?;
        Ok(WasmCircular { inner })
    }

    pub fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    pub fn x(&self) -> f64 {
        self.inner.current_position().0
    }

    pub fn y(&self) -> f64 {
        self.inner.current_position().1
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.analyze()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub struct WasmSlidingBlock {
    inner: SlidingBlock,
}

#[wasm_bindgen]
impl WasmSlidingBlock {
    #[wasm_bindgen(constructor)]
    pub fn new(
        mass: f64,
        applied_force: f64,
        friction_coeff: f64,
        surface_angle_deg: f64,
        gravity: f64,
    ) -> Result<WasmSlidingBlock, JsValue> {
        console_error_panic_hook::set_once();
        let inner = SlidingBlock::new(mass, applied_force, friction_coeff, surface_angle_deg, gravity)
            .map_err(to_js_err)?;
        Ok(WasmSlidingBlock { inner })
    }

    pub fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    pub fn position(&self) -> f64 {
        self.inner.position
    }

    pub fn velocity(&self) -> f64 {
        self.inner.velocity
    }

    pub fn set_applied_force(&mut self, force: f64) {
        self.inner.applied_force = force;
    }

    pub fn forces(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.forces()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{WasmCollisionSim, WasmOscillator, WasmProjectile};
    use mathboard_core::physics::CollisionOutcome;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn projectile_rejects_non_positive_gravity() {
        assert!(WasmProjectile::new(10.0, 45.0, 0.0).is_err());
        assert!(WasmProjectile::new(10.0, 45.0, 9.8).is_ok());
    }

    #[wasm_bindgen_test]
    fn collision_sim_reports_scenario_outcome() {
        let sim =
            WasmCollisionSim::new(2.0, 5.0, 3.0, -2.0, "elastic", -5.0, 5.0).expect("build");
        let outcome: CollisionOutcome = from_value(sim.outcome().expect("value")).expect("de");
        assert!((outcome.v1 + 3.4).abs() < 1e-9);
        assert!((outcome.v2 - 3.6).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn unknown_collision_kind_is_rejected() {
        assert!(WasmCollisionSim::new(1.0, 1.0, 1.0, -1.0, "sticky", -1.0, 1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn oscillator_steps_and_resets() {
        let mut osc = WasmOscillator::spring(4.0, 1.0, 1.0).expect("build");
        osc.step(0.25);
        assert!(osc.displacement() < 1.0);
        osc.reset();
        assert_eq!(osc.elapsed(), 0.0);
        assert!((osc.displacement() - 1.0).abs() < 1e-12);
    }
}
