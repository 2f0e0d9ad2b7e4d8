//! The `mathboard_core` crate is the headless math engine behind the
//! Mathboard teaching widgets. Every module is a pure computation over
//! numeric or string inputs; rendering and form wiring live in the host.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `Simulation` (per-frame stepping).
//! - **Expression**: A custom bytecode VM for evaluating user-entered functions of x.
//! - **Analysis**: Cubic, quadratic, and rational-function analysis with serializable reports.
//! - **Autodiff**: Dual number implementation for exact derivatives and tangent lines.
//! - **Physics/Geometry**: Closed-form kinematics, collision outcomes, and solid tables.

pub mod arithmetic;
pub mod autodiff;
pub mod cubic;
pub mod expression;
pub mod geometry;
pub mod integration;
pub mod physics;
pub mod polynomial;
pub mod quadratic;
pub mod rational;
pub mod scene;
pub mod traits;
pub mod unit_circle;
