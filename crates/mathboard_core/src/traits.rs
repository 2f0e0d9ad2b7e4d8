use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in expression evaluation.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A widget simulation advanced once per animation frame.
///
/// `step` must be safe to call repeatedly and from a re-entered frame
/// callback; `reset` restores the initial configuration. Stopping a
/// simulation is simply "stop calling step"; there is nothing to cancel.
pub trait Simulation {
    /// Advances the simulation state by `dt` seconds.
    fn step(&mut self, dt: f64);

    /// Restores position, velocity, and elapsed time to their initial values.
    fn reset(&mut self);

    /// Elapsed simulated time since the last reset.
    fn elapsed(&self) -> f64;
}
