use crate::traits::Simulation;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const STANDARD_GRAVITY: f64 = 9.8;

/// Restitution used when the collision panel selects "inelastic" without a
/// slider value.
pub const DEFAULT_RESTITUTION: f64 = 0.5;

// --- Projectile ---

/// Ballistic arc launched from the origin. Positions come from the exact
/// closed form, never from stepping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub speed: f64,
    pub angle_deg: f64,
    pub gravity: f64,
    time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileReport {
    pub max_height: f64,
    pub range: f64,
    pub flight_time: f64,
}

impl Projectile {
    pub fn new(speed: f64, angle_deg: f64, gravity: f64) -> Result<Self> {
        ensure!(speed >= 0.0, "launch speed must be non-negative");
        ensure!(gravity > 0.0, "gravity must be positive");
        Ok(Self {
            speed,
            angle_deg,
            gravity,
            time: 0.0,
        })
    }

    fn vx(&self) -> f64 {
        self.speed * self.angle_deg.to_radians().cos()
    }

    fn vy(&self) -> f64 {
        self.speed * self.angle_deg.to_radians().sin()
    }

    /// v²sin²θ / 2g
    pub fn max_height(&self) -> f64 {
        let vy = self.vy();
        vy * vy / (2.0 * self.gravity)
    }

    /// v²sin(2θ) / g
    pub fn range(&self) -> f64 {
        self.speed * self.speed * (2.0 * self.angle_deg.to_radians()).sin() / self.gravity
    }

    /// 2v sinθ / g
    pub fn flight_time(&self) -> f64 {
        2.0 * self.vy() / self.gravity
    }

    pub fn position(&self, t: f64) -> (f64, f64) {
        (
            self.vx() * t,
            self.vy() * t - 0.5 * self.gravity * t * t,
        )
    }

    pub fn current_position(&self) -> (f64, f64) {
        self.position(self.time)
    }

    pub fn landed(&self) -> bool {
        self.time >= self.flight_time()
    }

    pub fn analyze(&self) -> ProjectileReport {
        ProjectileReport {
            max_height: self.max_height(),
            range: self.range(),
            flight_time: self.flight_time(),
        }
    }
}

impl Simulation for Projectile {
    /// Advances the clock; position stays on the exact arc, and time clamps
    /// at touchdown so the marker rests at the landing point.
    fn step(&mut self, dt: f64) {
        self.time = (self.time + dt).min(self.flight_time());
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn elapsed(&self) -> f64 {
        self.time
    }
}

// --- Simple harmonic motion ---

/// Spring-mass or pendulum oscillator reduced to its angular frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Oscillator {
    pub omega: f64,
    pub amplitude: f64,
    time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorReport {
    pub omega: f64,
    pub period: f64,
    pub frequency: f64,
    pub amplitude: f64,
}

impl Oscillator {
    /// ω = √(k/m)
    pub fn spring(stiffness: f64, mass: f64, amplitude: f64) -> Result<Self> {
        ensure!(stiffness > 0.0, "spring constant must be positive");
        ensure!(mass > 0.0, "mass must be positive");
        Ok(Self {
            omega: (stiffness / mass).sqrt(),
            amplitude,
            time: 0.0,
        })
    }

    /// ω = √(g/L), the small-angle pendulum.
    pub fn pendulum(length: f64, gravity: f64, amplitude: f64) -> Result<Self> {
        ensure!(length > 0.0, "pendulum length must be positive");
        ensure!(gravity > 0.0, "gravity must be positive");
        Ok(Self {
            omega: (gravity / length).sqrt(),
            amplitude,
            time: 0.0,
        })
    }

    pub fn period(&self) -> f64 {
        2.0 * PI / self.omega
    }

    pub fn frequency(&self) -> f64 {
        self.omega / (2.0 * PI)
    }

    /// x(t) = A cos(ωt); released from rest at the amplitude.
    pub fn displacement(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t).cos()
    }

    pub fn velocity(&self, t: f64) -> f64 {
        -self.amplitude * self.omega * (self.omega * t).sin()
    }

    pub fn acceleration(&self, t: f64) -> f64 {
        -self.amplitude * self.omega * self.omega * (self.omega * t).cos()
    }

    pub fn current_displacement(&self) -> f64 {
        self.displacement(self.time)
    }

    pub fn analyze(&self) -> OscillatorReport {
        OscillatorReport {
            omega: self.omega,
            period: self.period(),
            frequency: self.frequency(),
            amplitude: self.amplitude,
        }
    }
}

impl Simulation for Oscillator {
    fn step(&mut self, dt: f64) {
        self.time += dt;
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn elapsed(&self) -> f64 {
        self.time
    }
}

// --- Collisions ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CollisionKind {
    Elastic,
    Inelastic { restitution: f64 },
    PerfectlyInelastic,
}

/// Head-on collision of two point masses on a line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collision {
    pub m1: f64,
    pub u1: f64,
    pub m2: f64,
    pub u2: f64,
    pub kind: CollisionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionOutcome {
    pub v1: f64,
    pub v2: f64,
    pub momentum_before: f64,
    pub momentum_after: f64,
    pub kinetic_energy_before: f64,
    pub kinetic_energy_after: f64,
}

impl Collision {
    pub fn new(m1: f64, u1: f64, m2: f64, u2: f64, kind: CollisionKind) -> Result<Self> {
        ensure!(m1 > 0.0 && m2 > 0.0, "masses must be positive");
        if let CollisionKind::Inelastic { restitution } = kind {
            ensure!(
                (0.0..=1.0).contains(&restitution),
                "restitution must be in [0, 1]"
            );
        }
        Ok(Self { m1, u1, m2, u2, kind })
    }

    pub fn outcome(&self) -> CollisionOutcome {
        let (m1, u1, m2, u2) = (self.m1, self.u1, self.m2, self.u2);
        let total = m1 + m2;
        let momentum = m1 * u1 + m2 * u2;

        let (v1, v2) = match self.kind {
            CollisionKind::Elastic => (
                ((m1 - m2) * u1 + 2.0 * m2 * u2) / total,
                ((m2 - m1) * u2 + 2.0 * m1 * u1) / total,
            ),
            CollisionKind::PerfectlyInelastic => {
                let v = momentum / total;
                (v, v)
            }
            CollisionKind::Inelastic { restitution: e } => (
                (momentum + m2 * e * (u2 - u1)) / total,
                (momentum + m1 * e * (u1 - u2)) / total,
            ),
        };

        CollisionOutcome {
            v1,
            v2,
            momentum_before: momentum,
            momentum_after: m1 * v1 + m2 * v2,
            kinetic_energy_before: 0.5 * m1 * u1 * u1 + 0.5 * m2 * u2 * u2,
            kinetic_energy_after: 0.5 * m1 * v1 * v1 + 0.5 * m2 * v2 * v2,
        }
    }
}

/// Two blocks approaching on a track; velocities switch to the collision
/// outcome the first frame they meet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionSim {
    collision: Collision,
    start_x1: f64,
    start_x2: f64,
    pub x1: f64,
    pub x2: f64,
    pub v1: f64,
    pub v2: f64,
    collided: bool,
    time: f64,
}

impl CollisionSim {
    pub fn new(collision: Collision, x1: f64, x2: f64) -> Result<Self> {
        ensure!(x1 < x2, "left body must start left of the right body");
        Ok(Self {
            collision,
            start_x1: x1,
            start_x2: x2,
            x1,
            x2,
            v1: collision.u1,
            v2: collision.u2,
            collided: false,
            time: 0.0,
        })
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    pub fn outcome(&self) -> CollisionOutcome {
        self.collision.outcome()
    }
}

impl Simulation for CollisionSim {
    fn step(&mut self, dt: f64) {
        self.x1 += self.v1 * dt;
        self.x2 += self.v2 * dt;
        self.time += dt;

        if !self.collided && self.x1 >= self.x2 {
            let outcome = self.collision.outcome();
            self.v1 = outcome.v1;
            self.v2 = outcome.v2;
            self.x1 = self.x2;
            self.collided = true;
        }
    }

    fn reset(&mut self) {
        self.x1 = self.start_x1;
        self.x2 = self.start_x2;
        self.v1 = self.collision.u1;
        self.v2 = self.collision.u2;
        self.collided = false;
        self.time = 0.0;
    }

    fn elapsed(&self) -> f64 {
        self.time
    }
}

// --- Uniform circular motion ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularMotion {
    pub mass: f64,
    pub radius: f64,
    pub omega: f64,
    time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularReport {
    pub tangential_speed: f64,
    pub centripetal_acceleration: f64,
    pub centripetal_force: f64,
    pub period: f64,
    pub frequency: f64,
}

impl CircularMotion {
    pub fn new(mass: f64, radius: f64, omega: f64) -> Result<Self> {
        ensure!(mass > 0.0, "mass must be positive");
        ensure!(radius > 0.0, "radius must be positive");
        ensure!(omega > 0.0, "angular velocity must be positive");
        Ok(Self {
            mass,
            radius,
            omega,
            time: 0.0,
        })
    }

    pub fn angle(&self, t: f64) -> f64 {
        (self.omega * t).rem_euclid(2.0 * PI)
    }

    pub fn position(&self, t: f64) -> (f64, f64) {
        let theta = self.omega * t;
        (self.radius * theta.cos(), self.radius * theta.sin())
    }

    pub fn current_position(&self) -> (f64, f64) {
        self.position(self.time)
    }

    pub fn analyze(&self) -> CircularReport {
        let accel = self.omega * self.omega * self.radius;
        CircularReport {
            tangential_speed: self.omega * self.radius,
            centripetal_acceleration: accel,
            centripetal_force: self.mass * accel,
            period: 2.0 * PI / self.omega,
            frequency: self.omega / (2.0 * PI),
        }
    }
}

impl Simulation for CircularMotion {
    fn step(&mut self, dt: f64) {
        self.time += dt;
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn elapsed(&self) -> f64 {
        self.time
    }
}

// --- Forces on an inclined surface ---

/// Block on an inclined surface under an applied force and friction,
/// advanced by semi-implicit Euler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidingBlock {
    pub mass: f64,
    pub applied_force: f64,
    pub friction_coeff: f64,
    pub surface_angle_deg: f64,
    pub gravity: f64,
    pub position: f64,
    pub velocity: f64,
    time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceReport {
    pub weight: f64,
    pub normal_force: f64,
    pub friction_force: f64,
    pub net_force: f64,
    pub acceleration: f64,
}

impl SlidingBlock {
    pub fn new(
        mass: f64,
        applied_force: f64,
        friction_coeff: f64,
        surface_angle_deg: f64,
        gravity: f64,
    ) -> Result<Self> {
        ensure!(mass > 0.0, "mass must be positive");
        ensure!(friction_coeff >= 0.0, "friction coefficient must be non-negative");
        ensure!(gravity > 0.0, "gravity must be positive");
        Ok(Self {
            mass,
            applied_force,
            friction_coeff,
            surface_angle_deg,
            gravity,
            position: 0.0,
            velocity: 0.0,
            time: 0.0,
        })
    }

    /// Force balance along the incline. At rest under the static limit the
    /// block stays put; otherwise kinetic friction opposes the motion (or
    /// the impending motion).
    pub fn forces(&self) -> ForceReport {
        let angle = self.surface_angle_deg.to_radians();
        let weight = self.mass * self.gravity;
        let normal_force = weight * angle.cos();
        let max_static = self.friction_coeff * normal_force;
        let net_applied = self.applied_force - weight * angle.sin();

        if net_applied.abs() <= max_static && self.velocity == 0.0 {
            ForceReport {
                weight,
                normal_force,
                friction_force: -net_applied,
                net_force: 0.0,
                acceleration: 0.0,
            }
        } else {
            let direction = if self.velocity != 0.0 {
                self.velocity.signum()
            } else {
                net_applied.signum()
            };
            let friction_force = -direction * max_static;
            let net_force = net_applied + friction_force;
            ForceReport {
                weight,
                normal_force,
                friction_force,
                net_force,
                acceleration: net_force / self.mass,
            }
        }
    }
}

impl Simulation for SlidingBlock {
    fn step(&mut self, dt: f64) {
        let accel = self.forces().acceleration;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.time += dt;
    }

    fn reset(&mut self) {
        self.position = 0.0;
        self.velocity = 0.0;
        self.time = 0.0;
    }

    fn elapsed(&self) -> f64 {
        self.time
    }
}
