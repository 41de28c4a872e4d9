use crate::core::vector::Vector;
use crate::error::{Error, Result};
use std::fmt;

/// A point-mass particle moving under inertia.
///
/// Fields:
/// - `mass`: fixed for the particle's lifetime (> 0)
/// - `position`: moved only by [`Particle::advance`]
/// - `velocity`: rewritten only by collision resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    mass: f64,
    /// Position (x, y, z).
    pub position: Vector,
    /// Velocity (vx, vy, vz).
    pub velocity: Vector,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` is non-positive or any component is NaN/inf.
    pub fn new(mass: f64, position: Vector, velocity: Vector) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            mass,
            position,
            velocity,
        })
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Linear drift: `position += velocity * dt`. Negative `dt` rewinds.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Distance between the two particle centers.
    #[inline]
    pub fn separation(&self, other: &Particle) -> f64 {
        (self.position - other.position).magnitude()
    }
}

/// The state of `p` as seen from a frame located at `origin_position` and
/// moving with `origin_velocity`. `p` itself is left untouched.
pub fn rebase(origin_position: Vector, origin_velocity: Vector, p: &Particle) -> Particle {
    Particle {
        mass: p.mass,
        position: p.position - origin_position,
        velocity: p.velocity - origin_velocity,
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Particle m={} @{} v={}",
            self.mass, self.position, self.velocity
        )
    }
}
