//! Pairwise collision prediction and resolution.
//!
//! Both rules are deliberately restricted models:
//! - the predictor evaluates a single candidate instant, the time particle 1
//!   needs to cover its distance from the coordinate origin, and accepts it only
//!   if the pair is in contact at that instant;
//! - the resolver reflects each velocity through the common center-of-mass
//!   velocity, reversing the whole relative velocity rather than only its
//!   component along the line of centers.

use crate::core::particle::{rebase, Particle};
use crate::core::vector::Vector;
use crate::error::{Error, Result};

/// Distance below which two particle centers are in contact.
pub const CONTACT_RADIUS: f64 = 1.0;

#[inline]
pub fn in_contact(p1: &Particle, p2: &Particle) -> bool {
    p1.separation(p2) < CONTACT_RADIUS
}

fn pair_com(p1: &Particle, p2: &Particle) -> (Vector, Vector) {
    let total_mass = p1.mass() + p2.mass();
    let momentum = p1.momentum() + p2.momentum();
    let com = (p1.position * p1.mass() + p2.position * p2.mass()) * (1.0 / total_mass);
    (com, momentum * (1.0 / total_mass))
}

/// Candidate collision time for the pair, or `f64::INFINITY`.
///
/// The candidate is `|p1.position| / |p1.velocity|` in the lab frame. Both
/// particles are moved that far forward in their center-of-mass frame; the
/// candidate stands only if they are then closer than [`CONTACT_RADIUS`].
/// A stationary `p1` has no candidate.
pub fn collision_time(p1: &Particle, p2: &Particle) -> f64 {
    let (com, com_velocity) = pair_com(p1, p2);
    let mut p1_adj = rebase(com, com_velocity, p1);
    let mut p2_adj = rebase(com, com_velocity, p2);

    let speed = p1.velocity.magnitude();
    if speed == 0.0 {
        return f64::INFINITY;
    }
    let t = p1.position.magnitude() / speed;
    if !t.is_finite() {
        return f64::INFINITY;
    }

    p1_adj.advance(t);
    p2_adj.advance(t);
    if in_contact(&p1_adj, &p2_adj) {
        t
    } else {
        f64::INFINITY
    }
}

/// [`collision_time`] restricted to strictly future events: `t <= 0` becomes `+∞`.
pub fn future_collision_time(p1: &Particle, p2: &Particle) -> f64 {
    let t = collision_time(p1, p2);
    if t <= 0.0 {
        return f64::INFINITY;
    }
    t
}

/// Resolve a collision between two particles in contact.
///
/// With `v_com = (m1 v1 + m2 v2) / (m1 + m2)`, sets `v := 2 v_com - v` for both.
/// Total momentum is conserved for any masses. Positions are not touched.
///
/// Errors:
/// - `Error::NotColliding` if the pair is not within [`CONTACT_RADIUS`].
pub fn resolve(p1: &mut Particle, p2: &mut Particle) -> Result<()> {
    let separation = p1.separation(p2);
    if separation >= CONTACT_RADIUS || separation.is_nan() {
        return Err(Error::NotColliding { separation });
    }

    let (_, com_velocity) = pair_com(p1, p2);
    p1.velocity = (com_velocity - p1.velocity) + com_velocity;
    p2.velocity = (com_velocity - p2.velocity) + com_velocity;
    Ok(())
}

/// Advance both particles by `dt` (when nonzero), then [`resolve`].
pub fn collide_after(p1: &mut Particle, p2: &mut Particle, dt: f64) -> Result<()> {
    if dt != 0.0 {
        p1.advance(dt);
        p2.advance(dt);
    }
    resolve(p1, p2)
}
