//! Simulation engine: vectors, particles, pairwise collision rules and the event loop.

pub mod collision;
pub mod event;
pub mod particle;
pub mod sim;
pub mod vector;

pub use collision::{
    collide_after, collision_time, future_collision_time, in_contact, resolve, CONTACT_RADIUS,
};
pub use event::PairEvent;
pub use particle::{rebase, Particle};
pub use sim::{SimulationReport, Step, System};
pub use vector::Vector;
