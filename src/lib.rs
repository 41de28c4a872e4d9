//! Event-driven simulator for point-mass particles colliding in 3D.
//!
//! Time advances in exact jumps to the next predicted pair collision; the
//! colliding pairs are resolved instantly and the loop repeats until the next
//! event would reach the requested horizon.
//!
//! - [`core`]: vectors, particles, collision rules, [`core::System`]
//! - [`scene`]: random initial conditions
//! - [`config`]: run configuration loaded from YAML

pub mod config;
pub mod core;
pub mod error;
pub mod scene;

pub use crate::core::{Particle, SimulationReport, System, Vector};
pub use crate::error::{Error, Result};
