//! Run configuration.
//!
//! Every field has a default, so a YAML file only needs the values it changes:
//!
//! ```yaml
//! particles: 250   # number of particles
//! mass: 1.0        # mass of every particle
//! spread: 2.0      # positions are uniform in [-spread/2, spread/2)^3
//! speed: 1.0       # velocities are uniform in [-speed/2, speed/2)^3
//! end_time: 1000.0 # simulation horizon
//! seed: 42         # omit for a nondeterministic run
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub particles: usize,
    pub mass: f64,
    pub spread: f64,
    pub speed: f64,
    pub end_time: f64,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            particles: 250,
            mass: 1.0,
            spread: 2.0,
            speed: 1.0,
            end_time: 1000.0,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: RunConfig = serde_yaml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particles == 0 {
            return Err(Error::InvalidParam("particles must be > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(Error::InvalidParam("spread must be finite and > 0".into()));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(Error::InvalidParam("speed must be finite and >= 0".into()));
        }
        if !self.end_time.is_finite() || self.end_time <= 0.0 {
            return Err(Error::InvalidParam("end_time must be finite and > 0".into()));
        }
        Ok(())
    }
}
