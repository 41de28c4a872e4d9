//! Random initial conditions.

use crate::config::RunConfig;
use crate::core::{Particle, System, Vector};
use crate::error::Result;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Seeded RNG, or one seeded from the thread RNG when `seed` is `None`.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    }
}

/// `cfg.particles` particles of mass `cfg.mass` with positions
/// `Vector::random * spread` and velocities `Vector::random * speed`.
///
/// Overlapping starts are allowed; such pairs simply collide on the first event.
pub fn particles_in_box(cfg: &RunConfig) -> Result<System> {
    cfg.validate()?;
    let mut rng = make_rng(cfg.seed);
    let particles = (0..cfg.particles)
        .map(|_| {
            let position = Vector::random(&mut rng) * cfg.spread;
            let velocity = Vector::random(&mut rng) * cfg.speed;
            Particle::new(cfg.mass, position, velocity)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(System::new(particles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(particles: usize, seed: u64) -> RunConfig {
        RunConfig {
            particles,
            seed: Some(seed),
            ..RunConfig::default()
        }
    }

    #[test]
    fn same_seed_same_scene() -> Result<()> {
        let a = particles_in_box(&cfg(16, 99))?;
        let b = particles_in_box(&cfg(16, 99))?;
        assert_eq!(a.particles(), b.particles());
        Ok(())
    }

    #[test]
    fn scene_is_bounded() -> Result<()> {
        let c = cfg(100, 5);
        let sys = particles_in_box(&c)?;
        assert_eq!(sys.len(), 100);
        for p in sys.particles() {
            assert_eq!(p.mass(), c.mass);
            for x in [p.position.x, p.position.y, p.position.z] {
                assert!(x.abs() <= c.spread / 2.0);
            }
            for u in [p.velocity.x, p.velocity.y, p.velocity.z] {
                assert!(u.abs() <= c.speed / 2.0);
            }
        }
        Ok(())
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(particles_in_box(&cfg(0, 1)).is_err());
    }
}
