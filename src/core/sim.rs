use crate::core::collision::{future_collision_time, in_contact, resolve};
use crate::core::event::PairEvent;
use crate::core::particle::Particle;
use crate::core::vector::Vector;
use crate::error::{Error, Result};
use tracing::{debug, info, trace};

/// A closed set of particles advanced from one collision to the next.
///
/// Particle order is fixed at construction; it determines pair enumeration
/// and therefore tie-breaking between simultaneous events.
#[derive(Debug, Clone)]
pub struct System {
    particles: Vec<Particle>,
}

/// Outcome of a single iteration of the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Every particle moved by `dt`; `resolved` lists the pairs collided afterwards.
    Advanced { dt: f64, resolved: Vec<(usize, usize)> },
    /// The next event falls at or beyond the horizon (or there is none).
    Finished,
}

/// Conservation bookkeeping for one [`System::simulate_for`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub initial_momentum: Vector,
    pub initial_kinetic_energy: f64,
    pub final_momentum: Vector,
    pub final_kinetic_energy: f64,
    /// Simulated time covered by the run, always below the requested end time
    /// unless no step was taken (then 0).
    pub elapsed: f64,
    /// Event-loop iterations (time jumps).
    pub events: u64,
    /// Pair resolutions performed across all events.
    pub collisions: u64,
}

impl SimulationReport {
    /// Magnitude of the change in total momentum.
    pub fn momentum_drift(&self) -> f64 {
        (self.final_momentum - self.initial_momentum).magnitude()
    }

    /// Signed change in total kinetic energy.
    pub fn energy_drift(&self) -> f64 {
        self.final_kinetic_energy - self.initial_kinetic_energy
    }
}

impl System {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Build a system from `(mass, position, velocity)` triples, validating each.
    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, Vector, Vector)>,
    {
        let particles = triples
            .into_iter()
            .map(|(mass, position, velocity)| Particle::new(mass, position, velocity))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(particles))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    pub fn total_momentum(&self) -> Vector {
        self.particles.iter().map(Particle::momentum).sum()
    }

    /// Mass-weighted position sum `Σ m·r` (not divided by the total mass).
    pub fn center_of_mass(&self) -> Vector {
        self.particles.iter().map(|p| p.position * p.mass()).sum()
    }

    /// All unordered index pairs `(i, j)` with `i < j`, in lexicographic order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.particles.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
    }

    pub fn pair_count(&self) -> usize {
        let n = self.particles.len();
        n * n.saturating_sub(1) / 2
    }

    /// Pairs whose centers are currently closer than the contact radius.
    pub fn contacts(&self) -> Vec<(usize, usize)> {
        self.pairs()
            .filter(|&(i, j)| in_contact(&self.particles[i], &self.particles[j]))
            .collect()
    }

    /// Earliest predicted collision across all pairs, lowest pair index on ties.
    pub fn next_collision(&self) -> Option<PairEvent> {
        self.pairs()
            .filter_map(|(i, j)| {
                let t = future_collision_time(&self.particles[i], &self.particles[j]);
                PairEvent::from_prediction(t, i, j)
            })
            .min()
    }

    /// Time to the next collision, `f64::INFINITY` if none is predicted.
    pub fn next_collision_dt(&self) -> f64 {
        self.next_collision().map_or(f64::INFINITY, |ev| ev.time_f64())
    }

    /// Drift every particle by `dt`.
    pub fn advance(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.advance(dt);
        }
    }

    /// Resolve the collision between particles `i` and `j`.
    pub fn resolve_pair(&mut self, i: usize, j: usize) -> Result<()> {
        let (p, q) = pair_mut(&mut self.particles, i, j)?;
        resolve(p, q).map_err(|e| e.for_pair(i, j))
    }

    /// One Running-state iteration at simulated time `now`.
    ///
    /// Finds the next collision; if `now + dt < end_time` every particle is
    /// advanced by `dt` and every pair found in contact is resolved.
    pub fn step(&mut self, now: f64, end_time: f64) -> Result<Step> {
        let dt = self.next_collision_dt();
        if !(now + dt < end_time) {
            return Ok(Step::Finished);
        }

        self.advance(dt);

        let resolved = self.contacts();
        for &(i, j) in &resolved {
            trace!(i, j, "contact");
            self.resolve_pair(i, j)?;
        }
        debug!(time = now + dt, dt, collisions = resolved.len(), "event");
        Ok(Step::Advanced { dt, resolved })
    }

    /// Run the event loop from `t = 0` until the next event would reach `end_time`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `end_time` is NaN or infinite.
    /// - `Error::Pair` if a resolution contract is broken mid-run.
    pub fn simulate_for(&mut self, end_time: f64) -> Result<SimulationReport> {
        if !end_time.is_finite() {
            return Err(Error::InvalidParam("end_time must be finite".into()));
        }

        let initial_momentum = self.total_momentum();
        let initial_kinetic_energy = self.total_kinetic_energy();

        let mut t = 0.0;
        let mut events = 0u64;
        let mut collisions = 0u64;
        while let Step::Advanced { dt, resolved } = self.step(t, end_time)? {
            t += dt;
            events += 1;
            collisions += resolved.len() as u64;
        }

        let report = SimulationReport {
            initial_momentum,
            initial_kinetic_energy,
            final_momentum: self.total_momentum(),
            final_kinetic_energy: self.total_kinetic_energy(),
            elapsed: t,
            events,
            collisions,
        };
        info!(
            elapsed = report.elapsed,
            events,
            collisions,
            "simulation finished"
        );
        Ok(report)
    }
}

/// Disjoint mutable borrows of `particles[i]` and `particles[j]`.
fn pair_mut(
    particles: &mut [Particle],
    i: usize,
    j: usize,
) -> Result<(&mut Particle, &mut Particle)> {
    let n = particles.len();
    if i == j || i >= n || j >= n {
        return Err(Error::InvalidParam(format!(
            "invalid pair ({i}, {j}) for {n} particles"
        )));
    }
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        Ok((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = particles.split_at_mut(i);
        Ok((&mut tail[0], &mut head[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z)
    }

    fn head_on() -> Result<System> {
        System::from_triples([
            (1.0, v(-3.0, 0.0, 0.0), v(1.0, 0.0, 0.0)),
            (1.0, v(3.0, 0.0, 0.0), v(-1.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn pairs_are_lexicographic_and_counted() -> Result<()> {
        let sys = System::from_triples(
            (0..4).map(|k| (1.0, v(k as f64 * 10.0, 0.0, 0.0), Vector::ZERO)),
        )?;
        let pairs: Vec<_> = sys.pairs().collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(sys.pair_count(), 6);
        assert_eq!(System::new(Vec::new()).pair_count(), 0);
        Ok(())
    }

    #[test]
    fn aggregates_reflect_current_state() -> Result<()> {
        let mut sys = System::from_triples([
            (1.0, v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)),
            (3.0, v(4.0, 0.0, 0.0), v(0.0, 2.0, 0.0)),
        ])?;
        assert_eq!(sys.total_momentum(), v(1.0, 6.0, 0.0));
        assert!((sys.total_kinetic_energy() - (0.5 + 6.0)).abs() < 1e-12);
        assert_eq!(sys.center_of_mass(), v(12.0, 0.0, 0.0));

        sys.advance(1.0);
        assert_eq!(sys.center_of_mass(), v(13.0, 6.0, 0.0));
        Ok(())
    }

    #[test]
    fn center_of_mass_is_unnormalized_weighted_sum() -> Result<()> {
        let sys = System::from_triples([
            (1.0, v(1.0, 0.0, 0.0), Vector::ZERO),
            (1.0, v(3.0, 0.0, 0.0), Vector::ZERO),
        ])?;
        assert_eq!(sys.center_of_mass(), v(4.0, 0.0, 0.0));
        assert_eq!(System::new(Vec::new()).center_of_mass(), Vector::ZERO);
        Ok(())
    }

    #[test]
    fn from_triples_rejects_bad_mass() {
        let err = System::from_triples([(-1.0, Vector::ZERO, Vector::ZERO)]).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn next_collision_picks_head_on_pair() -> Result<()> {
        let sys = head_on()?;
        let ev = sys.next_collision().expect("pair should collide");
        assert_eq!((ev.i, ev.j), (0, 1));
        assert_eq!(ev.time_f64(), 3.0);
        Ok(())
    }

    #[test]
    fn head_on_run_reflects_velocities_once() -> Result<()> {
        let mut sys = head_on()?;
        let report = sys.simulate_for(10.0)?;
        assert_eq!(report.elapsed, 3.0);
        assert_eq!(report.events, 1);
        assert_eq!(report.collisions, 1);
        assert_eq!(sys.particles()[0].velocity, v(-1.0, 0.0, 0.0));
        assert_eq!(sys.particles()[1].velocity, v(1.0, 0.0, 0.0));
        assert!(report.momentum_drift() < 1e-12);
        assert!(report.energy_drift().abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn horizon_before_first_event_applies_no_motion() -> Result<()> {
        let mut sys = head_on()?;
        let before = sys.particles().to_vec();
        let report = sys.simulate_for(3.0)?;
        assert_eq!(report.elapsed, 0.0);
        assert_eq!(report.events, 0);
        assert_eq!(sys.particles(), &before[..]);
        Ok(())
    }

    #[test]
    fn step_reports_finished_without_moving() -> Result<()> {
        let mut sys = System::from_triples([
            (1.0, v(-3.0, 0.0, 0.0), v(-1.0, 0.0, 0.0)),
            (1.0, v(3.0, 0.0, 0.0), v(1.0, 0.0, 0.0)),
        ])?;
        assert_eq!(sys.step(0.0, 100.0)?, Step::Finished);
        assert_eq!(sys.particles()[0].position, v(-3.0, 0.0, 0.0));
        Ok(())
    }

    #[test]
    fn non_finite_end_time_rejected() -> Result<()> {
        let mut sys = head_on()?;
        assert!(matches!(sys.simulate_for(f64::NAN), Err(Error::InvalidParam(_))));
        assert!(matches!(
            sys.simulate_for(f64::INFINITY),
            Err(Error::InvalidParam(_))
        ));
        Ok(())
    }

    #[test]
    fn resolve_pair_reports_indices() -> Result<()> {
        let mut sys = head_on()?;
        let err = sys.resolve_pair(0, 1).unwrap_err();
        assert!(matches!(err, Error::Pair { i: 0, j: 1, .. }));
        assert!(sys.resolve_pair(1, 1).is_err());
        assert!(sys.resolve_pair(0, 9).is_err());
        Ok(())
    }

    #[test]
    fn pair_mut_handles_both_orders() -> Result<()> {
        let mut ps = vec![
            Particle::new(1.0, Vector::ZERO, Vector::ZERO)?,
            Particle::new(2.0, Vector::ZERO, Vector::ZERO)?,
        ];
        let (a, b) = pair_mut(&mut ps, 1, 0)?;
        assert_eq!((a.mass(), b.mass()), (2.0, 1.0));
        Ok(())
    }
}
