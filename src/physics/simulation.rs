use bevy::log::warn;
use bevy::math::DVec2;

use super::body::{Body, BodyId};
use super::config::PhysicsConfig;
use super::error::{PhysicsError, PhysicsResult};
use super::gravity::{accumulate_forces, reset_forces};
use super::influence::resolve_influencer;
use super::integrator::{integrate, substeps};
use super::orbit::OrbitElements;
use super::registry::BodyRegistry;
use super::time_scale::TimeScale;

/// Per-frame presentation data for one body. Recomputed on request, never
/// stored as ground truth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSnapshot {
    pub parent: Option<BodyId>,
    pub elements: Option<OrbitElements>,
}

/// Owns every body and the constants they are simulated under.
#[derive(Debug, Default)]
pub struct Simulation {
    config: PhysicsConfig,
    registry: BodyRegistry,
    elapsed: f64,
}

impl Simulation {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            registry: BodyRegistry::new(),
            elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn register(&mut self, body: Body) -> PhysicsResult<BodyId> {
        self.registry
            .register(body, self.config.influence_mass_threshold)
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn bodies(&self) -> &[Body] {
        self.registry.all_bodies()
    }

    pub fn influential_bodies(&self) -> &[BodyId] {
        self.registry.influential_bodies()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.registry
            .ids()
            .find(|id| self.registry.get(*id).is_some_and(|b| b.name == name))
    }

    /// Replaces the persistent actor force on `id`. Takes effect at the next
    /// step's reset phase.
    pub fn set_external_force(&mut self, id: BodyId, force: DVec2) -> PhysicsResult<()> {
        let body = self
            .registry
            .get_mut(id)
            .ok_or(PhysicsError::UnknownBody(id))?;
        if !force.is_finite() {
            return Err(PhysicsError::NonFiniteState(body.name.clone()));
        }
        body.external_force = force;
        Ok(())
    }

    /// Simulated seconds advanced so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// One substep of `dt` seconds. Rejects anything above the configured
    /// maximum; use [`advance`](Self::advance) for longer intervals.
    pub fn step(&mut self, dt: f64) -> PhysicsResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidSubstep(dt));
        }
        if dt > self.config.max_substep {
            return Err(PhysicsError::SubstepTooLarge {
                dt,
                max: self.config.max_substep,
            });
        }
        self.substep(dt);
        self.elapsed += dt;
        Ok(())
    }

    /// Advances by `raw_dt * time_scale` seconds in substeps no longer than
    /// the configured maximum. Returns the number of substeps taken.
    pub fn advance(&mut self, raw_dt: f64, time_scale: TimeScale) -> usize {
        if !raw_dt.is_finite() || raw_dt <= 0.0 {
            if !raw_dt.is_finite() {
                warn!("ignoring non-finite frame delta {raw_dt}");
            }
            return 0;
        }
        let total = raw_dt * time_scale.factor();

        let mut count = 0;
        for dt in substeps(total, self.config.max_substep) {
            self.substep(dt);
            count += 1;
        }
        self.elapsed += total;
        count
    }

    // reset -> accumulate -> integrate, each over every body before the next
    fn substep(&mut self, dt: f64) {
        let cfg = &self.config;
        let bodies = self.registry.bodies_mut();
        reset_forces(bodies);
        accumulate_forces(bodies, cfg);
        integrate(bodies, dt, cfg.meters_per_unit);
    }

    pub fn resolve_influencer(&self, id: BodyId) -> Option<BodyId> {
        resolve_influencer(&self.registry, id, &self.config)
    }

    /// Osculating elements of `id` around `parent`; `None` without a parent.
    pub fn orbit_elements(&self, id: BodyId, parent: Option<BodyId>) -> Option<OrbitElements> {
        let body = self.registry.get(id)?;
        let parent = self.registry.get(parent?)?;
        OrbitElements::from_bodies(body, parent, &self.config)
    }

    pub fn snapshot(&self, id: BodyId) -> OrbitSnapshot {
        let parent = self.resolve_influencer(id);
        OrbitSnapshot {
            parent,
            elements: self.orbit_elements(id, parent),
        }
    }

    /// The current osculating conic of `id` as a polyline in simulation
    /// units, anchored at its parent's current position.
    pub fn arc_points(&self, snapshot: &OrbitSnapshot, sample_count: usize) -> Vec<DVec2> {
        let (Some(parent), Some(elements)) = (snapshot.parent, snapshot.elements) else {
            return Vec::new();
        };
        let Some(parent) = self.registry.get(parent) else {
            return Vec::new();
        };
        let scale = self.config.meters_per_unit;
        elements
            .sample_arc(sample_count)
            .into_iter()
            .map(|s| parent.position + s.offset / scale)
            .collect()
    }
}
