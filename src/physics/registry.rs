use bevy::log::debug;

use super::body::{Body, BodyId};
use super::error::{PhysicsError, PhysicsResult};

/// Ordered collection of bodies plus the subset heavy enough to act as a
/// parent. Registration order is the influence tie-break.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    influential: Vec<BodyId>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `body`, classifying it against `influence_threshold`.
    pub fn register(&mut self, mut body: Body, influence_threshold: f64) -> PhysicsResult<BodyId> {
        if !(body.mass.is_finite() && body.mass > 0.0) {
            return Err(PhysicsError::InvalidMass {
                name: body.name,
                mass: body.mass,
            });
        }
        if !body.is_finite() {
            return Err(PhysicsError::NonFiniteState(body.name));
        }

        let id = BodyId(self.bodies.len());
        body.influential = body.mass > influence_threshold;
        body.net_force = body.external_force;
        if body.influential {
            self.influential.push(id);
        }
        debug!(
            "registered {} as {:?} (mass {:.3e} kg, influential: {})",
            body.name, id, body.mass, body.influential
        );
        self.bodies.push(body);
        Ok(id)
    }

    pub fn all_bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn influential_bodies(&self) -> &[BodyId] {
        &self.influential
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}
