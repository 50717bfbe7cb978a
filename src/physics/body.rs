use bevy::math::DVec2;

/// Index of a body in its registry. Handles stay valid for the whole session
/// because the registry never shrinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BodyKind {
    /// Pinned in place; never integrated.
    Static,
    #[default]
    Orbiter,
    /// Free body driven by an external thrust actor.
    Player,
}

impl BodyKind {
    pub fn is_static(self) -> bool {
        matches!(self, BodyKind::Static)
    }
}

/// State of one simulated mass.
///
/// Position and velocity are in simulation units (see
/// [`PhysicsConfig::meters_per_unit`](super::PhysicsConfig)); mass and forces
/// are SI.
#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    /// Persistent force from an actor, re-applied every step until replaced.
    pub external_force: DVec2,
    pub(crate) net_force: DVec2,
    pub(crate) influential: bool,
}

impl Body {
    pub fn new(name: impl Into<String>, kind: BodyKind, mass: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass,
            external_force: DVec2::ZERO,
            net_force: DVec2::ZERO,
            influential: false,
        }
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_external_force(mut self, force: DVec2) -> Self {
        self.external_force = force;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    /// Set on registration from the configured mass threshold.
    pub fn is_influential(&self) -> bool {
        self.influential
    }

    /// Force accumulated during the last step.
    pub fn net_force(&self) -> DVec2 {
        self.net_force
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.external_force.is_finite()
    }
}
