//! Error types for the physics core

use thiserror::Error;

use super::body::BodyId;

pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("body '{name}' has invalid mass {mass} (must be finite and positive)")]
    InvalidMass { name: String, mass: f64 },

    #[error("body '{0}' has a non-finite position, velocity or force")]
    NonFiniteState(String),

    #[error("unknown body handle {0:?}")]
    UnknownBody(BodyId),

    #[error("substep of {dt}s exceeds the configured maximum of {max}s")]
    SubstepTooLarge { dt: f64, max: f64 },

    #[error("invalid substep {0}s")]
    InvalidSubstep(f64),

    #[error("time scale {0}x is not one of the supported warp steps")]
    UnsupportedTimeScale(f64),
}
