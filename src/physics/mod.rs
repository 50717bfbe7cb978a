//! Physics kernel split by phase.
//! - `registry`: authoritative body list and the influential subset.
//! - `gravity`: pairwise force accumulation (reset, then accumulate).
//! - `integrator`: semi-implicit Euler substeps.
//! - `influence`: dominant parent selection.
//! - `orbit`: state vector to osculating elements, conic arc sampling.
//! - `simulation`: the context object tying the phases together.

pub mod body;
pub mod config;
pub mod error;
pub mod gravity;
pub mod influence;
pub mod integrator;
pub mod orbit;
pub mod registry;
pub mod simulation;
pub mod time_scale;

pub use body::{Body, BodyId, BodyKind};
pub use config::PhysicsConfig;
pub use error::{PhysicsError, PhysicsResult};
pub use orbit::{sample_conic_arc, ArcSample, OrbitElements, TrajectoryKind};
pub use registry::BodyRegistry;
pub use simulation::{OrbitSnapshot, Simulation};
pub use time_scale::TimeScale;
