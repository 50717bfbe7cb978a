//! Gravity sandbox core.
//!
//! - `physics`: body registry, gravity accumulation, fixed-substep integration,
//!   dominant-influencer resolution and osculating orbit elements.
//! - `scenario`: the Earth / ship / Moon setup.
//! - `thrust`: the ship's throttle and heading actor.
//!
//! Nothing in here touches rendering; the bevy shell in `main.rs` consumes
//! positions, resolved parents and orbit snapshots.

pub mod physics;
pub mod scenario;
pub mod thrust;
