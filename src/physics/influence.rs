use super::body::BodyId;
use super::config::PhysicsConfig;
use super::gravity::{displacement_m, force_magnitude};
use super::registry::BodyRegistry;

/// The influential body pulling hardest on `target` right now.
///
/// Candidates replace the current best only on a strictly greater force, so
/// ties go to the earliest registered. `None` when no other influential body
/// exists. Never cached: callers ask again every frame.
pub fn resolve_influencer(
    registry: &BodyRegistry,
    target: BodyId,
    cfg: &PhysicsConfig,
) -> Option<BodyId> {
    let body = registry.get(target)?;
    let mut best: Option<(BodyId, f64)> = None;

    for &id in registry.influential_bodies() {
        if id == target {
            continue;
        }
        let Some(other) = registry.get(id) else {
            continue;
        };
        let dist_sq = displacement_m(body, other, cfg.meters_per_unit).length_squared();
        let force = force_magnitude(cfg.gravitational_constant, body.mass, other.mass, dist_sq);

        // NaN never wins
        let wins = match best {
            None => force > 0.0,
            Some((_, max)) => force > max,
        };
        if wins {
            best = Some((id, force));
        }
    }

    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::{Body, BodyKind};
    use bevy::math::DVec2;

    #[test]
    fn nearer_parent_wins_over_heavier_distant_one() {
        let cfg = PhysicsConfig::default();
        let mut reg = BodyRegistry::new();
        let far = reg
            .register(
                Body::new("far", BodyKind::Static, 1e24).with_position(DVec2::new(1e5, 0.0)),
                cfg.influence_mass_threshold,
            )
            .unwrap();
        let near = reg
            .register(
                Body::new("near", BodyKind::Orbiter, 1e22).with_position(DVec2::new(-10.0, 0.0)),
                cfg.influence_mass_threshold,
            )
            .unwrap();
        let probe = reg
            .register(Body::new("probe", BodyKind::Player, 1.0), cfg.influence_mass_threshold)
            .unwrap();

        assert_eq!(resolve_influencer(&reg, probe, &cfg), Some(near));
        assert_eq!(resolve_influencer(&reg, near, &cfg), Some(far));
    }

    #[test]
    fn unknown_target_resolves_to_none() {
        let reg = BodyRegistry::new();
        assert_eq!(
            resolve_influencer(&reg, BodyId(3), &PhysicsConfig::default()),
            None
        );
    }
}
