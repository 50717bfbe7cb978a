//! Pairwise Newtonian force accumulation.
//!
//! A step runs `reset_forces` over every body, then `accumulate_forces`. The
//! accumulate phase reads positions only and buffers its results, so no body
//! sees another body's force before every force is final.

use bevy::math::DVec2;

use super::body::Body;
use super::config::PhysicsConfig;

/// Displacement from `from` to `to`, in meters.
pub fn displacement_m(from: &Body, to: &Body, meters_per_unit: f64) -> DVec2 {
    (to.position - from.position) * meters_per_unit
}

/// Newtonian magnitude `G·m1·m2 / d²` for a squared distance in meters.
pub fn force_magnitude(g: f64, m1: f64, m2: f64, dist_sq: f64) -> f64 {
    g * m1 * m2 / dist_sq
}

/// Force exerted on `a` by `b`, or `None` when the pair is closer than the
/// configured minimum separation.
pub fn pair_force(a: &Body, b: &Body, cfg: &PhysicsConfig) -> Option<DVec2> {
    let d = displacement_m(a, b, cfg.meters_per_unit);
    let dist_sq = d.length_squared();
    if dist_sq < cfg.min_separation_sq() {
        return None;
    }
    let f = force_magnitude(cfg.gravitational_constant, a.mass, b.mass, dist_sq);
    Some(d / dist_sq.sqrt() * f)
}

/// Phase 1: every body's net force starts from its external force.
pub fn reset_forces(bodies: &mut [Body]) {
    for b in bodies.iter_mut() {
        b.net_force = b.external_force;
    }
}

/// Gravitational force on each body from all others, by index. Pure read.
pub fn gravity_forces(bodies: &[Body], cfg: &PhysicsConfig) -> Vec<DVec2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, a)| {
            bodies
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, b)| pair_force(a, b, cfg))
                .fold(DVec2::ZERO, |acc, f| acc + f)
        })
        .collect()
}

/// Phase 2: adds gravity on top of the reset net forces.
pub fn accumulate_forces(bodies: &mut [Body], cfg: &PhysicsConfig) {
    let forces = gravity_forces(bodies, cfg);

    // write back
    for (b, f) in bodies.iter_mut().zip(forces) {
        b.net_force += f;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyKind;
    use approx::assert_relative_eq;

    fn pair(dist_units: f64) -> Vec<Body> {
        vec![
            Body::new("a", BodyKind::Orbiter, 2.0e20),
            Body::new("b", BodyKind::Orbiter, 3.0e10).with_position(DVec2::new(dist_units, 0.0)),
        ]
    }

    #[test]
    fn newton_magnitude_and_direction() {
        let cfg = PhysicsConfig::default();
        let mut bodies = pair(100.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &cfg);

        let d = 100.0 * cfg.meters_per_unit;
        let expected = cfg.gravitational_constant * 2.0e20 * 3.0e10 / (d * d);
        assert_relative_eq!(bodies[0].net_force.x, expected, max_relative = 1e-12);
        assert_relative_eq!(bodies[1].net_force.x, -expected, max_relative = 1e-12);
        assert_eq!(bodies[0].net_force.y, 0.0);
    }

    #[test]
    fn coincident_pair_is_skipped() {
        let cfg = PhysicsConfig::default();
        let mut bodies = pair(0.0);
        bodies[0].external_force = DVec2::new(5.0, -1.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &cfg);

        assert_eq!(bodies[0].net_force, DVec2::new(5.0, -1.0));
        assert_eq!(bodies[1].net_force, DVec2::ZERO);
    }

    #[test]
    fn separation_threshold_is_configurable() {
        // 10 km apart
        let wide = PhysicsConfig::default().with_min_separation(20_000.0);
        let mut bodies = pair(1.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &wide);
        assert_eq!(bodies[0].net_force, DVec2::ZERO);

        let tight = PhysicsConfig::default().with_min_separation(1.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &tight);
        assert!(bodies[0].net_force.x > 0.0);
    }

    #[test]
    fn reset_discards_previous_step() {
        let cfg = PhysicsConfig::default();
        let mut bodies = pair(10.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &cfg);
        assert_ne!(bodies[1].net_force, DVec2::ZERO);

        bodies[1].position = DVec2::new(0.0, 0.0);
        reset_forces(&mut bodies);
        accumulate_forces(&mut bodies, &cfg);
        assert_eq!(bodies[1].net_force, DVec2::ZERO);
    }
}
