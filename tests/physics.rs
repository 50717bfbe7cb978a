use approx::assert_relative_eq;
use bevy::math::DVec2;

use kepler_sandbox::physics::{
    sample_conic_arc, Body, BodyId, BodyKind, PhysicsConfig, Simulation, TimeScale,
    TrajectoryKind,
};

const EARTH_MASS: f64 = 5.972e24;

/// Static Earth-mass parent at the origin plus a 1 kg probe at `r_m` meters
/// on +x moving along +y at `speed` m/s.
fn parent_and_probe(cfg: PhysicsConfig, r_m: f64, speed: f64) -> (Simulation, [BodyId; 2]) {
    let scale = cfg.meters_per_unit;
    let mut sim = Simulation::new(cfg);
    let parent = sim
        .register(Body::new("parent", BodyKind::Static, EARTH_MASS))
        .unwrap();
    let probe = sim
        .register(
            Body::new("probe", BodyKind::Orbiter, 1.0)
                .with_position(DVec2::new(r_m / scale, 0.0))
                .with_velocity(DVec2::new(0.0, speed / scale)),
        )
        .unwrap();
    (sim, [parent, probe])
}

fn mu(cfg: &PhysicsConfig) -> f64 {
    cfg.gravitational_constant * EARTH_MASS
}

/// Specific orbital energy and angular momentum of body `i` around body 0.
fn energy_and_momentum(sim: &Simulation, i: usize) -> (f64, f64) {
    let cfg = sim.config();
    let parent = &sim.bodies()[0];
    let body = &sim.bodies()[i];
    let r = (body.position - parent.position) * cfg.meters_per_unit;
    let v = (body.velocity - parent.velocity) * cfg.meters_per_unit;
    let energy = 0.5 * v.length_squared() - mu(cfg) / r.length();
    (energy, r.perp_dot(v))
}

// ==================================================================================
// Orbit elements
// ==================================================================================

#[test]
fn circular_orbit_has_zero_eccentricity() {
    let cfg = PhysicsConfig::default();
    let r0 = 6_921_000.0;
    let v = (mu(&cfg) / r0).sqrt();
    let (sim, [parent, probe]) = parent_and_probe(cfg, r0, v);

    let el = sim.orbit_elements(probe, Some(parent)).unwrap();
    assert!(el.eccentricity < 1e-9, "e = {}", el.eccentricity);
    assert_relative_eq!(el.semi_major_axis, r0, max_relative = 1e-9);
    assert_eq!(el.kind, TrajectoryKind::Elliptic);
    assert_relative_eq!(
        el.period().unwrap(),
        std::f64::consts::TAU * (r0.powi(3) / mu(sim.config())).sqrt(),
        max_relative = 1e-9
    );
}

#[test]
fn no_parent_means_no_elements() {
    let (sim, [_, probe]) = parent_and_probe(PhysicsConfig::default(), 7e6, 7_000.0);
    assert!(sim.orbit_elements(probe, None).is_none());
}

#[test]
fn fast_probe_is_hyperbolic() {
    let cfg = PhysicsConfig::default();
    let r0 = 7e6;
    let v = 1.5 * (2.0 * mu(&cfg) / r0).sqrt();
    let (sim, [_, probe]) = parent_and_probe(cfg, r0, v);

    let snap = sim.snapshot(probe);
    let el = snap.elements.unwrap();
    assert_eq!(el.kind, TrajectoryKind::Hyperbolic);
    assert!(el.eccentricity > 1.0);
    assert!(el.semi_major_axis < 0.0);
    assert!(el.apoapsis.is_infinite());
    assert_relative_eq!(el.periapsis, r0, max_relative = 1e-9);
    assert!(!sim.arc_points(&snap, 300).is_empty());
}

// ==================================================================================
// Conic arc sampling
// ==================================================================================

#[test]
fn hyperbolic_arc_stays_on_valid_branch() {
    let e = 2.0;
    let nu_max = (-1.0_f64 / e).acos();
    let samples = sample_conic_arc(e, 1.0e7, 0.4, 300);

    assert!(!samples.is_empty());
    for s in &samples {
        assert!(s.true_anomaly > -nu_max && s.true_anomaly < nu_max, "nu = {}", s.true_anomaly);
        assert!(s.radius >= 0.0);
    }
}

#[test]
fn arc_points_are_anchored_at_parent() {
    let cfg = PhysicsConfig::default();
    let r0 = 8e6;
    let v = (mu(&cfg) / r0).sqrt();
    let (sim, [parent, probe]) = parent_and_probe(cfg, r0, v);

    let snap = sim.snapshot(probe);
    assert_eq!(snap.parent, Some(parent));
    let points = sim.arc_points(&snap, 120);
    assert_eq!(points.len(), 120);

    let center = sim.body(parent).unwrap().position;
    let radius_units = r0 / sim.config().meters_per_unit;
    for p in points {
        assert_relative_eq!((p - center).length(), radius_units, max_relative = 1e-6);
    }
}

// ==================================================================================
// Influence resolver
// ==================================================================================

#[test]
fn lone_influential_body_has_no_parent() {
    let (sim, [parent, probe]) = parent_and_probe(PhysicsConfig::default(), 7e6, 7_000.0);

    assert_eq!(sim.influential_bodies(), &[parent]);
    assert_eq!(sim.resolve_influencer(parent), None);
    assert_eq!(sim.resolve_influencer(probe), Some(parent));
    assert_eq!(sim.snapshot(parent).elements, None);
}

#[test]
fn equal_pull_goes_to_first_registered() {
    let mut sim = Simulation::new(PhysicsConfig::default());
    let west = sim
        .register(Body::new("west", BodyKind::Static, 1e22).with_position(DVec2::new(-100.0, 0.0)))
        .unwrap();
    let east = sim
        .register(Body::new("east", BodyKind::Static, 1e22).with_position(DVec2::new(100.0, 0.0)))
        .unwrap();
    let probe = sim
        .register(Body::new("probe", BodyKind::Orbiter, 10.0))
        .unwrap();

    assert_eq!(sim.resolve_influencer(probe), Some(west));
    assert_eq!(sim.resolve_influencer(west), Some(east));
}

// ==================================================================================
// Integrator
// ==================================================================================

#[test]
fn static_body_ignores_force_bit_for_bit() {
    let mut sim = Simulation::new(PhysicsConfig::default());
    let anchor = sim
        .register(
            Body::new("anchor", BodyKind::Static, 1e20)
                .with_position(DVec2::new(3.25, -1.5))
                .with_velocity(DVec2::new(0.125, 0.0))
                .with_external_force(DVec2::new(1e6, -3e5)),
        )
        .unwrap();
    sim.register(Body::new("heavy", BodyKind::Orbiter, 1e24).with_position(DVec2::new(50.0, 0.0)))
        .unwrap();

    let before = sim.body(anchor).unwrap().clone();
    for _ in 0..1000 {
        sim.step(1.0 / 120.0).unwrap();
    }
    let after = sim.body(anchor).unwrap();

    assert_ne!(after.net_force(), DVec2::ZERO);
    assert_eq!(after.position.x.to_bits(), before.position.x.to_bits());
    assert_eq!(after.position.y.to_bits(), before.position.y.to_bits());
    assert_eq!(after.velocity.x.to_bits(), before.velocity.x.to_bits());
    assert_eq!(after.velocity.y.to_bits(), before.velocity.y.to_bits());
}

#[test]
fn forces_use_pre_step_positions() {
    // mirror-image pair: any interleaving would break the symmetry
    let mut sim = Simulation::new(PhysicsConfig::default());
    let a = sim
        .register(Body::new("a", BodyKind::Orbiter, 5e22).with_position(DVec2::new(-40.0, 3.0)))
        .unwrap();
    let b = sim
        .register(Body::new("b", BodyKind::Orbiter, 5e22).with_position(DVec2::new(40.0, -3.0)))
        .unwrap();

    for _ in 0..10 {
        sim.step(1.0 / 120.0).unwrap();
    }
    let (a, b) = (sim.body(a).unwrap(), sim.body(b).unwrap());
    assert_eq!(a.net_force(), -b.net_force());
    assert_eq!(a.velocity, -b.velocity);
    assert_eq!(a.position, -b.position);
}

/// Largest relative energy error over one orbit, plus the relative drift in
/// angular momentum at the end.
fn orbit_drift(dt: f64) -> (f64, f64) {
    let cfg = PhysicsConfig::default().with_max_substep(dt);
    let r0 = 7e6;
    let v = 1.2 * (mu(&cfg) / r0).sqrt();
    let (mut sim, _) = parent_and_probe(cfg, r0, v);
    let (e0, h0) = energy_and_momentum(&sim, 1);

    let steps = (14_000.0 / dt) as usize;
    let mut worst = 0.0_f64;
    for _ in 0..steps {
        sim.step(dt).unwrap();
        let (e, _) = energy_and_momentum(&sim, 1);
        worst = worst.max(((e - e0) / e0).abs());
    }
    let (_, h) = energy_and_momentum(&sim, 1);
    (worst, ((h - h0) / h0).abs())
}

#[test]
fn energy_drift_shrinks_with_substep() {
    let (coarse_e, coarse_h) = orbit_drift(4.0);
    let (fine_e, fine_h) = orbit_drift(1.0);

    assert!(fine_e < coarse_e, "fine {fine_e} vs coarse {coarse_e}");
    assert!(fine_e < 1e-2);
    assert!(coarse_h < 1e-9);
    assert!(fine_h < 1e-9);
}

// ==================================================================================
// Substepping
// ==================================================================================

#[test]
fn time_warp_becomes_more_substeps() {
    let (mut sim, [_, probe]) = parent_and_probe(PhysicsConfig::default(), 7e6, 7_546.0);
    assert_eq!(sim.config().max_substep, 1.0 / 120.0);

    let start = sim.body(probe).unwrap().position;
    let n = sim.advance(1.0, TimeScale::MAX);

    assert_eq!(n, 6_000_000);
    assert_relative_eq!(sim.elapsed(), 50_000.0);
    assert!(sim.body(probe).unwrap().position.is_finite());
    assert_ne!(sim.body(probe).unwrap().position, start);
}

#[test]
fn partial_frame_carries_remainder() {
    let (mut sim, _) = parent_and_probe(PhysicsConfig::default(), 7e6, 7_546.0);
    assert_eq!(sim.advance(0.033, TimeScale::REALTIME), 4);
    assert_eq!(sim.advance(0.01, TimeScale::try_from_factor(5.0).unwrap()), 6);
    assert_relative_eq!(sim.elapsed(), 0.083, epsilon = 1e-12);
}
