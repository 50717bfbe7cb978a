//! Osculating two-body elements from a relative state vector, and sampling of
//! the resulting conic for display.
//!
//! All quantities here are SI (meters, m/s). Only the parent's mass enters
//! `mu`, matching the single-dominant-body force law used by the resolver.

use std::f64::consts::TAU;

use bevy::math::DVec2;

use super::body::Body;
use super::config::PhysicsConfig;

/// `|2/r - v²/mu|·r` below this is treated as zero specific energy.
pub const PARABOLIC_TOLERANCE: f64 = 1e-12;

/// Conic denominators `1 + e·cos ν` closer to zero than this are skipped.
pub const ARC_DENOMINATOR_EPSILON: f64 = 1e-6;

/// Samples per rendered arc.
pub const DEFAULT_ARC_SAMPLES: usize = 300;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrajectoryKind {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitElements {
    /// Semi-major axis; negative when hyperbolic, `+∞` when parabolic.
    pub semi_major_axis: f64,
    pub apoapsis: f64,
    pub periapsis: f64,
    pub eccentricity: f64,
    pub eccentricity_vector: DVec2,
    /// Semi-latus rectum.
    pub semi_latus_rectum: f64,
    pub mu: f64,
    /// Specific angular momentum (z component).
    pub angular_momentum: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
    pub distance: f64,
    pub speed: f64,
    pub relative_position: DVec2,
    pub relative_velocity: DVec2,
    pub kind: TrajectoryKind,
}

impl OrbitElements {
    /// Elements of `body` relative to `parent`, or `None` when the relative
    /// distance is zero or the state is not finite.
    pub fn from_bodies(body: &Body, parent: &Body, cfg: &PhysicsConfig) -> Option<Self> {
        let r = (body.position - parent.position) * cfg.meters_per_unit;
        let v = (body.velocity - parent.velocity) * cfg.meters_per_unit;
        Self::from_state(r, v, cfg.gravitational_constant * parent.mass)
    }

    /// Elements for a relative position `r_vec` (m) and velocity `v_vec`
    /// (m/s) around a parent with gravitational parameter `mu`.
    pub fn from_state(r_vec: DVec2, v_vec: DVec2, mu: f64) -> Option<Self> {
        let r = r_vec.length();
        let v = v_vec.length();
        if !(r > 0.0) || !r.is_finite() || !v.is_finite() || !(mu > 0.0) || !mu.is_finite() {
            return None;
        }

        let h = r_vec.perp_dot(v_vec);
        let rv = r_vec.dot(v_vec);
        let radial = v * v - mu / r;
        let e_vec = (r_vec * radial - v_vec * rv) / mu;
        let e = e_vec.length();

        let inv_a = 2.0 / r - v * v / mu;
        let parabolic = (inv_a * r).abs() < PARABOLIC_TOLERANCE;
        let p = h * h / mu;

        let omega = e_vec.y.atan2(e_vec.x);
        let nu = (r_vec.x * e_vec.y - r_vec.y * e_vec.x).atan2(r_vec.x * e_vec.x + r_vec.y * e_vec.y);

        let (kind, a, apoapsis, periapsis) = if parabolic {
            (TrajectoryKind::Parabolic, f64::INFINITY, f64::INFINITY, p / (1.0 + e))
        } else {
            let a = 1.0 / inv_a;
            if e < 1.0 {
                (TrajectoryKind::Elliptic, a, a * (1.0 + e), a * (1.0 - e))
            } else {
                (TrajectoryKind::Hyperbolic, a, f64::INFINITY, a * (1.0 - e))
            }
        };

        Some(Self {
            semi_major_axis: a,
            apoapsis,
            periapsis,
            eccentricity: e,
            eccentricity_vector: e_vec,
            semi_latus_rectum: p,
            mu,
            angular_momentum: h,
            argument_of_periapsis: omega,
            true_anomaly: nu,
            distance: r,
            speed: v,
            relative_position: r_vec,
            relative_velocity: v_vec,
            kind,
        })
    }

    pub fn is_bound(&self) -> bool {
        self.kind == TrajectoryKind::Elliptic
    }

    /// Orbital period in seconds; only closed orbits have one.
    pub fn period(&self) -> Option<f64> {
        self.is_bound()
            .then(|| TAU * (self.semi_major_axis.powi(3) / self.mu).sqrt())
    }

    /// Height above a parent surface of radius `parent_radius_m`.
    pub fn altitude(&self, parent_radius_m: f64) -> f64 {
        self.distance - parent_radius_m
    }

    pub fn sample_arc(&self, sample_count: usize) -> Vec<ArcSample> {
        sample_conic_arc(
            self.eccentricity,
            self.semi_latus_rectum,
            self.argument_of_periapsis,
            sample_count,
        )
    }
}

/// One point on a sampled conic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSample {
    pub true_anomaly: f64,
    /// Distance from the parent, meters.
    pub radius: f64,
    /// Position relative to the parent, meters.
    pub offset: DVec2,
}

/// Samples the conic `r = p / (1 + e·cos ν)` rotated by `omega`.
///
/// Closed orbits cover `[0, 2π)`; open ones only the physical branch
/// `[-ν_max, ν_max]` with `ν_max = acos(-1/e)`. Samples whose denominator is
/// near zero or whose radius is negative are dropped individually.
pub fn sample_conic_arc(e: f64, p: f64, omega: f64, sample_count: usize) -> Vec<ArcSample> {
    if sample_count == 0 || !e.is_finite() || !p.is_finite() || !omega.is_finite() || p <= 0.0 {
        return Vec::new();
    }

    let (start, span, divisions) = if e < 1.0 {
        (0.0, TAU, sample_count as f64)
    } else {
        let nu_max = (-1.0 / e).acos();
        (-nu_max, 2.0 * nu_max, (sample_count.max(2) - 1) as f64)
    };

    (0..sample_count)
        .filter_map(|i| {
            let nu = start + span * (i as f64 / divisions);
            let denom = 1.0 + e * nu.cos();
            if denom.abs() < ARC_DENOMINATOR_EPSILON {
                return None;
            }
            let radius = p / denom;
            if radius < 0.0 || !radius.is_finite() {
                return None;
            }
            let (sin, cos) = (omega + nu).sin_cos();
            Some(ArcSample {
                true_anomaly: nu,
                radius,
                offset: DVec2::new(cos, sin) * radius,
            })
        })
        .collect()
}
