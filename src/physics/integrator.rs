//! Semi-implicit (symplectic) Euler.
//!
//! Velocity is kicked with this step's acceleration first, then position
//! drifts with the already-updated velocity.

use super::body::Body;

/// Phase 3: advances every non-static body by `dt` seconds.
///
/// Reads only each body's own net force and mass. Callers are responsible for
/// keeping `dt` at or below the configured maximum substep.
pub fn integrate(bodies: &mut [Body], dt: f64, meters_per_unit: f64) {
    for b in bodies.iter_mut().filter(|b| !b.is_static()) {
        // m/s^2 -> units/s^2
        let acc = b.net_force / b.mass / meters_per_unit;
        b.velocity += acc * dt;
        b.position += b.velocity * dt;
    }
}

/// Number of substeps needed to cover `total` seconds at `max_step` each.
///
/// Ratios within a relative 1e-9 of an integer are rounded to it so that
/// representation error in `max_step` never adds a sliver step.
pub fn substep_count(total: f64, max_step: f64) -> usize {
    if !(total > 0.0) || !(max_step > 0.0) {
        return 0;
    }
    let ratio = total / max_step;
    let nearest = ratio.round();
    let n = if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    (n as usize).max(1)
}

/// Splits `total` into `substep_count` steps: all full-size except the last,
/// which carries the remainder.
pub fn substeps(total: f64, max_step: f64) -> impl Iterator<Item = f64> {
    let n = substep_count(total, max_step);
    (0..n).map(move |i| {
        if i + 1 < n {
            max_step
        } else {
            (total - (n - 1) as f64 * max_step).clamp(0.0, max_step)
        }
    })
}
