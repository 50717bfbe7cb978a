/// Newtonian constant of gravitation, m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// Physical length of one simulation unit, in meters (10 km).
pub const METERS_PER_UNIT: f64 = 10_000.0;

/// Largest substep the integrator accepts, in seconds.
pub const MAX_SUBSTEP: f64 = 1.0 / 120.0;

/// Bodies heavier than this are candidate parents.
pub const INFLUENCE_MASS_THRESHOLD: f64 = 1e15;

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    /// Simulation units to meters.
    pub meters_per_unit: f64,
    /// Pairs closer than this (meters) contribute no force.
    pub min_separation_m: f64,
    pub max_substep: f64,
    pub influence_mass_threshold: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            meters_per_unit: METERS_PER_UNIT,
            min_separation_m: METERS_PER_UNIT,
            max_substep: MAX_SUBSTEP,
            influence_mass_threshold: INFLUENCE_MASS_THRESHOLD,
        }
    }
}

impl PhysicsConfig {
    /// Rescales the length constant. The degenerate-pair threshold follows it
    /// so it stays one simulation unit wide.
    pub fn with_length_scale(mut self, meters_per_unit: f64) -> Self {
        self.meters_per_unit = meters_per_unit;
        self.min_separation_m = meters_per_unit;
        self
    }

    pub fn with_max_substep(mut self, max_substep: f64) -> Self {
        self.max_substep = max_substep;
        self
    }

    pub fn with_min_separation(mut self, meters: f64) -> Self {
        self.min_separation_m = meters;
        self
    }

    pub fn min_separation_sq(&self) -> f64 {
        self.min_separation_m * self.min_separation_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_scale_moves_separation_threshold() {
        let cfg = PhysicsConfig::default().with_length_scale(1_000.0);
        assert_eq!(cfg.meters_per_unit, 1_000.0);
        assert_eq!(cfg.min_separation_sq(), 1_000_000.0);
    }
}
