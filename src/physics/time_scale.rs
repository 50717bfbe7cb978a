use super::error::{PhysicsError, PhysicsResult};

/// Supported warp multipliers, slowest first.
pub const TIME_SCALE_STEPS: [f64; 10] = [
    1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1_000.0, 5_000.0, 10_000.0, 50_000.0,
];

/// Discrete time-warp setting: an index into [`TIME_SCALE_STEPS`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, PartialOrd, Ord)]
pub struct TimeScale(usize);

impl TimeScale {
    pub const REALTIME: TimeScale = TimeScale(0);
    pub const MAX: TimeScale = TimeScale(TIME_SCALE_STEPS.len() - 1);

    pub fn try_from_factor(factor: f64) -> PhysicsResult<Self> {
        TIME_SCALE_STEPS
            .iter()
            .position(|s| *s == factor)
            .map(TimeScale)
            .ok_or(PhysicsError::UnsupportedTimeScale(factor))
    }

    pub fn factor(self) -> f64 {
        TIME_SCALE_STEPS[self.0]
    }

    pub fn is_realtime(self) -> bool {
        self == Self::REALTIME
    }

    pub fn faster(self) -> Self {
        TimeScale((self.0 + 1).min(Self::MAX.0))
    }

    pub fn slower(self) -> Self {
        TimeScale(self.0.saturating_sub(1))
    }

    pub fn all() -> impl Iterator<Item = TimeScale> {
        (0..TIME_SCALE_STEPS.len()).map(TimeScale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_saturates() {
        assert_eq!(TimeScale::REALTIME.slower(), TimeScale::REALTIME);
        assert_eq!(TimeScale::MAX.faster(), TimeScale::MAX);
        assert_eq!(TimeScale::REALTIME.faster().factor(), 5.0);
        assert_eq!(TimeScale::MAX.factor(), 50_000.0);
    }

    #[test]
    fn factors_outside_the_set_are_rejected() {
        assert_eq!(TimeScale::try_from_factor(500.0).unwrap().factor(), 500.0);
        assert_eq!(
            TimeScale::try_from_factor(2.0),
            Err(PhysicsError::UnsupportedTimeScale(2.0))
        );
        assert_eq!(TimeScale::all().count(), TIME_SCALE_STEPS.len());
    }
}
