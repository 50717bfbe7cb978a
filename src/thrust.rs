//! Throttle and heading model for the player ship.
//!
//! The controller turns held controls into a persistent external force. That
//! force stays on the body until the next frame overwrites it.

use bevy::math::DVec2;

pub const SHIP_MAX_THRUST_N: f64 = 10_000.0;
/// Throttle fraction gained or lost per second while held.
pub const THROTTLE_RATE: f64 = 0.5;
/// Radians per second.
pub const ROTATION_RATE: f64 = 1.5;

/// Controls held (or tapped) this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrustInput {
    pub throttle_up: bool,
    pub throttle_down: bool,
    pub cut: bool,
    pub full: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrustController {
    /// Heading, clockwise from +y.
    pub angle: f64,
    /// 0..=1
    pub throttle: f64,
    pub max_thrust: f64,
}

impl Default for ThrustController {
    fn default() -> Self {
        Self {
            angle: 0.0,
            throttle: 0.0,
            max_thrust: SHIP_MAX_THRUST_N,
        }
    }
}

impl ThrustController {
    /// Applies one frame of input. With controls disabled (time warp active)
    /// the engine is shut off and input is ignored.
    pub fn apply(&mut self, input: ThrustInput, dt: f64, controls_enabled: bool) {
        if !controls_enabled {
            self.throttle = 0.0;
            return;
        }

        if input.throttle_up {
            self.throttle = (self.throttle + THROTTLE_RATE * dt).min(1.0);
        }
        if input.throttle_down {
            self.throttle = (self.throttle - THROTTLE_RATE * dt).max(0.0);
        }
        if input.cut {
            self.throttle = 0.0;
        }
        if input.full {
            self.throttle = 1.0;
        }

        if input.rotate_left {
            self.angle -= ROTATION_RATE * dt;
        }
        if input.rotate_right {
            self.angle += ROTATION_RATE * dt;
        }
    }

    pub fn thrust(&self) -> f64 {
        self.throttle * self.max_thrust
    }

    pub fn heading(&self) -> DVec2 {
        let (sin, cos) = self.angle.sin_cos();
        DVec2::new(sin, cos)
    }

    /// Force along the heading, newtons.
    pub fn force(&self) -> DVec2 {
        self.heading() * self.thrust()
    }
}
