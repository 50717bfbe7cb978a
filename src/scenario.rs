//! Earth, a ship in low orbit and the Moon.

use bevy::log::info;
use bevy::math::DVec2;

use crate::physics::{Body, BodyId, BodyKind, PhysicsResult, Simulation};

pub const EARTH_MASS_KG: f64 = 5.972e24;
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

pub const MOON_MASS_KG: f64 = 7.34767309e22;
pub const MOON_RADIUS_KM: f64 = 1_737.4;
pub const MOON_DISTANCE_KM: f64 = 384_400.0;
pub const MOON_SPEED_MPS: f64 = 1_022.0;

pub const SHIP_MASS_KG: f64 = 1_000.0;
pub const SHIP_ALTITUDE_KM: f64 = 550.0;
/// Nominal hull radius, used for picking.
pub const SHIP_RADIUS_KM: f64 = 1.0;

/// Handles and surface radii of the bodies a scenario created, in
/// registration order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioBodies {
    pub earth: BodyId,
    pub ship: BodyId,
    pub moon: BodyId,
}

impl ScenarioBodies {
    /// Surface radius in meters, for altitude readouts.
    pub fn radius_m(&self, id: BodyId) -> f64 {
        let km = if id == self.earth {
            EARTH_RADIUS_KM
        } else if id == self.moon {
            MOON_RADIUS_KM
        } else {
            SHIP_RADIUS_KM
        };
        km * 1_000.0
    }
}

/// Circular orbital speed at `radius_m` around `mass_kg`, m/s.
pub fn circular_speed(g: f64, mass_kg: f64, radius_m: f64) -> f64 {
    (g * mass_kg / radius_m).sqrt()
}

/// Registers Earth (static, at `center`), the ship on a counter-clockwise
/// circular orbit 550 km up, and the Moon.
pub fn earth_moon(sim: &mut Simulation, center: DVec2) -> PhysicsResult<ScenarioBodies> {
    let cfg = sim.config().clone();
    let km = 1_000.0 / cfg.meters_per_unit;

    let earth = sim.register(
        Body::new("Earth", BodyKind::Static, EARTH_MASS_KG).with_position(center),
    )?;

    let ship_radius_m = (EARTH_RADIUS_KM + SHIP_ALTITUDE_KM) * 1_000.0;
    let ship_speed = circular_speed(cfg.gravitational_constant, EARTH_MASS_KG, ship_radius_m);
    let ship = sim.register(
        Body::new("Ship", BodyKind::Player, SHIP_MASS_KG)
            .with_position(center + DVec2::new(ship_radius_m / cfg.meters_per_unit, 0.0))
            .with_velocity(DVec2::new(0.0, ship_speed / cfg.meters_per_unit)),
    )?;

    let moon = sim.register(
        Body::new("Moon", BodyKind::Orbiter, MOON_MASS_KG)
            .with_position(center + DVec2::new(MOON_DISTANCE_KM * km, 0.0))
            .with_velocity(DVec2::new(0.0, MOON_SPEED_MPS / cfg.meters_per_unit)),
    )?;

    info!(
        "scenario ready: {} bodies, ship orbiting at {:.0} km ({:.1} m/s)",
        sim.bodies().len(),
        SHIP_ALTITUDE_KM,
        ship_speed
    );

    Ok(ScenarioBodies { earth, ship, moon })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsConfig;

    #[test]
    fn parents_resolve_as_expected() {
        let mut sim = Simulation::new(PhysicsConfig::default());
        let s = earth_moon(&mut sim, DVec2::ZERO).unwrap();

        assert_eq!(sim.influential_bodies(), &[s.earth, s.moon]);
        assert_eq!(sim.resolve_influencer(s.ship), Some(s.earth));
        assert_eq!(sim.resolve_influencer(s.moon), Some(s.earth));
        assert_eq!(sim.resolve_influencer(s.earth), Some(s.moon));
        assert_eq!(sim.find_by_name("Moon"), Some(s.moon));
    }

    #[test]
    fn ship_starts_nearly_circular() {
        let mut sim = Simulation::new(PhysicsConfig::default());
        let s = earth_moon(&mut sim, DVec2::new(50.0, -20.0)).unwrap();
        let snap = sim.snapshot(s.ship);
        let el = snap.elements.unwrap();

        assert!(el.eccentricity < 1e-9);
        let altitude_km = el.altitude(s.radius_m(s.earth)) / 1_000.0;
        assert!((altitude_km - SHIP_ALTITUDE_KM).abs() < 1e-6);
    }
}
