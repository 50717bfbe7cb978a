use bevy::math::DVec2;
use bevy::prelude::*;
use rand::Rng;

use kepler_sandbox::physics::orbit::DEFAULT_ARC_SAMPLES;
use kepler_sandbox::physics::{
    BodyId, BodyKind, OrbitSnapshot, PhysicsConfig, Simulation, TimeScale, TrajectoryKind,
};
use kepler_sandbox::scenario::{self, ScenarioBodies};
use kepler_sandbox::thrust::{ThrustController, ThrustInput};

use crate::MainCamera;

/// Input systems that must finish before the frame's physics runs.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlSet;

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimSettings>()
            .init_resource::<SimStats>()
            .init_resource::<Selection>()
            .init_resource::<ShipControls>()
            .add_event::<ResetEvent>()
            .add_systems(Startup, spawn_scenario)
            .add_systems(
                Update,
                (
                    handle_reset,
                    apply_thrust,
                    step_simulation,
                    sync_transforms,
                    refresh_orbits,
                    draw_orbit_paths,
                    draw_ship_flame,
                )
                    .chain()
                    .after(ControlSet),
            );
    }
}

#[derive(Event, Default)]
pub struct ResetEvent;

#[derive(Resource, Clone)]
pub struct SimSettings {
    pub running: bool,
    pub time_scale: TimeScale,
    /// Longest wall-clock frame fed to the integrator, seconds.
    pub max_frame_dt: f32,
    pub show_paths: bool,
    pub arc_samples: usize,
    pub follow_target: bool,
    pub show_help: bool,
}
impl Default for SimSettings {
    fn default() -> Self {
        Self {
            running: true,
            time_scale: TimeScale::REALTIME,
            max_frame_dt: 0.033,
            show_paths: true,
            arc_samples: DEFAULT_ARC_SAMPLES,
            follow_target: true,
            show_help: true,
        }
    }
}

/// Substeps taken last frame.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct SimStats(pub usize);

/// The whole physics session.
#[derive(Resource)]
pub struct OrbitWorld {
    pub sim: Simulation,
    pub bodies: ScenarioBodies,
}

#[derive(Resource, Default)]
pub struct Selection {
    pub selected: Option<Entity>,
    pub camera_target: Option<Entity>,
}

/// Ship controls held this frame, written by the input plugin.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct ShipControls(pub ThrustInput);

#[derive(Component, Clone, Copy, Deref)]
pub struct BodyHandle(pub BodyId);

#[derive(Component, Clone, Copy)]
pub struct BodyInfo {
    pub kind: BodyKind,
    /// Surface radius, meters.
    pub radius_m: f64,
}

#[derive(Component, Default)]
pub struct Ship {
    pub controller: ThrustController,
}

/// Parent and elements as of this frame.
#[derive(Component, Clone, Copy, Deref)]
pub struct Orbit(pub OrbitSnapshot);

/// Per-kind presentation.
pub trait KindStyle {
    fn color(&self) -> Color;
    fn path_color(&self) -> Color;
    /// Smallest on-screen radius, pixels.
    fn min_radius_px(&self) -> f32;
}

impl KindStyle for BodyKind {
    fn color(&self) -> Color {
        match self {
            BodyKind::Static => Color::srgb(0.23, 0.53, 1.0),
            BodyKind::Orbiter => Color::srgb(0.85, 0.85, 0.85),
            BodyKind::Player => Color::WHITE,
        }
    }
    fn path_color(&self) -> Color {
        match self {
            BodyKind::Player => Color::srgba(1.0, 1.0, 1.0, 0.3),
            _ => Color::srgba(0.86, 0.86, 0.86, 0.3),
        }
    }
    fn min_radius_px(&self) -> f32 {
        match self {
            BodyKind::Static => 30.0,
            BodyKind::Orbiter => 4.0,
            BodyKind::Player => 6.0,
        }
    }
}

fn build_world() -> Option<OrbitWorld> {
    let mut sim = Simulation::new(PhysicsConfig::default());
    match scenario::earth_moon(&mut sim, DVec2::ZERO) {
        Ok(bodies) => Some(OrbitWorld { sim, bodies }),
        Err(err) => {
            error!("scenario setup failed: {err}");
            None
        }
    }
}

fn spawn_bodies(commands: &mut Commands, world: &OrbitWorld, selection: &mut Selection) {
    let meters_per_unit = world.sim.config().meters_per_unit;

    for id in world.sim.registry().ids() {
        let Some(body) = world.sim.body(id) else {
            continue;
        };
        let radius_m = world.bodies.radius_m(id);
        let radius_units = (radius_m / meters_per_unit) as f32;
        let size = if body.kind == BodyKind::Player {
            Vec2::new(10.0, 15.0)
        } else {
            Vec2::splat(2.0 * radius_units)
        };

        let mut entity = commands.spawn((
            Name::new(body.name.clone()),
            BodyHandle(id),
            BodyInfo {
                kind: body.kind,
                radius_m,
            },
            Orbit(world.sim.snapshot(id)),
            SpriteBundle {
                sprite: Sprite {
                    color: body.kind.color(),
                    custom_size: Some(size),
                    ..default()
                },
                transform: Transform::from_translation(body.position.as_vec2().extend(1.0)),
                ..default()
            },
        ));
        if body.kind == BodyKind::Player {
            entity.insert(Ship::default());
            selection.selected = Some(entity.id());
        }
    }
}

fn spawn_scenario(mut commands: Commands, mut selection: ResMut<Selection>) {
    if let Some(world) = build_world() {
        spawn_bodies(&mut commands, &world, &mut selection);
        commands.insert_resource(world);
    }
}

fn handle_reset(
    mut commands: Commands,
    mut ev_reset: EventReader<ResetEvent>,
    body_q: Query<Entity, With<BodyHandle>>,
    mut selection: ResMut<Selection>,
    mut settings: ResMut<SimSettings>,
) {
    if ev_reset.is_empty() {
        return;
    }
    ev_reset.clear();

    for e in &body_q {
        commands.entity(e).despawn_recursive();
    }
    *selection = Selection::default();
    settings.time_scale = TimeScale::REALTIME;

    if let Some(world) = build_world() {
        spawn_bodies(&mut commands, &world, &mut selection);
        commands.insert_resource(world);
        info!("simulation reset");
    }
}

fn apply_thrust(
    time: Res<Time>,
    settings: Res<SimSettings>,
    controls: Res<ShipControls>,
    world: Option<ResMut<OrbitWorld>>,
    mut ships: Query<(&BodyHandle, &mut Ship)>,
) {
    let Some(mut world) = world else {
        return;
    };
    let dt = time.delta_seconds_f64();
    let enabled = settings.time_scale.is_realtime();

    for (handle, mut ship) in &mut ships {
        ship.controller.apply(**controls, dt, enabled);
        if let Err(err) = world.sim.set_external_force(**handle, ship.controller.force()) {
            warn!("thrust update dropped: {err}");
        }
    }
}

fn step_simulation(
    time: Res<Time>,
    settings: Res<SimSettings>,
    world: Option<ResMut<OrbitWorld>>,
    mut stats: ResMut<SimStats>,
) {
    let Some(mut world) = world else {
        return;
    };
    if !settings.running {
        stats.0 = 0;
        return;
    }
    let raw_dt = time.delta_seconds().min(settings.max_frame_dt) as f64;
    stats.0 = world.sim.advance(raw_dt, settings.time_scale);
}

fn sync_transforms(
    world: Option<Res<OrbitWorld>>,
    cam_q: Query<&Transform, With<MainCamera>>,
    mut q: Query<(&BodyHandle, &BodyInfo, Option<&Ship>, &mut Transform, &mut Sprite), Without<MainCamera>>,
) {
    let Some(world) = world else {
        return;
    };
    let zoom = cam_q.get_single().map(|t| t.scale.x).unwrap_or(1.0);
    let meters_per_unit = world.sim.config().meters_per_unit;

    for (handle, info, ship, mut t, mut sprite) in &mut q {
        let Some(body) = world.sim.body(**handle) else {
            continue;
        };
        t.translation = body.position.as_vec2().extend(t.translation.z);

        if let Some(ship) = ship {
            t.rotation = Quat::from_rotation_z(-ship.controller.angle as f32);
            t.scale = Vec3::splat(zoom);
        } else {
            let radius = ((info.radius_m / meters_per_unit) as f32).max(info.kind.min_radius_px() * zoom);
            sprite.custom_size = Some(Vec2::splat(2.0 * radius));
        }
    }
}

fn refresh_orbits(world: Option<Res<OrbitWorld>>, mut q: Query<(&BodyHandle, &mut Orbit)>) {
    let Some(world) = world else {
        return;
    };
    for (handle, mut orbit) in &mut q {
        orbit.0 = world.sim.snapshot(**handle);
    }
}

fn draw_orbit_paths(
    world: Option<Res<OrbitWorld>>,
    settings: Res<SimSettings>,
    q: Query<(&BodyInfo, &Orbit)>,
    mut gizmos: Gizmos,
) {
    let Some(world) = world else {
        return;
    };
    if !settings.show_paths {
        return;
    }

    for (info, orbit) in &q {
        if info.kind.is_static() {
            continue;
        }
        let mut points: Vec<Vec2> = world
            .sim
            .arc_points(orbit, settings.arc_samples)
            .into_iter()
            .map(|p| p.as_vec2())
            .collect();
        if points.len() < 2 {
            continue;
        }
        let closed = orbit
            .elements
            .is_some_and(|el| el.kind == TrajectoryKind::Elliptic);
        if closed {
            points.push(points[0]);
        }
        gizmos.linestrip_2d(points, info.kind.path_color());
    }
}

fn draw_ship_flame(
    cam_q: Query<&Transform, With<MainCamera>>,
    q: Query<(&Transform, &Ship), Without<MainCamera>>,
    mut gizmos: Gizmos,
) {
    let zoom = cam_q.get_single().map(|t| t.scale.x).unwrap_or(1.0);
    let mut rng = rand::thread_rng();

    for (t, ship) in &q {
        let throttle = ship.controller.throttle as f32;
        if throttle <= 0.0 {
            continue;
        }
        let flicker = rng.gen_range(-0.5..0.5) * throttle;
        let length = (10.0 * throttle + flicker) * zoom;
        let back = -ship.controller.heading().as_vec2();
        let base = t.translation.truncate() + back * 7.5 * zoom;
        gizmos.line_2d(base, base + back * length, Color::srgb(1.0, 0.65, 0.0));
    }
}
