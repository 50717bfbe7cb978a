use crate::sim::{
    BodyHandle, BodyInfo, ControlSet, KindStyle, OrbitWorld, ResetEvent, Selection, ShipControls,
    SimSettings,
};
use crate::MainCamera;
use bevy::input::mouse::{MouseButtonInput, MouseMotion, MouseWheel};
use bevy::input::ButtonState; // needed in Bevy 0.14
use bevy::prelude::*;
use kepler_sandbox::physics::{BodyKind, TimeScale};
use kepler_sandbox::thrust::ThrustInput;

/// Camera scale limits, in simulation units (10 km) per pixel.
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 200.0;
/// Picking radius for the ship, pixels.
const SHIP_HITBOX_PX: f32 = 12.0;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                ship_controls,
                time_scale_keys,
                pause_toggle,
                path_toggle,
                follow_toggle,
                reset_trigger,
                help_toggle,
            )
                .in_set(ControlSet),
        )
        .add_systems(
            Update,
            (camera_controls, click_select, cycle_selection, camera_target_key, follow_target),
        );
    }
}

fn camera_controls(
    mut scroll_evr: EventReader<MouseWheel>,
    mut q_cam: Query<(&mut Transform, &Camera, &GlobalTransform), With<MainCamera>>,
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut motion: EventReader<MouseMotion>,
) {
    let Ok((mut t, cam, g_transform)) = q_cam.get_single_mut() else {
        return;
    };
    let Ok(win) = windows.get_single() else {
        return;
    };

    let mut steps: f32 = scroll_evr.read().map(|ev| ev.y.clamp(-1.0, 1.0)).sum();
    if keys.just_pressed(KeyCode::ArrowUp) {
        steps += 1.0;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        steps -= 1.0;
    }

    // Zoom to cursor, faster when far out
    if steps != 0.0 {
        let km_per_px = t.scale.x * 10.0;
        let sensitivity = 0.12 * (1.0 + (1.0 + km_per_px).log10());
        let new_scale = (t.scale.x * (-steps * sensitivity).exp()).clamp(MIN_ZOOM, MAX_ZOOM);
        let actual_zoom = new_scale / t.scale.x;

        let anchor = win
            .cursor_position()
            .and_then(|c| cam.viewport_to_world_2d(g_transform, c))
            .unwrap_or(t.translation.truncate());

        if (actual_zoom - 1.0).abs() > 1e-4 {
            t.translation.x = anchor.x + (t.translation.x - anchor.x) * actual_zoom;
            t.translation.y = anchor.y + (t.translation.y - anchor.y) * actual_zoom;
            t.scale = Vec3::splat(new_scale);
        }
    }

    // Panning
    if buttons.pressed(MouseButton::Right) {
        for m in motion.read() {
            t.translation.x -= m.delta.x * t.scale.x;
            t.translation.y += m.delta.y * t.scale.y;
        }
    } else {
        motion.clear();
    }

    t.translation.z = 999.0;
}

/// Keeps the camera moving with its target by the target's own per-frame
/// displacement, so manual panning still works while locked.
fn follow_target(
    settings: Res<SimSettings>,
    selection: Res<Selection>,
    mut last: Local<Option<(Entity, Vec2)>>,
    targets: Query<&Transform, (With<BodyHandle>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(target) = selection.camera_target.filter(|_| settings.follow_target) else {
        *last = None;
        return;
    };
    let Ok(target_t) = targets.get(target) else {
        *last = None;
        return;
    };
    let Ok(mut cam_t) = q_cam.get_single_mut() else {
        return;
    };

    let pos = target_t.translation.truncate();
    match *last {
        Some((e, prev)) if e == target => {
            let delta = pos - prev;
            cam_t.translation.x += delta.x;
            cam_t.translation.y += delta.y;
        }
        _ => {
            // newly locked: center once
            cam_t.translation.x = pos.x;
            cam_t.translation.y = pos.y;
        }
    }
    *last = Some((target, pos));
}

fn click_select(
    windows: Query<&Window>,
    q_cam: Query<(&Camera, &GlobalTransform, &Transform), With<MainCamera>>,
    mut mousebtn_evr: EventReader<MouseButtonInput>,
    bodies: Query<(Entity, &Transform, &BodyInfo, Option<&Sprite>), Without<MainCamera>>,
    mut selection: ResMut<Selection>,
) {
    let clicked = mousebtn_evr
        .read()
        .any(|ev| ev.button == MouseButton::Left && ev.state == ButtonState::Pressed);
    if !clicked {
        return;
    }
    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok((cam, g_transform, cam_t)) = q_cam.get_single() else {
        return;
    };
    let Some(world) = win
        .cursor_position()
        .and_then(|c| cam.viewport_to_world_2d(g_transform, c))
    else {
        return;
    };

    let zoom = cam_t.scale.x;
    let hit = bodies.iter().find(|(_, t, info, sprite)| {
        let radius = match info.kind {
            BodyKind::Player => SHIP_HITBOX_PX * zoom,
            _ => sprite
                .and_then(|s| s.custom_size)
                .map(|s| s.x * 0.5)
                .unwrap_or(info.kind.min_radius_px() * zoom),
        };
        t.translation.truncate().distance_squared(world) <= radius * radius
    });
    if let Some((e, ..)) = hit {
        selection.selected = Some(e);
    }
}

fn cycle_selection(
    keys: Res<ButtonInput<KeyCode>>,
    world: Option<Res<OrbitWorld>>,
    bodies: Query<(Entity, &BodyHandle)>,
    mut selection: ResMut<Selection>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }
    let Some(world) = world else {
        return;
    };
    let count = world.sim.bodies().len();
    if count == 0 {
        return;
    }

    let current = selection
        .selected
        .and_then(|e| bodies.get(e).ok())
        .map(|(_, h)| h.index());
    let next = current.map(|i| (i + 1) % count).unwrap_or(0);
    if let Some((e, _)) = bodies.iter().find(|(_, h)| h.index() == next) {
        selection.selected = Some(e);
    }
}

fn camera_target_key(keys: Res<ButtonInput<KeyCode>>, mut selection: ResMut<Selection>) {
    if keys.just_pressed(KeyCode::KeyT) {
        selection.camera_target = selection.selected;
    }
}

fn ship_controls(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<ShipControls>) {
    **controls = ThrustInput {
        throttle_up: keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight),
        throttle_down: keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight),
        cut: keys.just_pressed(KeyCode::KeyX),
        full: keys.just_pressed(KeyCode::KeyZ),
        rotate_left: keys.pressed(KeyCode::KeyA),
        rotate_right: keys.pressed(KeyCode::KeyD),
    };
}

fn time_scale_keys(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::Period) {
        settings.time_scale = settings.time_scale.faster();
    }
    if keys.just_pressed(KeyCode::Comma) {
        settings.time_scale = settings.time_scale.slower();
    }
    if keys.just_pressed(KeyCode::KeyC) {
        settings.time_scale = TimeScale::REALTIME;
    }
}

fn pause_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::Space) {
        settings.running = !settings.running;
    }
}

fn path_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyP) {
        settings.show_paths = !settings.show_paths;
    }
}

fn follow_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyF) {
        settings.follow_target = !settings.follow_target;
    }
}

fn reset_trigger(mut ev_reset: EventWriter<ResetEvent>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyR) {
        ev_reset.send(ResetEvent::default());
    }
}

fn help_toggle(mut settings: ResMut<SimSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
    }
}
