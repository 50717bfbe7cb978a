use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use kepler_sandbox::physics::{OrbitElements, TimeScale};

use crate::sim::{BodyHandle, BodyInfo, Orbit, OrbitWorld, Selection, SimSettings, SimStats};
use crate::MainCamera;

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, (clock_ui, body_readout_ui, help_ui));
    }
}

/// Whole years/days/hours/minutes/seconds in a span of seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_YEAR: u64 = SECONDS_PER_DAY * 365;

pub fn breakdown_time(seconds: f64) -> Breakdown {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let mut rest = total % SECONDS_PER_YEAR;
    let days = rest / SECONDS_PER_DAY;
    rest %= SECONDS_PER_DAY;
    Breakdown {
        years: total / SECONDS_PER_YEAR,
        days,
        hours: rest / 3_600,
        minutes: rest % 3_600 / 60,
        seconds: rest % 60,
    }
}

/// `"1d 02h:03m:04s"`, days not wrapped into years.
pub fn format_period(seconds: f64) -> String {
    let t = breakdown_time(seconds);
    format!(
        "{}d {:02}h:{:02}m:{:02}s",
        t.years * 365 + t.days,
        t.hours,
        t.minutes,
        t.seconds
    )
}

fn km(meters: f64) -> String {
    if meters.is_finite() {
        format!("{:.2} km", meters / 1_000.0)
    } else {
        "∞".to_string()
    }
}

fn clock_ui(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimSettings>,
    world: Option<Res<OrbitWorld>>,
    stats: Res<SimStats>,
    diagnostics: Res<DiagnosticsStore>,
    cam_q: Query<&Transform, With<MainCamera>>,
) {
    let elapsed = world.as_ref().map(|w| w.sim.elapsed()).unwrap_or(0.0);
    let t = breakdown_time(elapsed);

    egui::Window::new("Time").show(contexts.ctx_mut(), |ui| {
        ui.label(format!(
            "{:02}Y {:02}D {:02}:{:02}:{:02}",
            t.years, t.days, t.hours, t.minutes, t.seconds
        ));
        ui.label(format!(
            "Warp: {}x  ({} substeps/frame)",
            settings.time_scale.factor(),
            stats.0
        ));
        ui.horizontal_wrapped(|ui| {
            for scale in TimeScale::all() {
                let label = format!("{}x", scale.factor());
                if ui
                    .selectable_label(settings.time_scale == scale, label)
                    .clicked()
                {
                    settings.time_scale = scale;
                }
            }
        });
        if !settings.time_scale.is_realtime() {
            ui.label("Ship controls locked during warp");
        }

        ui.separator();

        ui.checkbox(&mut settings.running, "Running");
        ui.checkbox(&mut settings.show_paths, "Show orbit paths");
        ui.checkbox(&mut settings.follow_target, "Follow camera target");

        if let Ok(cam) = cam_q.get_single() {
            let km_per_unit = world
                .as_ref()
                .map_or(10.0, |w| w.sim.config().meters_per_unit / 1_000.0);
            let km_per_px = cam.scale.x as f64 * km_per_unit;
            ui.label(format!("Scale: {km_per_px:.2} km / px"));
        }
        if let Some(fps) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|d| d.smoothed())
        {
            ui.label(format!("FPS: {:.1}", fps));
        }
    });
}

fn body_readout_ui(
    mut contexts: EguiContexts,
    selection: Res<Selection>,
    world: Option<Res<OrbitWorld>>,
    bodies: Query<(&Name, &BodyHandle, &BodyInfo, &Orbit)>,
    names: Query<(&Name, &BodyInfo, &BodyHandle)>,
) {
    let Some(world) = world else {
        return;
    };
    let Some((name, handle, info, orbit)) = selection.selected.and_then(|e| bodies.get(e).ok()) else {
        return;
    };
    let Some(body) = world.sim.body(**handle) else {
        return;
    };
    let camera_target = selection
        .camera_target
        .and_then(|e| names.get(e).ok())
        .map(|(n, ..)| n.as_str().to_owned());

    egui::Window::new("Selected Body").show(contexts.ctx_mut(), |ui| {
        ui.label(format!("Name: {}", name.as_str()));
        ui.label(format!("Mass: {:.3e} kg", body.mass));
        ui.label(format!(
            "Camera target: {}",
            camera_target.as_deref().unwrap_or("—")
        ));

        ui.separator();

        if info.kind.is_static() {
            for field in [
                "Parent", "Speed", "Altitude", "Apoapsis", "Periapsis", "Semi-major axis",
                "Eccentricity", "Period",
            ] {
                ui.label(format!("{field}: N/A"));
            }
            return;
        }

        let parent = orbit
            .parent
            .and_then(|p| names.iter().find(|(_, _, h)| ***h == p));
        ui.label(format!(
            "Parent: {}",
            parent.map(|(n, ..)| n.as_str()).unwrap_or("—")
        ));

        let parent_radius = parent.map(|(_, i, _)| i.radius_m).unwrap_or(0.0);
        match orbit.elements {
            Some(el) => elements_rows(ui, &el, parent_radius),
            None => {
                ui.label("No orbit");
            }
        }
    });
}

fn elements_rows(ui: &mut egui::Ui, el: &OrbitElements, parent_radius: f64) {
    ui.label(format!("Speed: {:.2} m/s", el.speed));
    ui.label(format!("Altitude: {}", km(el.altitude(parent_radius))));
    ui.label(format!("Apoapsis: {}", km(el.apoapsis - parent_radius)));
    ui.label(format!("Periapsis: {}", km(el.periapsis - parent_radius)));
    ui.label(format!("Semi-major axis: {}", km(el.semi_major_axis)));
    ui.label(format!("Eccentricity: {:.4}", el.eccentricity));
    ui.label(format!(
        "Period: {}",
        el.period().map(format_period).unwrap_or_else(|| "—".into())
    ));
}

fn help_ui(mut contexts: EguiContexts, settings: Res<SimSettings>) {
    if !settings.show_help {
        return;
    }
    egui::Window::new("Help").show(contexts.ctx_mut(), |ui| {
        ui.label("Shift / Ctrl: Throttle up / down");
        ui.label("Z / X: Full throttle / cut engine");
        ui.label("A / D: Rotate ship");
        ui.label(", / .: Slower / faster time warp");
        ui.label("C: Back to 1x");
        ui.label("Space: Pause Simulation");
        ui.label("P: Toggle orbit paths");
        ui.label("Left Mouse / Tab: Select body");
        ui.label("T: Lock camera on selection, F: toggle follow");
        ui.label("Right Mouse: Pan Camera (drag)");
        ui.label("Mouse Wheel / Up / Down: Zoom");
        ui.label("R: Reset Simulation");
        ui.label("H: Toggle Help");
    });
}
