use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::config::CubeControlConfig;
use crate::controller::{ControllerButtonInput, ControllerSessionStatus, ControllerSnapshot};
use crate::mapper::{self, CubeControlState};
use crate::target::ControlTarget;
use crate::viewer::ViewerPose;

/// Request sent by the host app to turn interaction with the target on or off.
/// Disabling hides the target, enabling shows it again in place.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetControlEnabled(pub bool);

/// Dispatches presses and releases in arrival order.
pub fn handle_button_input(
    mut button_reader: EventReader<ControllerButtonInput>,
    mut state: ResMut<CubeControlState>,
    config: Res<CubeControlConfig>,
    viewer: Res<ViewerPose>,
    mut target_query: Query<(&mut Transform, &mut Visibility), With<ControlTarget>>,
) {
    for event in button_reader.read() {
        let (next, spawn) = match event.state {
            ButtonState::Pressed => (
                mapper::on_button_down(*state, event.controller, event.button, &config),
                None,
            ),
            ButtonState::Released => {
                mapper::on_button_up(*state, event.controller, event.button, &viewer, &config)
            }
        };
        if state.set_if_neq(next) {
            debug!(
                "{:?} {:?} on {:?}: {:?}",
                event.button, event.state, event.controller, next
            );
        }
        let Some(spawn) = spawn else {
            continue;
        };
        match target_query.get_single_mut() {
            Ok((mut transform, mut visibility)) => {
                *visibility = Visibility::Inherited;
                transform.translation = spawn.translation;
                transform.rotation = spawn.rotation;
                debug!("respawned target at {}", spawn.translation);
            }
            Err(_) => debug!("home tap without a control target"),
        }
    }
}

pub fn handle_enable_requests(
    mut request_reader: EventReader<SetControlEnabled>,
    mut state: ResMut<CubeControlState>,
    mut target_query: Query<&mut Visibility, With<ControlTarget>>,
) {
    let Some(SetControlEnabled(enabled)) = request_reader.read().last().copied() else {
        return;
    };
    if state.enabled == enabled {
        return;
    }
    state.enabled = enabled;
    for mut visibility in &mut target_query {
        *visibility = if enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    info!("cube control {}", if enabled { "enabled" } else { "disabled" });
}

pub fn apply_controller_input(
    time: Res<Time>,
    snapshot: Res<ControllerSnapshot>,
    viewer: Res<ViewerPose>,
    config: Res<CubeControlConfig>,
    mut state: ResMut<CubeControlState>,
    mut target_query: Query<&mut Transform, With<ControlTarget>>,
) {
    let Ok(mut transform) = target_query.get_single_mut() else {
        return;
    };
    let (next, delta) = mapper::tick(
        *state,
        &snapshot,
        &viewer,
        &config,
        time.delta_seconds(),
    );
    state.set_if_neq(next);
    if !delta.is_none() {
        delta.apply(&mut transform);
    }
}

/// Stops listening to the controller once the app is exiting.
pub fn stop_controller_session(
    mut exit_reader: EventReader<AppExit>,
    mut status: ResMut<ControllerSessionStatus>,
    mut snapshot: ResMut<ControllerSnapshot>,
) {
    if exit_reader.read().last().is_none() {
        return;
    }
    if status.set_if_neq(ControllerSessionStatus::Stopped) {
        *snapshot = ControllerSnapshot::default();
        info!("controller session stopped");
    }
}
