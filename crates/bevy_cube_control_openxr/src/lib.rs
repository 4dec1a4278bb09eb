//! OpenXR backend for `bevy_cube_control`: reads the bumper, home, trigger and touchpad
//! through an OpenXR action set and takes the viewer pose from the headset.

#[cfg(not(target_family = "wasm"))]
pub mod actions;
pub mod bindings;
#[cfg(not(target_family = "wasm"))]
pub mod error;
#[cfg(not(target_family = "wasm"))]
pub mod viewer;

use bevy::prelude::*;
#[cfg(not(target_family = "wasm"))]
use bevy_cube_control::{
    controller_session_running, exit_on_error, ControllerSessionStatus, ControllerSnapshot,
    CubeControlSet,
};
#[cfg(not(target_family = "wasm"))]
use bevy_mod_openxr::{
    action_binding::OxrSendActionBindings, action_set_syncing::OxrActionSetSyncSet,
    openxr_session_running,
    resources::{OxrInstance, OxrViews},
};

use bindings::{Hand, ProfileBindings, DEFAULT_PROFILES};

#[derive(Resource, Debug, Clone)]
pub struct OxrControllerConfig {
    /// Hand the trigger and touchpad are read from. Buttons are read from both.
    pub hand: Hand,
    pub profiles: Vec<ProfileBindings>,
}

impl Default for OxrControllerConfig {
    fn default() -> Self {
        Self {
            hand: Hand::Left,
            profiles: DEFAULT_PROFILES.to_vec(),
        }
    }
}

pub struct OxrCubeControlPlugin;

impl Plugin for OxrCubeControlPlugin {
    #[cfg(not(target_family = "wasm"))]
    fn build(&self, app: &mut App) {
        use actions::*;
        use error::OxrCubeControlError;

        app.init_resource::<OxrControllerConfig>()
            .add_systems(
                Startup,
                (
                    require_openxr_instance.pipe(exit_on_error::<OxrCubeControlError>),
                    create_controller_actions
                        .pipe(exit_on_error::<OxrCubeControlError>)
                        .run_if(resource_exists::<OxrInstance>),
                ),
            )
            .add_systems(OxrSendActionBindings, suggest_controller_bindings)
            .add_systems(
                PreUpdate,
                (
                    mark_session_running.run_if(openxr_session_running),
                    mark_session_unavailable.run_if(not(openxr_session_running)),
                )
                    .before(CubeControlSet::ReadInput),
            )
            .add_systems(
                PreUpdate,
                request_action_sync
                    .before(OxrActionSetSyncSet)
                    .run_if(openxr_session_running)
                    .run_if(resource_exists::<ControllerActions>),
            )
            .add_systems(
                PreUpdate,
                (poll_buttons, poll_analog)
                    .after(OxrActionSetSyncSet)
                    .in_set(CubeControlSet::ReadInput)
                    .run_if(controller_session_running)
                    .run_if(resource_exists::<ControllerActions>),
            )
            .add_systems(
                PreUpdate,
                viewer::update_viewer_pose
                    .in_set(CubeControlSet::ReadInput)
                    .run_if(openxr_session_running)
                    .run_if(resource_exists::<OxrViews>),
            );
    }

    #[cfg(target_family = "wasm")]
    fn build(&self, app: &mut App) {
        app.init_resource::<OxrControllerConfig>();
    }
}

#[cfg(not(target_family = "wasm"))]
fn mark_session_running(mut status: ResMut<ControllerSessionStatus>) {
    if *status == ControllerSessionStatus::Unavailable {
        *status = ControllerSessionStatus::Running;
        info!("OpenXR controller session running");
    }
}

// a stopped session stays stopped. Analog polling halts with the session, so the last
// readings are dropped instead of being applied every frame.
#[cfg(not(target_family = "wasm"))]
fn mark_session_unavailable(
    mut status: ResMut<ControllerSessionStatus>,
    mut snapshot: ResMut<ControllerSnapshot>,
) {
    if *status == ControllerSessionStatus::Running {
        *status = ControllerSessionStatus::Unavailable;
        *snapshot = ControllerSnapshot::default();
        info!("OpenXR session ended, controller input unavailable");
    }
}
