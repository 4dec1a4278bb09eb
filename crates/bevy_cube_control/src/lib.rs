//! Bevy plugin that binds a handheld XR controller to a single target object.
//!
//! The bumper (re)starts a passive spin, a pulled trigger holds the spin still, the touchpad
//! slides the target horizontally relative to the viewer and a home tap places it back in
//! front of the viewer. Input arrives through [`ControllerButtonInput`] events and the
//! [`ControllerSnapshot`] resource, written by a backend such as
//! [`SimulatedControllerPlugin`] or the OpenXR one in `bevy_cube_control_openxr`.

use bevy::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
pub mod mapper;
pub mod simulated;
pub mod systems;
pub mod target;
pub mod viewer;

pub use config::{ControllerFilter, CubeControlConfig};
pub use controller::{
    controller_session_running, controller_session_stopped, ControllerButton,
    ControllerButtonInput, ControllerId, ControllerSessionStatus, ControllerSnapshot,
};
pub use error::CubeControlError;
pub use mapper::{CubeControlState, TransformDelta};
pub use simulated::{SimulatedControllerBindings, SimulatedControllerPlugin};
pub use systems::SetControlEnabled;
pub use target::{exit_on_error, ControlTarget};
pub use viewer::{ControlViewer, ViewerPose};

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, SystemSet)]
pub enum CubeControlSet {
    /// Runs in PreUpdate. Backends write the snapshot, viewer pose and button events here.
    ReadInput,
    /// Runs in Update
    HandleButtons,
    /// Runs in Update, after [`CubeControlSet::HandleButtons`]
    ApplyInput,
}

pub struct CubeControlPlugin;

impl Plugin for CubeControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeControlConfig>()
            .init_resource::<CubeControlState>()
            .init_resource::<ControllerSnapshot>()
            .init_resource::<ControllerSessionStatus>()
            .init_resource::<ViewerPose>()
            .add_event::<ControllerButtonInput>()
            .add_event::<SetControlEnabled>()
            .configure_sets(
                Update,
                (CubeControlSet::HandleButtons, CubeControlSet::ApplyInput).chain(),
            )
            // hosts usually spawn their scene in Startup
            .add_systems(
                PostStartup,
                target::attach_target.pipe(exit_on_error::<CubeControlError>),
            )
            .add_systems(
                PreUpdate,
                viewer::track_viewer.in_set(CubeControlSet::ReadInput),
            )
            .add_systems(
                Update,
                (systems::handle_button_input, systems::handle_enable_requests)
                    .chain()
                    .in_set(CubeControlSet::HandleButtons)
                    .run_if(not(controller_session_stopped)),
            )
            .add_systems(
                Update,
                systems::apply_controller_input.in_set(CubeControlSet::ApplyInput),
            )
            .add_systems(Last, systems::stop_controller_session);
    }
}
