use bevy::ecs::event::Event;
use bevy::ecs::system::{Res, Resource};
use bevy::input::ButtonState;
use bevy::math::{Vec2, Vec3};

/// Identifier a backend attaches to every button event.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct ControllerId(pub u8);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ControllerButton {
    /// Shoulder button, resumes spinning.
    Bumper,
    /// Recenters the target in front of the viewer.
    HomeTap,
}

/// Sent by a backend whenever a button goes down or is released. Presses and releases
/// share one event stream so they are handled in the order they happened.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerButtonInput {
    pub controller: ControllerId,
    pub button: ControllerButton,
    pub state: ButtonState,
}

impl ControllerButtonInput {
    pub fn pressed(controller: ControllerId, button: ControllerButton) -> Self {
        Self {
            controller,
            button,
            state: ButtonState::Pressed,
        }
    }

    pub fn released(controller: ControllerId, button: ControllerButton) -> Self {
        Self {
            controller,
            button,
            state: ButtonState::Released,
        }
    }
}

/// Continuous channels of the polled controller, rewritten by the backend every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerSnapshot {
    /// Trigger pressure in `0.0..=1.0`.
    pub trigger: f32,
    /// Touchpad contact as `(x, y, force)`. A force of zero means no contact.
    pub touchpad: Vec3,
}

impl ControllerSnapshot {
    pub fn touchpad_position(&self) -> Vec2 {
        self.touchpad.truncate()
    }

    pub fn touchpad_force(&self) -> f32 {
        self.touchpad.z
    }
}

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControllerSessionStatus {
    /// No backend is delivering input yet
    #[default]
    Unavailable,
    /// A backend is polling the controller and sending button events.
    Running,
    /// Input delivery was torn down. Backends must not restart it.
    Stopped,
}

/// A [`Condition`](bevy::ecs::schedule::Condition) system that says if a backend is delivering controller input
pub fn controller_session_running(status: Option<Res<ControllerSessionStatus>>) -> bool {
    matches!(status.as_deref(), Some(ControllerSessionStatus::Running))
}

/// A [`Condition`](bevy::ecs::schedule::Condition) system that says if controller input has been torn down
pub fn controller_session_stopped(status: Option<Res<ControllerSessionStatus>>) -> bool {
    matches!(status.as_deref(), Some(ControllerSessionStatus::Stopped))
}
