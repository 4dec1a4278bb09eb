//! Keyboard stand-in for a handheld controller, for running without a headset.

use bevy::input::InputSystem;
use bevy::prelude::*;

use crate::controller::{
    controller_session_running, ControllerButton, ControllerButtonInput, ControllerId,
    ControllerSessionStatus, ControllerSnapshot,
};
use crate::CubeControlSet;

pub struct SimulatedControllerPlugin;

impl Plugin for SimulatedControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulatedControllerBindings>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Startup, start_simulated_session)
            .add_systems(
                PreUpdate,
                (simulate_buttons, simulate_analog)
                    .in_set(CubeControlSet::ReadInput)
                    .after(InputSystem)
                    .run_if(controller_session_running),
            );
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SimulatedControllerBindings {
    pub controller: ControllerId,
    pub bumper: KeyCode,
    pub home: KeyCode,
    /// Held for full trigger pressure.
    pub trigger: KeyCode,
    pub touchpad_up: KeyCode,
    pub touchpad_down: KeyCode,
    pub touchpad_left: KeyCode,
    pub touchpad_right: KeyCode,
}

impl Default for SimulatedControllerBindings {
    fn default() -> Self {
        Self {
            controller: ControllerId(0),
            bumper: KeyCode::KeyB,
            home: KeyCode::KeyH,
            trigger: KeyCode::Space,
            touchpad_up: KeyCode::ArrowUp,
            touchpad_down: KeyCode::ArrowDown,
            touchpad_left: KeyCode::ArrowLeft,
            touchpad_right: KeyCode::ArrowRight,
        }
    }
}

impl SimulatedControllerBindings {
    fn buttons(&self) -> [(KeyCode, ControllerButton); 2] {
        [
            (self.bumper, ControllerButton::Bumper),
            (self.home, ControllerButton::HomeTap),
        ]
    }
}

fn start_simulated_session(mut status: ResMut<ControllerSessionStatus>) {
    if *status == ControllerSessionStatus::Unavailable {
        *status = ControllerSessionStatus::Running;
        info!("simulated controller session running");
    }
}

fn simulate_buttons(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<SimulatedControllerBindings>,
    mut button_writer: EventWriter<ControllerButtonInput>,
) {
    for (key, button) in bindings.buttons() {
        if keys.just_pressed(key) {
            button_writer.send(ControllerButtonInput::pressed(bindings.controller, button));
        }
        if keys.just_released(key) {
            button_writer.send(ControllerButtonInput::released(bindings.controller, button));
        }
    }
}

fn simulate_analog(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<SimulatedControllerBindings>,
    mut snapshot: ResMut<ControllerSnapshot>,
) {
    let axis = |negative: KeyCode, positive: KeyCode| {
        keys.pressed(positive) as i8 as f32 - keys.pressed(negative) as i8 as f32
    };
    let x = axis(bindings.touchpad_left, bindings.touchpad_right);
    let y = axis(bindings.touchpad_down, bindings.touchpad_up);
    let touching = keys.any_pressed([
        bindings.touchpad_up,
        bindings.touchpad_down,
        bindings.touchpad_left,
        bindings.touchpad_right,
    ]);

    snapshot.set_if_neq(ControllerSnapshot {
        trigger: if keys.pressed(bindings.trigger) { 1.0 } else { 0.0 },
        touchpad: Vec3::new(x, y, if touching { 1.0 } else { 0.0 }),
    });
}
