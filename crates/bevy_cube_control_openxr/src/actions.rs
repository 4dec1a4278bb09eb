use bevy::prelude::*;
use bevy_cube_control::{ControllerButton, ControllerButtonInput, ControllerSnapshot};
use bevy_mod_openxr::{
    action_binding::OxrSuggestActionBinding, action_set_attaching::OxrAttachActionSet,
    action_set_syncing::OxrSyncActionSet, resources::OxrInstance, session::OxrSession,
};
use openxr::{Path, Vector2f};

use crate::bindings::{Hand, ProfileBindings};
use crate::error::{OxrCubeControlError, Result};
use crate::OxrControllerConfig;

/// Action set and actions the controller is read through. Inserted at startup.
#[derive(Resource)]
pub struct ControllerActions {
    pub set: openxr::ActionSet,
    pub bumper: openxr::Action<bool>,
    pub home: openxr::Action<bool>,
    pub trigger: openxr::Action<f32>,
    pub touchpad: openxr::Action<Vector2f>,
    pub touchpad_force: openxr::Action<f32>,
    hands: [Path; 2],
}

impl ControllerActions {
    pub fn hand_path(&self, hand: Hand) -> Path {
        match hand {
            Hand::Left => self.hands[0],
            Hand::Right => self.hands[1],
        }
    }
}

/// Controller input can't start without an instance, so a failed OpenXR init is fatal.
pub fn require_openxr_instance(instance: Option<Res<OxrInstance>>) -> Result<()> {
    match instance {
        Some(_) => Ok(()),
        None => Err(OxrCubeControlError::MissingInstance),
    }
}

pub fn create_controller_actions(
    instance: Res<OxrInstance>,
    mut attach_writer: EventWriter<OxrAttachActionSet>,
    mut commands: Commands,
) -> Result<()> {
    let hands = [
        instance.string_to_path(Hand::Left.path())?,
        instance.string_to_path(Hand::Right.path())?,
    ];

    let set = instance.create_action_set("cube_control", "Cube control", 0)?;
    let actions = ControllerActions {
        bumper: set.create_action("bumper", "Bumper", &hands)?,
        home: set.create_action("home", "Home", &hands)?,
        trigger: set.create_action("trigger", "Trigger", &hands)?,
        touchpad: set.create_action("touchpad", "Touchpad", &hands)?,
        touchpad_force: set.create_action("touchpad_force", "Touchpad force", &hands)?,
        set,
        hands,
    };

    attach_writer.send(OxrAttachActionSet(actions.set.clone()));
    commands.insert_resource(actions);
    info!("created cube control action set");
    Ok(())
}

pub fn suggest_controller_bindings(
    actions: Option<Res<ControllerActions>>,
    config: Res<OxrControllerConfig>,
    mut binding_writer: EventWriter<OxrSuggestActionBinding>,
) {
    let Some(actions) = actions else {
        warn!("cube control actions were not created, skipping binding suggestions");
        return;
    };
    for profile in config.profiles.iter() {
        suggest_profile(&actions, profile, &mut binding_writer);
    }
}

fn suggest_profile(
    actions: &ControllerActions,
    profile: &ProfileBindings,
    binding_writer: &mut EventWriter<OxrSuggestActionBinding>,
) {
    let suggestions = [
        (actions.bumper.as_raw(), profile.bumper),
        (actions.home.as_raw(), profile.home),
        (actions.trigger.as_raw(), profile.trigger),
        (actions.touchpad.as_raw(), profile.touchpad),
        (actions.touchpad_force.as_raw(), profile.touchpad_force),
    ];
    for (action, inputs) in suggestions {
        binding_writer.send(OxrSuggestActionBinding {
            action,
            interaction_profile: profile.profile.into(),
            bindings: profile.paths(inputs),
        });
    }
}

pub fn request_action_sync(
    actions: Res<ControllerActions>,
    mut sync_writer: EventWriter<OxrSyncActionSet>,
) {
    sync_writer.send(OxrSyncActionSet(actions.set.clone()));
}

/// Button events come from every hand, each tagged with its own controller id.
pub fn poll_buttons(
    session: Res<OxrSession>,
    actions: Res<ControllerActions>,
    mut button_writer: EventWriter<ControllerButtonInput>,
) {
    for hand in Hand::BOTH {
        let path = actions.hand_path(hand);
        let buttons = [
            (&actions.bumper, ControllerButton::Bumper),
            (&actions.home, ControllerButton::HomeTap),
        ];
        for (action, button) in buttons {
            let state = match action.state(&session, path) {
                Ok(state) => state,
                Err(err) => {
                    warn!("error getting {button:?} state on {hand:?}: {err}");
                    continue;
                }
            };
            if !state.is_active || !state.changed_since_last_sync {
                continue;
            }
            let controller = hand.controller_id();
            button_writer.send(if state.current_state {
                ControllerButtonInput::pressed(controller, button)
            } else {
                ControllerButtonInput::released(controller, button)
            });
        }
    }
}

/// Continuous channels are only read from the configured hand.
pub fn poll_analog(
    session: Res<OxrSession>,
    actions: Res<ControllerActions>,
    config: Res<OxrControllerConfig>,
    mut snapshot: ResMut<ControllerSnapshot>,
) {
    let path = actions.hand_path(config.hand);

    let trigger = match actions.trigger.state(&session, path) {
        Ok(state) if state.is_active => state.current_state,
        Ok(_) => 0.0,
        Err(err) => {
            warn!("error getting trigger state: {err}");
            0.0
        }
    };
    let position = match actions.touchpad.state(&session, path) {
        Ok(state) if state.is_active => state.current_state,
        Ok(_) => Vector2f { x: 0.0, y: 0.0 },
        Err(err) => {
            warn!("error getting touchpad state: {err}");
            Vector2f { x: 0.0, y: 0.0 }
        }
    };
    let force = match actions.touchpad_force.state(&session, path) {
        Ok(state) if state.is_active => state.current_state,
        Ok(_) => 0.0,
        Err(err) => {
            warn!("error getting touchpad force state: {err}");
            0.0
        }
    };

    snapshot.set_if_neq(ControllerSnapshot {
        trigger,
        touchpad: Vec3::new(position.x, position.y, force),
    });
}
