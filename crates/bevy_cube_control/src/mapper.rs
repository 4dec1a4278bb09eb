//! Frame logic of the controller-to-cube mapping, kept free of ECS access so it can be
//! driven from tests without a running app.

use bevy::ecs::system::Resource;
use bevy::math::{Vec2, Vec3};
use bevy::transform::components::Transform;

use crate::config::CubeControlConfig;
use crate::controller::{ControllerButton, ControllerId, ControllerSnapshot};
use crate::viewer::ViewerPose;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeControlState {
    /// Gates every interaction with the target.
    pub enabled: bool,
    /// Passive spin is applied every frame while set.
    pub spinning: bool,
}

impl Default for CubeControlState {
    fn default() -> Self {
        Self {
            enabled: true,
            spinning: true,
        }
    }
}

/// Change to apply to the target for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformDelta {
    /// Degrees about the target's own up axis.
    pub yaw_degrees: f32,
    /// World space.
    pub translation: Vec3,
}

impl TransformDelta {
    pub const NONE: TransformDelta = TransformDelta {
        yaw_degrees: 0.0,
        translation: Vec3::ZERO,
    };

    pub fn is_none(&self) -> bool {
        self.yaw_degrees == 0.0 && self.translation == Vec3::ZERO
    }

    pub fn apply(&self, transform: &mut Transform) {
        if self.yaw_degrees != 0.0 {
            transform.rotate_local_y(self.yaw_degrees.to_radians());
        }
        transform.translation += self.translation;
    }
}

/// Which continuous channel wins this frame. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousInput {
    Trigger,
    Touchpad(Vec2),
    Idle,
}

pub fn continuous_input(
    state: CubeControlState,
    snapshot: &ControllerSnapshot,
    config: &CubeControlConfig,
) -> ContinuousInput {
    if !state.enabled {
        return ContinuousInput::Idle;
    }
    if snapshot.trigger > config.trigger_threshold {
        ContinuousInput::Trigger
    } else if snapshot.touchpad_force() > 0.0 {
        ContinuousInput::Touchpad(snapshot.touchpad_position())
    } else {
        ContinuousInput::Idle
    }
}

/// Vectors shorter than this normalize to zero.
const NORMALIZE_EPSILON: f32 = 1e-5;

/// Horizontal unit direction for a touchpad contact, or zero when there is none to take.
pub fn movement_vector(viewer: &ViewerPose, touchpad: Vec2) -> Vec3 {
    let forward = flatten(viewer.forward());
    let right = flatten(viewer.right());
    normalize_or_zero(touchpad.x * right + touchpad.y * forward)
}

fn flatten(direction: Vec3) -> Vec3 {
    normalize_or_zero(Vec3::new(direction.x, 0.0, direction.z))
}

// glam's normalize_or_zero keeps float noise like 1e-8 alive as a full unit vector
fn normalize_or_zero(vector: Vec3) -> Vec3 {
    let length = vector.length();
    if length > NORMALIZE_EPSILON {
        vector / length
    } else {
        Vec3::ZERO
    }
}

/// Advances the mapper by one frame.
pub fn tick(
    state: CubeControlState,
    snapshot: &ControllerSnapshot,
    viewer: &ViewerPose,
    config: &CubeControlConfig,
    delta_seconds: f32,
) -> (CubeControlState, TransformDelta) {
    let mut next = state;
    let mut delta = TransformDelta::NONE;
    let step = config.rotation_speed * delta_seconds;

    if state.spinning && state.enabled {
        delta.yaw_degrees += step;
    }

    match continuous_input(state, snapshot, config) {
        // counters this frame's spin, so a held trigger stops the cube in place
        ContinuousInput::Trigger => {
            next.spinning = true;
            delta.yaw_degrees -= step;
        }
        ContinuousInput::Touchpad(position) => {
            delta.translation =
                movement_vector(viewer, position) * config.move_speed * delta_seconds;
        }
        ContinuousInput::Idle => {}
    }

    (next, delta)
}

pub fn on_button_down(
    state: CubeControlState,
    controller: ControllerId,
    button: ControllerButton,
    config: &CubeControlConfig,
) -> CubeControlState {
    if !config.controller_filter.accepts(controller) {
        return state;
    }
    match button {
        ControllerButton::Bumper if state.enabled => CubeControlState {
            spinning: true,
            ..state
        },
        _ => state,
    }
}

/// Returns the new state and, for a home tap, where the target has to be placed.
pub fn on_button_up(
    state: CubeControlState,
    controller: ControllerId,
    button: ControllerButton,
    viewer: &ViewerPose,
    config: &CubeControlConfig,
) -> (CubeControlState, Option<Transform>) {
    if !config.controller_filter.accepts(controller) {
        return (state, None);
    }
    match button {
        ControllerButton::HomeTap => (
            CubeControlState {
                enabled: true,
                ..state
            },
            Some(viewer.spawn_transform(config.spawn_distance)),
        ),
        ControllerButton::Bumper => (state, None),
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Quat;

    use super::*;
    use crate::config::ControllerFilter;

    const EPSILON: f32 = 1e-5;

    fn snapshot(trigger: f32, touchpad: Vec3) -> ControllerSnapshot {
        ControllerSnapshot { trigger, touchpad }
    }

    fn idle() -> ControllerSnapshot {
        ControllerSnapshot::default()
    }

    #[test]
    fn spin_rotates_by_speed_times_delta() {
        let config = CubeControlConfig::default();
        for dt in [0.0, 0.016, 0.5, 2.0] {
            let (next, delta) = tick(
                CubeControlState::default(),
                &idle(),
                &ViewerPose::IDENTITY,
                &config,
                dt,
            );
            assert_eq!(next, CubeControlState::default());
            assert!((delta.yaw_degrees - 30.0 * dt).abs() < EPSILON);
            assert_eq!(delta.translation, Vec3::ZERO);
        }
    }

    #[test]
    fn no_spin_when_not_spinning() {
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let (_, delta) = tick(
            state,
            &idle(),
            &ViewerPose::IDENTITY,
            &CubeControlConfig::default(),
            1.0,
        );
        assert!(delta.is_none());
    }

    #[test]
    fn trigger_at_threshold_is_ignored() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        for trigger in [0.0, 0.1, 0.2] {
            let input = snapshot(trigger, Vec3::ZERO);
            assert_eq!(continuous_input(state, &input, &config), ContinuousInput::Idle);
            let (next, delta) = tick(state, &input, &ViewerPose::IDENTITY, &config, 1.0);
            assert!(!next.spinning);
            assert!(delta.is_none());
        }
    }

    #[test]
    fn trigger_cancels_spin_and_keeps_spinning() {
        let config = CubeControlConfig::default();
        let input = snapshot(0.8, Vec3::ZERO);
        let (next, delta) = tick(
            CubeControlState::default(),
            &input,
            &ViewerPose::IDENTITY,
            &config,
            0.25,
        );
        assert!(next.spinning);
        assert_eq!(delta.yaw_degrees, 0.0);
    }

    #[test]
    fn trigger_reverses_when_spin_was_off() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let (next, delta) = tick(
            state,
            &snapshot(1.0, Vec3::ZERO),
            &ViewerPose::IDENTITY,
            &config,
            0.5,
        );
        assert!(next.spinning);
        assert!((delta.yaw_degrees + 15.0).abs() < EPSILON);
    }

    #[test]
    fn trigger_takes_priority_over_touchpad() {
        let config = CubeControlConfig::default();
        let input = snapshot(0.5, Vec3::new(1.0, 0.0, 1.0));
        let (_, delta) = tick(
            CubeControlState::default(),
            &input,
            &ViewerPose::IDENTITY,
            &config,
            1.0,
        );
        assert_eq!(delta.translation, Vec3::ZERO);
    }

    #[test]
    fn disabled_ignores_continuous_input() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: false,
            spinning: false,
        };
        for input in [
            snapshot(1.0, Vec3::ZERO),
            snapshot(0.0, Vec3::new(1.0, 1.0, 1.0)),
        ] {
            let (next, delta) = tick(state, &input, &ViewerPose::IDENTITY, &config, 1.0);
            assert_eq!(next, state);
            assert!(delta.is_none());
        }
    }

    #[test]
    fn disabled_does_not_spin() {
        let state = CubeControlState {
            enabled: false,
            spinning: true,
        };
        let (_, delta) = tick(
            state,
            &idle(),
            &ViewerPose::IDENTITY,
            &CubeControlConfig::default(),
            1.0,
        );
        assert!(delta.is_none());
    }

    #[test]
    fn touchpad_right_moves_along_viewer_right() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let input = snapshot(0.0, Vec3::new(1.0, 0.0, 0.5));
        let (_, delta) = tick(state, &input, &ViewerPose::IDENTITY, &config, 0.5);
        let expected = Vec3::X * config.move_speed * 0.5;
        assert!(delta.translation.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn touchpad_up_moves_along_viewer_forward() {
        let direction = movement_vector(&ViewerPose::IDENTITY, Vec2::new(0.0, 0.3));
        assert!(direction.abs_diff_eq(Vec3::NEG_Z, EPSILON));
    }

    #[test]
    fn touchpad_diagonal_is_normalized() {
        let direction = movement_vector(&ViewerPose::IDENTITY, Vec2::new(1.0, 1.0));
        assert!((direction.length() - 1.0).abs() < EPSILON);
        assert!(direction.abs_diff_eq(Vec3::new(1.0, 0.0, -1.0).normalize(), EPSILON));
    }

    #[test]
    fn centre_tap_does_not_move() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let input = snapshot(0.0, Vec3::new(0.0, 0.0, 1.0));
        let (_, delta) = tick(state, &input, &ViewerPose::IDENTITY, &config, 1.0);
        assert_eq!(delta.translation, Vec3::ZERO);
        assert!(!delta.translation.is_nan());
    }

    #[test]
    fn movement_ignores_viewer_pitch() {
        let pitched = ViewerPose::new(Vec3::ZERO, Quat::from_rotation_x(-0.6));
        let direction = movement_vector(&pitched, Vec2::new(0.0, 1.0));
        assert!(direction.abs_diff_eq(Vec3::NEG_Z, EPSILON));
    }

    #[test]
    fn looking_straight_down_still_strafes() {
        let down = ViewerPose::new(Vec3::ZERO, Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        assert_eq!(movement_vector(&down, Vec2::new(0.0, 1.0)), Vec3::ZERO);
        let strafe = movement_vector(&down, Vec2::new(1.0, 0.0));
        assert!(strafe.abs_diff_eq(Vec3::X, EPSILON));
    }

    #[test]
    fn bumper_resumes_spin_only_when_enabled() {
        let config = CubeControlConfig::default();
        let stopped = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let next = on_button_down(stopped, ControllerId(0), ControllerButton::Bumper, &config);
        assert!(next.spinning);

        let disabled = CubeControlState {
            enabled: false,
            spinning: false,
        };
        let next = on_button_down(disabled, ControllerId(0), ControllerButton::Bumper, &config);
        assert_eq!(next, disabled);
    }

    #[test]
    fn home_down_does_nothing() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let next = on_button_down(state, ControllerId(0), ControllerButton::HomeTap, &config);
        assert_eq!(next, state);
    }

    #[test]
    fn home_up_enables_and_respawns_ahead_of_viewer() {
        let config = CubeControlConfig::default();
        let disabled = CubeControlState {
            enabled: false,
            spinning: false,
        };
        let viewer = ViewerPose::new(Vec3::new(1.0, 1.6, 0.0), Quat::from_rotation_y(0.4));
        let (next, spawn) =
            on_button_up(disabled, ControllerId(3), ControllerButton::HomeTap, &viewer, &config);
        assert!(next.enabled);
        assert!(!next.spinning);
        let spawn = spawn.expect("home tap should respawn");
        assert!(spawn
            .translation
            .abs_diff_eq(viewer.translation + viewer.forward() * 2.0, EPSILON));
        assert_eq!(spawn.rotation, viewer.rotation);
    }

    #[test]
    fn repeated_home_taps_follow_current_viewer() {
        let config = CubeControlConfig::default();
        let state = CubeControlState::default();
        let first = ViewerPose::new(Vec3::ZERO, Quat::IDENTITY);
        let second = ViewerPose::new(Vec3::new(0.0, 0.0, 5.0), Quat::from_rotation_y(1.0));

        let (_, a) = on_button_up(state, ControllerId(0), ControllerButton::HomeTap, &first, &config);
        let (_, b) = on_button_up(state, ControllerId(0), ControllerButton::HomeTap, &first, &config);
        assert_eq!(a, b);

        let (_, c) =
            on_button_up(state, ControllerId(0), ControllerButton::HomeTap, &second, &config);
        assert_eq!(c, Some(second.spawn_transform(config.spawn_distance)));
    }

    #[test]
    fn bumper_up_does_nothing() {
        let config = CubeControlConfig::default();
        let state = CubeControlState {
            enabled: false,
            spinning: false,
        };
        let (next, spawn) = on_button_up(
            state,
            ControllerId(0),
            ControllerButton::Bumper,
            &ViewerPose::IDENTITY,
            &config,
        );
        assert_eq!(next, state);
        assert!(spawn.is_none());
    }

    #[test]
    fn filtered_controller_is_ignored() {
        let config = CubeControlConfig {
            controller_filter: ControllerFilter::Only(ControllerId(0)),
            ..Default::default()
        };
        let state = CubeControlState {
            enabled: true,
            spinning: false,
        };
        let next = on_button_down(state, ControllerId(1), ControllerButton::Bumper, &config);
        assert_eq!(next, state);
        let (_, spawn) = on_button_up(
            state,
            ControllerId(1),
            ControllerButton::HomeTap,
            &ViewerPose::IDENTITY,
            &config,
        );
        assert!(spawn.is_none());

        let next = on_button_down(state, ControllerId(0), ControllerButton::Bumper, &config);
        assert!(next.spinning);
    }

    #[test]
    fn delta_rotates_about_local_up() {
        let mut transform = Transform::from_xyz(1.0, 2.0, 3.0);
        TransformDelta {
            yaw_degrees: 90.0,
            translation: Vec3::new(0.0, 0.0, -1.0),
        }
        .apply(&mut transform);
        assert!(transform
            .rotation
            .abs_diff_eq(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2), EPSILON));
        assert!(transform.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 2.0), EPSILON));
    }
}
