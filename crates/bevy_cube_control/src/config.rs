use std::borrow::Cow;

use bevy::ecs::system::Resource;

use crate::controller::ControllerId;

/// Which controllers may drive the target through button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerFilter {
    /// Any controller's buttons are honoured.
    #[default]
    Any,
    Only(ControllerId),
}

impl ControllerFilter {
    pub fn accepts(&self, controller: ControllerId) -> bool {
        match self {
            ControllerFilter::Any => true,
            ControllerFilter::Only(id) => *id == controller,
        }
    }
}

/// Tuning for [`CubeControlPlugin`](crate::CubeControlPlugin). Insert before adding the plugin to override.
#[derive(Resource, Debug, Clone)]
pub struct CubeControlConfig {
    /// Degrees per second.
    pub rotation_speed: f32,
    /// Distance ahead of the viewer the target is placed at on a home tap.
    pub spawn_distance: f32,
    /// Units per second.
    pub move_speed: f32,
    /// Trigger pressure must be strictly above this to counter-rotate.
    pub trigger_threshold: f32,
    pub controller_filter: ControllerFilter,
    /// Looked up when no entity carries [`ControlTarget`](crate::ControlTarget) at startup.
    pub target_name: Cow<'static, str>,
}

impl Default for CubeControlConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 30.0,
            spawn_distance: 2.0,
            move_speed: 1.2,
            trigger_threshold: 0.2,
            controller_filter: ControllerFilter::Any,
            target_name: "Cube".into(),
        }
    }
}
