use bevy::ecs::query::QuerySingleError;
use bevy::log::warn_once;
use bevy::prelude::*;

/// Marks the entity whose transform is the viewer (usually the camera).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ControlViewer;

/// Where the viewer is and which way it faces, in world space.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for ViewerPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewerPose {
    pub const IDENTITY: ViewerPose = ViewerPose {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Transform directly ahead of the viewer at `distance`, facing the same way.
    pub fn spawn_transform(&self, distance: f32) -> Transform {
        Transform::from_translation(self.translation + self.forward() * distance)
            .with_rotation(self.rotation)
    }
}

impl From<&GlobalTransform> for ViewerPose {
    fn from(value: &GlobalTransform) -> Self {
        let (_scale, rotation, translation) = value.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
        }
    }
}

pub fn track_viewer(
    viewer_query: Query<&GlobalTransform, With<ControlViewer>>,
    mut pose: ResMut<ViewerPose>,
) {
    match viewer_query.get_single() {
        Ok(transform) => {
            pose.set_if_neq(ViewerPose::from(transform));
        }
        // a backend may be feeding the pose instead
        Err(QuerySingleError::NoEntities(_)) => {}
        Err(QuerySingleError::MultipleEntities(_)) => {
            warn_once!("more than one ControlViewer, keeping the previous viewer pose");
        }
    }
}
