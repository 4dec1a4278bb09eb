use bevy::prelude::*;
use bevy_cube_control::ViewerPose;
use bevy_mod_openxr::{
    helper_traits::{ToQuat, ToVec3},
    init::OxrTrackingRoot,
    resources::OxrViews,
};

/// Feeds [`ViewerPose`] from the first view, which is offset from the head by half the IPD
/// at most.
pub fn update_viewer_pose(
    views: Res<OxrViews>,
    root_query: Query<&GlobalTransform, With<OxrTrackingRoot>>,
    mut pose: ResMut<ViewerPose>,
) {
    let Some(view) = views.first() else {
        debug!("no views to take the viewer pose from");
        return;
    };
    let root = root_query
        .get_single()
        .map(GlobalTransform::compute_transform)
        .unwrap_or_default();
    let head = Transform::from_translation(view.pose.position.to_vec3())
        .with_rotation(view.pose.orientation.to_quat());
    let world = root.mul_transform(head);
    pose.set_if_neq(ViewerPose::new(world.translation, world.rotation));
}
