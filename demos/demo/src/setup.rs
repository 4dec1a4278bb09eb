use bevy::prelude::*;
use bevy_cube_control::ControlViewer;

/// set up a simple 3D scene with the cube the controller drives
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // floor
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(5.0, 5.0)),
        material: materials.add(Color::srgb(0.3, 0.5, 0.3)),
        ..default()
    });
    // cube, found by name at startup
    commands.spawn((
        Name::new("Cube"),
        PbrBundle {
            mesh: meshes.add(Cuboid::new(0.3, 0.3, 0.3)),
            material: materials.add(Color::srgb_u8(124, 144, 255)),
            transform: Transform::from_xyz(0.0, 1.5, -2.0),
            ..default()
        },
    ));
    // light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 4.0),
        ..default()
    });
}

/// flat camera at eye height, standing in for the headset
pub fn spawn_desktop_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 1.6, 0.0),
            ..default()
        },
        ControlViewer,
    ));
}
