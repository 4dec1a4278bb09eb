use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
};
use bevy_cube_control::{CubeControlPlugin, SimulatedControllerPlugin};
use bevy_cube_control_openxr::OxrCubeControlPlugin;
use bevy_mod_openxr::add_xr_plugins;
use color_eyre::eyre::eyre;

mod setup;
use crate::setup::{setup_scene, spawn_desktop_camera};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // `--desktop` runs without a headset, driving the cube from the keyboard
    let desktop = std::env::args().any(|arg| arg == "--desktop");

    let mut app = App::new();
    if desktop {
        app.add_plugins(DefaultPlugins)
            .add_plugins(SimulatedControllerPlugin)
            .add_systems(Startup, spawn_desktop_camera);
    } else {
        app.add_plugins(add_xr_plugins(DefaultPlugins))
            .add_plugins(OxrCubeControlPlugin);
    }

    app
        //lets get the usual diagnostic stuff added
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(CubeControlPlugin)
        .add_systems(Startup, setup_scene);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(eyre!("demo exited with code {code}")),
    }
}
