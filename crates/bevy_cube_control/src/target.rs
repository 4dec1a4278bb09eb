use std::fmt::Display;

use bevy::ecs::query::QuerySingleError;
use bevy::prelude::*;

use crate::config::CubeControlConfig;
use crate::error::{CubeControlError, Result};

/// Marks the entity the controller manipulates. Tag an entity before startup to skip the
/// lookup by [`CubeControlConfig::target_name`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ControlTarget;

pub fn attach_target(
    mut commands: Commands,
    config: Res<CubeControlConfig>,
    tagged_query: Query<Entity, With<ControlTarget>>,
    named_query: Query<(Entity, &Name)>,
) -> Result<()> {
    let target = match tagged_query.get_single() {
        Ok(entity) => entity,
        Err(QuerySingleError::NoEntities(_)) => find_by_name(&named_query, &config)?,
        Err(QuerySingleError::MultipleEntities(_)) => {
            return Err(CubeControlError::MultipleTargets(tagged_query.iter().count()));
        }
    };

    commands
        .entity(target)
        .insert((ControlTarget, Visibility::Inherited));
    info!("cube control attached to {target:?}");
    Ok(())
}

fn find_by_name(
    named_query: &Query<(Entity, &Name)>,
    config: &CubeControlConfig,
) -> Result<Entity> {
    let mut matches = named_query
        .iter()
        .filter(|(_, name)| name.as_str() == config.target_name)
        .map(|(entity, _)| entity);
    match (matches.next(), matches.count()) {
        (Some(entity), 0) => Ok(entity),
        (Some(_), rest) => Err(CubeControlError::AmbiguousTargetName {
            name: config.target_name.clone(),
            count: rest + 1,
        }),
        (None, _) => Err(CubeControlError::TargetNotFound(config.target_name.clone())),
    }
}

/// Pipe a startup system into this to abort the app when it fails.
pub fn exit_on_error<E: Display>(
    In(result): In<std::result::Result<(), E>>,
    mut exit: EventWriter<AppExit>,
) {
    if let Err(err) = result {
        error!("{err}");
        exit.send(AppExit::error());
    }
}
