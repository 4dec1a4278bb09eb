use std::borrow::Cow;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeControlError {
    #[error("No entity is tagged ControlTarget and none is named \"{0}\"")]
    TargetNotFound(Cow<'static, str>),
    #[error("{count} entities are named \"{name}\", expected exactly one")]
    AmbiguousTargetName {
        name: Cow<'static, str>,
        count: usize,
    },
    #[error("{0} entities are tagged ControlTarget, expected at most one")]
    MultipleTargets(usize),
}

pub type Result<T> = std::result::Result<T, CubeControlError>;
