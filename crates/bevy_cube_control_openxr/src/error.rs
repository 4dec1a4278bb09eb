use thiserror::Error;

#[derive(Error, Debug)]
pub enum OxrCubeControlError {
    #[error("OpenXR error: {0}")]
    OpenXrError(#[from] openxr::sys::Result),
    #[error("No OpenXR instance, add the bevy_mod_openxr plugins before OxrCubeControlPlugin")]
    MissingInstance,
}

pub type Result<T> = std::result::Result<T, OxrCubeControlError>;
