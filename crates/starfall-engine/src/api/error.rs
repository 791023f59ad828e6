use thiserror::Error;

use crate::api::types::{BodyId, GroupId};

/// Construction-time misuse of the scene graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown pivot group {0:?}")]
    UnknownGroup(GroupId),
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),
    #[error("body {0:?} already has a parent")]
    AlreadyAttached(BodyId),
}

/// Failure to load a scene or game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to bring a scene up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scene setup failed: {0}")]
    Scene(#[from] SceneError),
}
