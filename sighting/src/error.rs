use sighting_core::SightingError;
use thiserror::Error;

/// Errors raised while setting up or running a two-camera rig.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sighting(#[from] SightingError),
    #[error("invalid rig configuration: {0}")]
    Config(#[from] serde_json::Error),
}
