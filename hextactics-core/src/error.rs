//! World construction errors

use thiserror::Error;

use crate::board::Hex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("terrain kind `{0}` is not registered")]
    MissingTerrain(String),

    #[error("unit kind `{0}` is not registered")]
    MissingUnitKind(String),

    #[error("hex ({}, {}) is outside the world", .0.q, .0.r)]
    OffGrid(Hex),

    #[error("hex ({}, {}) is already occupied", .0.q, .0.r)]
    Occupied(Hex),
}
