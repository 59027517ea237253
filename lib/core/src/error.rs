use thiserror::Error;

use crate::season::SeasonKey;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Season already exists in catalog: {0}")]
    DuplicateSeason(SeasonKey),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown stat field: {0}")]
    UnknownField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
