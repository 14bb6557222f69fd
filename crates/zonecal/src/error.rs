//! Error types for zonecal operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZonecalError {
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, ZonecalError>;
