//! Errors for the AIS forwarder
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AisForwardError {
    #[error("HTTP request failed")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Invalid MMSI")]
    InvalidMmsi(String),

    #[error("Emission failed: {0}")]
    EmissionError(String),
}
