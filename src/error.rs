use thiserror::Error;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to connect to actuator at {0}")]
    ActuatorConnect(String),
    #[error("Unknown voice intent: {0}")]
    UnknownIntent(String),
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}
