//! Error types for Reframe.

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Guided-session errors.
///
/// `InputRequired` is the only user-facing validation failure; it is
/// recoverable and re-promptable, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Step \"{step_title}\" requires a response before continuing")]
    InputRequired { step_title: String },

    #[error("No active session")]
    NoActiveSession,

    #[error("Unknown script: {id}")]
    UnknownScript { id: String },

    #[error("Script {id} has no steps to run")]
    NotStartable { id: String },

    #[error("Session already complete")]
    AlreadyComplete,
}

/// Credential/settings persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Remote analysis client errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No API key provided. Please set up your API key.")]
    MissingApiKey,

    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Speech capability errors.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech capability not supported: {capability}")]
    Unsupported { capability: String },

    #[error("Failed to start {capability}: {reason}")]
    StartFailed { capability: String, reason: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;
