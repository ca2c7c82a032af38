//! Error handling for the temperature bridge.

/// A specialized `Result` type for temperature bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the temperature bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial device could not be opened or read
    #[error("Serial port error: {0}")]
    Serial(String),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Mail delivery failed
    #[error("Mail error: {0}")]
    Mail(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new serial port error
    pub fn serial_error(msg: impl Into<String>) -> Self {
        Self::Serial(msg.into())
    }

    /// Create a new mail error
    pub fn mail_error(msg: impl Into<String>) -> Self {
        Self::Mail(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<tokio_serial::Error> for Error {
    fn from(err: tokio_serial::Error) -> Self {
        Self::Serial(err.to_string())
    }
}
