//! Error types for the screenshot client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, sending or interpreting a render request
#[derive(Error, Debug)]
pub enum Error {
    /// The website URL could not be parsed
    #[error("Invalid website URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The website URL's query component is not valid percent-escaping
    #[error("Malformed query escaping: {0}")]
    MalformedQueryEscaping(String),

    /// A window or crop was given without both width and height
    #[error("Invalid {field} dimensions: width={width:?}, height={height:?} (both are required)")]
    InvalidDimensions {
        field: &'static str,
        width: Option<u32>,
        height: Option<u32>,
    },

    /// The outbound request URL or headers could not be assembled
    #[error("Failed to construct request: {0}")]
    RequestConstruction(String),

    /// Network-level failure (connection, DNS, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for a response
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The service answered with something other than 200
    #[error("Rendering service returned HTTP {status}")]
    Upstream { status: u16 },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Reading the artifact body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures raised by the transport, timeouts included.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout(_))
    }
}
