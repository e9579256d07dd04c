use std::fmt;

// === SettingsError ===

/// Errors related to the persistent settings store.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === DocumentError ===

/// Errors raised while loading a document for measurement.
#[derive(Debug)]
pub enum DocumentError {
    /// The document source could not be read.
    ReadFailed(String),
    /// The page URL could not be parsed.
    InvalidUrl(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::ReadFailed(msg) => write!(f, "Failed to read document: {}", msg),
            DocumentError::InvalidUrl(url) => write!(f, "Invalid document URL: {}", url),
        }
    }
}

impl std::error::Error for DocumentError {}

// === FetchError ===

/// Errors related to fetching a page over the network.
#[derive(Debug)]
pub enum FetchError {
    /// The URL could not be parsed.
    InvalidUrl(String),
    /// The HTTP request failed.
    RequestFailed(String),
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// The response body could not be read.
    BodyError(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            FetchError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            FetchError::HttpStatus(code) => write!(f, "Unexpected HTTP status: {}", code),
            FetchError::BodyError(msg) => write!(f, "Failed to read body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
