use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a key/value store backing the cache.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write would push the store past its byte capacity.
    ///
    /// Recoverable: the cache evicts its namespace and retries once.
    #[error("store capacity exceeded: {required} bytes needed, {capacity} available")]
    CapacityExceeded { required: usize, capacity: usize },

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// True for the capacity condition, which callers may recover from.
    #[must_use]
    pub const fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}

/// Failures below the HTTP status layer: the request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Terminal outcome of a resilient fetch once retries are spent.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("rate limited fetching {resource} after {attempts} attempts")]
    RateLimited { resource: String, attempts: u32 },

    #[error("{resource} not found (HTTP 404)")]
    NotFound { resource: String },

    #[error("HTTP {status} fetching {resource} after {attempts} attempts")]
    Status {
        resource: String,
        status: u16,
        attempts: u32,
    },

    #[error("transport error fetching {resource} after {attempts} attempts: {source}")]
    Transport {
        resource: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("invalid JSON from {resource} after {attempts} attempts: {source}")]
    Decode {
        resource: String,
        attempts: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status carried by the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("unknown league entry: {0}")]
    UnknownEntry(u32),

    #[error("unknown player: {0}")]
    UnknownPlayer(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_is_recoverable() {
        let err = StoreError::CapacityExceeded {
            required: 10,
            capacity: 5,
        };
        assert!(err.is_capacity_exceeded());
        assert!(!StoreError::Corrupt("bad".into()).is_capacity_exceeded());
    }

    #[test]
    fn fetch_error_reports_status() {
        let rate_limited = FetchError::RateLimited {
            resource: "r".into(),
            attempts: 3,
        };
        assert_eq!(rate_limited.status(), Some(429));

        let transport = FetchError::Transport {
            resource: "r".into(),
            attempts: 1,
            source: TransportError::Timeout,
        };
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn fetch_error_message_names_resource_and_attempts() {
        let err = FetchError::Status {
            resource: "https://example.com/x".into(),
            status: 503,
            attempts: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/x"));
        assert!(msg.contains("503"));
        assert!(msg.contains('3'));
    }
}
