use std::io;

use thiserror::Error;

/// Errors that can occur during a single provider attempt.
///
/// Every variant except [`FileNotFound`](Self::FileNotFound) is an ordinary
/// attempt failure: the gateway records it and moves on to the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The local file does not exist or cannot be read.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A connect/read timeout or other transport-level failure. Aborted
    /// (cancelled) transfers also land here.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// A 2xx response without the expected fields.
    #[error("unexpected response: {0}")]
    ResponseParse(String),

    /// Reading the local file failed mid-transfer.
    #[error("I/O error: {0}")]
    Io(String),

    /// The provider was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Returns `true` if the next provider in the chain should be tried.
    ///
    /// A missing file fails every provider the same way, so it ends the
    /// chain immediately.
    pub fn triggers_fallback(&self) -> bool {
        !matches!(self, Self::FileNotFound(_))
    }

    /// Classify a `reqwest` transport error.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("timed out: {err}"))
        } else if err.is_connect() {
            Self::Network(format!("connect failed: {err}"))
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Classify an I/O error raised while producing a request body.
    ///
    /// Errors from writing into a closed connection are network failures;
    /// everything else came from reading the local file.
    pub fn from_body_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(err.to_string()),
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => Self::Network(format!("connection closed: {err}")),
            _ => Self::Io(err.to_string()),
        }
    }
}
