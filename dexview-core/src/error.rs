use thiserror::Error;

/// Failure while loading a static dataset or a per-mon detail document.
///
/// The error is `Clone` so a single in-flight request can hand the same outcome to
/// every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("Failed to load {path}: {message}")]
    Network { path: String, message: String },
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl LoadError {
    #[must_use]
    pub fn parse(path: &str, err: &serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn network(path: &str, message: impl Into<String>) -> Self {
        Self::Network {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Path of the resource that failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Status { path, .. } | Self::Network { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}
