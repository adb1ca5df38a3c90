use thiserror::Error;

/// Errors surfaced by the cache read and write paths.
///
/// `NotFound` is the only hard failure of the read path; missing include
/// targets and missing collection members are skipped, not raised.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache entry `{key}` not found")]
    NotFound { key: String },
    #[error("cache entry `{key}` is malformed: {message}")]
    Malformed { key: String, message: String },
    #[error("store failure: {message}")]
    Store { message: String },
}

impl CacheError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl std::fmt::Display) -> Self {
        Self::Store {
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
