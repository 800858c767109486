use thiserror::Error;

use crate::kind::ContentKind;

/// Errors surfaced by pasteboard sessions and backends
///
/// Absence of data and lost write races are not errors; they come back as
/// `Ok(None)` and `Ok(false)` respectively.
#[derive(Debug, Error)]
pub enum PasteboardError {
    /// The caller named a content kind that is not in the registry
    #[error("unknown pasteboard type: {0:?}")]
    UnknownKind(String),

    /// A text value was supplied for a binary content kind
    #[error("{kind} expects binary contents, got text")]
    KindMismatch { kind: ContentKind },

    /// Text payload bytes published under `format` were not valid UTF-8
    #[error("{format} payload is not valid UTF-8: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The OS clipboard service failed or is unavailable
    #[error("pasteboard service error: {0}")]
    Service(String),
}

impl PasteboardError {
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PasteboardError>;
