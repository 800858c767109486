use crate::error::{PasteboardError, Result};
use crate::kind::{ContentKind, PayloadKind};

/// Clipboard contents in the shape selected by a [`ContentKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    /// Decode raw pasteboard bytes for `kind`
    ///
    /// Text stops at the first NUL byte. Whatever precedes it must be valid
    /// UTF-8, otherwise the read fails instead of returning the wrong text.
    pub fn decode(kind: ContentKind, bytes: Vec<u8>) -> Result<Self> {
        match kind.payload_kind() {
            PayloadKind::Binary => Ok(Payload::Bytes(bytes)),
            PayloadKind::Text => decode_text(kind.format_id(), &bytes).map(Payload::Text),
        }
    }

    /// Bytes to publish under `kind`
    ///
    /// Raw bytes are accepted for every kind and written verbatim.
    pub fn encode_for(&self, kind: ContentKind) -> Result<&[u8]> {
        match (self, kind.payload_kind()) {
            (Payload::Text(_), PayloadKind::Binary) => {
                Err(PasteboardError::KindMismatch { kind })
            }
            (Payload::Text(text), PayloadKind::Text) => Ok(text.as_bytes()),
            (Payload::Bytes(bytes), _) => Ok(bytes),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// UTF-8 text up to the first NUL of data published under `format`
pub(crate) fn decode_text(format: &'static str, bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end])
        .map(str::to_owned)
        .map_err(|source| PasteboardError::Decode { format, source })
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}
