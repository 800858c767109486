//! Registry of the content kinds a session can read and write

use std::fmt;
use std::str::FromStr;

use crate::error::PasteboardError;

/// Native identifier of the file URL format published by Finder and friends
pub const FILE_URL_FORMAT: &str = "public.file-url";

/// How a kind's bytes are handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Text,
    Binary,
}

/// Abstract clipboard representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    #[default]
    PlainText,
    RichText,
    Html,
    TabularText,
    Pdf,
    Png,
    Tiff,
}

impl ContentKind {
    pub const ALL: [ContentKind; 7] = [
        ContentKind::PlainText,
        ContentKind::RichText,
        ContentKind::Html,
        ContentKind::TabularText,
        ContentKind::Pdf,
        ContentKind::Png,
        ContentKind::Tiff,
    ];

    /// Native format identifier (UTI) for this kind
    pub const fn format_id(self) -> &'static str {
        match self {
            ContentKind::PlainText => "public.utf8-plain-text",
            ContentKind::RichText => "public.rtf",
            ContentKind::Html => "public.html",
            ContentKind::TabularText => "public.utf8-tab-separated-values-text",
            ContentKind::Pdf => "com.adobe.pdf",
            ContentKind::Png => "public.png",
            ContentKind::Tiff => "public.tiff",
        }
    }

    pub const fn payload_kind(self) -> PayloadKind {
        match self {
            ContentKind::PlainText
            | ContentKind::RichText
            | ContentKind::Html
            | ContentKind::TabularText => PayloadKind::Text,
            ContentKind::Pdf | ContentKind::Png | ContentKind::Tiff => PayloadKind::Binary,
        }
    }

    pub const fn is_text(self) -> bool {
        matches!(self.payload_kind(), PayloadKind::Text)
    }

    /// Reverse lookup; unknown identifiers have no kind
    pub fn from_format_id(format_id: &str) -> Option<ContentKind> {
        Self::ALL.into_iter().find(|kind| kind.format_id() == format_id)
    }

    /// Short name used on the command line and in config files
    pub const fn name(self) -> &'static str {
        match self {
            ContentKind::PlainText => "text",
            ContentKind::RichText => "rtf",
            ContentKind::Html => "html",
            ContentKind::TabularText => "tsv",
            ContentKind::Pdf => "pdf",
            ContentKind::Png => "png",
            ContentKind::Tiff => "tiff",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PasteboardType {}>", self.format_id())
    }
}

impl FromStr for ContentKind {
    type Err = PasteboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let kind = match lowered.as_str() {
            "text" | "plain" | "string" => ContentKind::PlainText,
            "rtf" | "rich" => ContentKind::RichText,
            "html" => ContentKind::Html,
            "tsv" | "tabular" => ContentKind::TabularText,
            "pdf" => ContentKind::Pdf,
            "png" => ContentKind::Png,
            "tiff" => ContentKind::Tiff,
            other => {
                return ContentKind::from_format_id(other)
                    .ok_or_else(|| PasteboardError::UnknownKind(s.to_string()))
            }
        };
        Ok(kind)
    }
}
