//! Typed, change-aware access to the system clipboard
//!
//! A [`Session`] reads and writes the clipboard through a
//! [`PasteboardService`] backend, selecting the representation with a
//! [`ContentKind`]. Diff reads use the clipboard's global change counter to
//! return each change at most once per session.

pub mod error;
pub mod kind;
pub mod memory;
pub mod payload;
pub mod service;
pub mod session;

pub use error::{PasteboardError, Result};
pub use kind::{ContentKind, PayloadKind, FILE_URL_FORMAT};
pub use memory::MemoryPasteboard;
pub use payload::Payload;
pub use service::PasteboardService;
pub use session::Session;
