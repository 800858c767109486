//! macOS backend for `pasteboard-core`, backed by the `NSPasteboard`
//! general pasteboard.

#[cfg(target_os = "macos")]
mod general;

#[cfg(target_os = "macos")]
pub use general::GeneralPasteboard;
