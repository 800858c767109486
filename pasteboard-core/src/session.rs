use log::{debug, trace, warn};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::Result;
use crate::kind::{ContentKind, FILE_URL_FORMAT};
use crate::payload::{decode_text, Payload};
use crate::service::PasteboardService;

/// Last-seen value before the session has looked at the clipboard
const NEVER_OBSERVED: i64 = i64::MIN;

/// Stateful handle onto the system clipboard
///
/// The only state is the change count this session last observed, which
/// drives diff reads. Sessions never coordinate with each other, so a diff
/// read on one does not hide a change from another.
pub struct Session<S> {
    service: S,
    last_seen: AtomicI64,
}

impl<S: PasteboardService> Session<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            last_seen: AtomicI64::new(NEVER_OBSERVED),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current global change count of the clipboard
    pub fn change_count(&self) -> Result<i64> {
        self.service.change_count()
    }

    /// Change count recorded by the last read, `None` before the first one
    pub fn last_seen(&self) -> Option<i64> {
        match self.last_seen.load(Ordering::SeqCst) {
            NEVER_OBSERVED => None,
            count => Some(count),
        }
    }

    /// Read the clipboard as `kind`
    ///
    /// With `diff` set, returns `None` when the clipboard has not changed
    /// since this session's previous read. Every read records the current
    /// change count, including non-diff reads and reads that find nothing.
    pub fn get(&self, kind: ContentKind, diff: bool) -> Result<Option<Payload>> {
        if !self.observe(diff)? {
            return Ok(None);
        }

        let Some(bytes) = self.service.data_for_format(0, kind.format_id())? else {
            trace!("No {} data on the pasteboard", kind);
            return Ok(None);
        };

        debug!("Read {} bytes as {}", bytes.len(), kind);
        Payload::decode(kind, bytes).map(Some)
    }

    /// Replace the clipboard with `contents` published as `kind`
    ///
    /// Returns `false` if another application took the clipboard between
    /// clearing and writing. Text for a binary kind is rejected before the
    /// clipboard is touched.
    pub fn set(&self, contents: impl Into<Payload>, kind: ContentKind) -> Result<bool> {
        let contents = contents.into();
        let bytes = contents.encode_for(kind)?;

        let cleared_at = self.service.clear_contents()?;
        let written = self.service.write_data(bytes, kind.format_id())?;
        if written {
            debug!("Wrote {} bytes as {} (change count {})", bytes.len(), kind, cleared_at);
        } else {
            warn!("Lost pasteboard ownership before writing {}", kind);
        }
        Ok(written)
    }

    /// File URLs on the clipboard, in item order
    ///
    /// Present only when the first item publishes `public.file-url`. Diff
    /// handling matches [`Session::get`].
    pub fn file_urls(&self, diff: bool) -> Result<Option<Vec<String>>> {
        if !self.observe(diff)? {
            return Ok(None);
        }

        let items = self.service.data_for_all_items(FILE_URL_FORMAT)?;
        if !matches!(items.first(), Some(Some(_))) {
            return Ok(None);
        }

        let urls = items
            .iter()
            .flatten()
            .map(|bytes| decode_text(FILE_URL_FORMAT, bytes))
            .collect::<Result<Vec<_>>>()?;
        debug!("Read {} file URLs", urls.len());
        Ok(Some(urls))
    }

    /// Registered kinds published by the first item, in the item's order
    ///
    /// Does not count as a read for diff purposes.
    pub fn available_kinds(&self) -> Result<Vec<ContentKind>> {
        let formats = self.service.available_formats(0)?;
        let mut kinds = Vec::new();
        for kind in formats.iter().filter_map(|f| ContentKind::from_format_id(f)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    /// Record the current change count; `false` when a diff read should stop
    ///
    /// The stored count only moves forward, so a call that read a stale count
    /// cannot reopen a change another thread already delivered.
    fn observe(&self, diff: bool) -> Result<bool> {
        let current = self.service.change_count()?;
        let previous = self.last_seen.fetch_max(current, Ordering::SeqCst);
        if diff && previous >= current {
            trace!("Pasteboard unchanged at change count {}", current);
            return Ok(false);
        }
        Ok(true)
    }
}

impl<S: PasteboardService + Default> Default for Session<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
