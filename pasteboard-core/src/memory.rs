use log::trace;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::Result;
use crate::service::PasteboardService;

type Item = Vec<(String, Vec<u8>)>;

#[derive(Debug, Default)]
struct State {
    change_count: i64,
    items: Vec<Item>,
    /// Change count at which the last `clear_contents` took ownership
    owner: Option<i64>,
    /// Write that lands right after the next clear, stealing ownership
    interloper: Option<Vec<Item>>,
}

impl State {
    fn replace(&mut self, items: Vec<Item>) {
        self.change_count += 1;
        self.items = items;
        self.owner = None;
    }
}

/// In-process clipboard with the same semantics as the system pasteboard
///
/// Clones share one clipboard, the way every process on a machine shares the
/// real one. Helpers prefixed `external_` stand in for other applications.
#[derive(Debug, Clone, Default)]
pub struct MemoryPasteboard {
    state: Arc<Mutex<State>>,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another application replaces the clipboard with a single item
    pub fn external_write(&self, format: &str, bytes: impl Into<Vec<u8>>) {
        self.external_write_items(vec![vec![(format.to_string(), bytes.into())]]);
    }

    /// Another application replaces the clipboard with several items
    pub fn external_write_items<F>(&self, items: Vec<Vec<(F, Vec<u8>)>>)
    where
        F: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|item| item.into_iter().map(|(f, b)| (f.into(), b)).collect())
            .collect();
        let mut state = self.state.lock();
        state.replace(items);
        trace!("External write, change count now {}", state.change_count);
    }

    /// Another application clears the clipboard
    pub fn external_clear(&self) {
        self.state.lock().replace(Vec::new());
    }

    /// Make the next writer lose the race between clear and write
    ///
    /// `format`/`bytes` is what the competing application leaves behind.
    pub fn race_next_write(&self, format: &str, bytes: impl Into<Vec<u8>>) {
        self.state.lock().interloper = Some(vec![vec![(format.to_string(), bytes.into())]]);
    }
}

impl PasteboardService for MemoryPasteboard {
    fn change_count(&self) -> Result<i64> {
        Ok(self.state.lock().change_count)
    }

    fn item_count(&self) -> Result<usize> {
        Ok(self.state.lock().items.len())
    }

    fn available_formats(&self, item: usize) -> Result<Vec<String>> {
        let state = self.state.lock();
        Ok(state
            .items
            .get(item)
            .map(|entries| entries.iter().map(|(format, _)| format.clone()).collect())
            .unwrap_or_default())
    }

    fn data_for_format(&self, item: usize, format: &str) -> Result<Option<Vec<u8>>> {
        let state = self.state.lock();
        Ok(state.items.get(item).and_then(|entries| {
            entries
                .iter()
                .find(|(f, _)| f == format)
                .map(|(_, bytes)| bytes.clone())
        }))
    }

    fn data_for_all_items(&self, format: &str) -> Result<Vec<Option<Vec<u8>>>> {
        let state = self.state.lock();
        Ok(state
            .items
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .find(|(f, _)| f == format)
                    .map(|(_, bytes)| bytes.clone())
            })
            .collect())
    }

    fn clear_contents(&self) -> Result<i64> {
        let mut state = self.state.lock();
        state.replace(Vec::new());
        let cleared_at = state.change_count;
        state.owner = Some(cleared_at);

        if let Some(items) = state.interloper.take() {
            state.replace(items);
        }
        Ok(cleared_at)
    }

    fn write_data(&self, bytes: &[u8], format: &str) -> Result<bool> {
        let mut state = self.state.lock();
        if state.owner != Some(state.change_count) {
            return Ok(false);
        }

        if state.items.is_empty() {
            state.items.push(Vec::new());
        }
        let item = &mut state.items[0];
        match item.iter_mut().find(|(f, _)| f == format) {
            Some(entry) => entry.1 = bytes.to_vec(),
            None => item.push((format.to_string(), bytes.to_vec())),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_bumps_count_write_does_not() {
        let pb = MemoryPasteboard::new();
        assert_eq!(pb.change_count().unwrap(), 0);

        let cleared = pb.clear_contents().unwrap();
        assert_eq!(cleared, 1);
        assert!(pb.write_data(b"hi", "public.utf8-plain-text").unwrap());
        assert_eq!(pb.change_count().unwrap(), 1);
        assert_eq!(pb.item_count().unwrap(), 1);
        assert_eq!(
            pb.data_for_format(0, "public.utf8-plain-text").unwrap(),
            Some(b"hi".to_vec())
        );
    }

    #[test]
    fn test_write_without_ownership_fails() {
        let pb = MemoryPasteboard::new();
        assert!(!pb.write_data(b"x", "public.png").unwrap());

        pb.clear_contents().unwrap();
        pb.external_write("public.html", "<p>");
        assert!(!pb.write_data(b"x", "public.png").unwrap());
        assert_eq!(pb.available_formats(0).unwrap(), vec!["public.html".to_string()]);
    }

    #[test]
    fn test_raced_write_leaves_interloper_contents() {
        let pb = MemoryPasteboard::new();
        pb.race_next_write("public.rtf", "{\\rtf1}");

        pb.clear_contents().unwrap();
        assert!(!pb.write_data(b"mine", "public.utf8-plain-text").unwrap());
        assert_eq!(pb.change_count().unwrap(), 2);
        assert_eq!(pb.data_for_format(0, "public.rtf").unwrap(), Some(b"{\\rtf1}".to_vec()));
        assert_eq!(pb.data_for_format(0, "public.utf8-plain-text").unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let a = MemoryPasteboard::new();
        let b = a.clone();
        a.external_write_items(vec![
            vec![("public.file-url", b"file:///a".to_vec())],
            vec![("public.file-url", b"file:///b".to_vec())],
        ]);
        assert_eq!(b.item_count().unwrap(), 2);
        assert_eq!(
            b.data_for_all_items("public.file-url").unwrap(),
            vec![Some(b"file:///a".to_vec()), Some(b"file:///b".to_vec())]
        );
        assert_eq!(b.available_formats(5).unwrap(), Vec::<String>::new());

        b.external_clear();
        assert_eq!(a.item_count().unwrap(), 0);
        assert_eq!(a.change_count().unwrap(), 2);
    }
}
