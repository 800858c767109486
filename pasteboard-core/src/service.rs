//! Boundary to the OS clipboard service
//!
//! A session only needs the handful of operations below. Platform crates
//! implement them over the native API; [`crate::MemoryPasteboard`] implements
//! them in process for tests.

use std::sync::Arc;

use crate::error::Result;

/// Capabilities a session requires from the system clipboard
pub trait PasteboardService: Send + Sync {
    /// Global change counter, bumped on every write by any process
    fn change_count(&self) -> Result<i64>;

    /// Number of items currently on the clipboard
    fn item_count(&self) -> Result<usize>;

    /// Format identifiers published by the item at `item`
    fn available_formats(&self, item: usize) -> Result<Vec<String>>;

    /// Raw data for `format` on the item at `item`, if published
    fn data_for_format(&self, item: usize, format: &str) -> Result<Option<Vec<u8>>>;

    /// Data for `format` on every item, in item order
    ///
    /// Backends override this to read all items from one snapshot of the
    /// clipboard. The provided version reads item by item and can mix two
    /// clipboards if another process writes in between.
    fn data_for_all_items(&self, format: &str) -> Result<Vec<Option<Vec<u8>>>> {
        (0..self.item_count()?)
            .map(|item| self.data_for_format(item, format))
            .collect()
    }

    /// Drop all items and take ownership for writing
    ///
    /// Returns the change count after clearing.
    fn clear_contents(&self) -> Result<i64>;

    /// Publish `bytes` under `format`
    ///
    /// `Ok(false)` means another writer replaced the clipboard after our
    /// `clear_contents`.
    fn write_data(&self, bytes: &[u8], format: &str) -> Result<bool>;
}

macro_rules! forward_service {
    ($($ty:ty),*) => {$(
        impl<T: PasteboardService + ?Sized> PasteboardService for $ty {
            fn change_count(&self) -> Result<i64> {
                (**self).change_count()
            }

            fn item_count(&self) -> Result<usize> {
                (**self).item_count()
            }

            fn available_formats(&self, item: usize) -> Result<Vec<String>> {
                (**self).available_formats(item)
            }

            fn data_for_format(&self, item: usize, format: &str) -> Result<Option<Vec<u8>>> {
                (**self).data_for_format(item, format)
            }

            fn data_for_all_items(&self, format: &str) -> Result<Vec<Option<Vec<u8>>>> {
                (**self).data_for_all_items(format)
            }

            fn clear_contents(&self) -> Result<i64> {
                (**self).clear_contents()
            }

            fn write_data(&self, bytes: &[u8], format: &str) -> Result<bool> {
                (**self).write_data(bytes, format)
            }
        }
    )*};
}

forward_service!(&T, Box<T>, Arc<T>);
