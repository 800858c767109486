use cocoa::base::{id, nil, BOOL, NO};
use cocoa::foundation::{NSArray, NSAutoreleasePool, NSData, NSString};
use log::{debug, trace};
use objc::{class, msg_send, sel, sel_impl};
use pasteboard_core::{PasteboardError, PasteboardService, Result};
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

/// The system-wide general pasteboard (`+[NSPasteboard generalPasteboard]`)
///
/// Holds no state; every call looks the pasteboard up again, so values can
/// be created freely and shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralPasteboard;

impl GeneralPasteboard {
    pub fn new() -> Self {
        Self
    }
}

/// Run `f` inside a fresh autorelease pool
fn with_pool<T>(f: impl FnOnce() -> T) -> T {
    unsafe {
        let pool = NSAutoreleasePool::new(nil);
        let result = f();
        pool.drain();
        result
    }
}

unsafe fn general_pasteboard() -> Result<id> {
    let pasteboard: id = msg_send![class!(NSPasteboard), generalPasteboard];
    if pasteboard == nil {
        return Err(PasteboardError::service("general pasteboard is unavailable"));
    }
    Ok(pasteboard)
}

/// Autoreleased NSString copy of `s`
unsafe fn ns_string(s: &str) -> id {
    NSString::alloc(nil).init_str(s).autorelease()
}

unsafe fn rust_string(s: id) -> String {
    let ptr: *const c_char = s.UTF8String();
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

unsafe fn data_bytes(data: id) -> Vec<u8> {
    let len = data.length() as usize;
    let ptr = data.bytes() as *const u8;
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len).to_vec()
}

/// The pasteboard item at `index`, or nil if there is none
unsafe fn item_at(pasteboard: id, index: usize) -> id {
    let items: id = msg_send![pasteboard, pasteboardItems];
    if items == nil || index as u64 >= items.count() {
        return nil;
    }
    items.objectAtIndex(index as u64)
}

impl PasteboardService for GeneralPasteboard {
    fn change_count(&self) -> Result<i64> {
        with_pool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let count: i64 = msg_send![pasteboard, changeCount];
            Ok(count)
        })
    }

    fn item_count(&self) -> Result<usize> {
        with_pool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let items: id = msg_send![pasteboard, pasteboardItems];
            if items == nil {
                return Ok(0);
            }
            Ok(items.count() as usize)
        })
    }

    fn available_formats(&self, item: usize) -> Result<Vec<String>> {
        with_pool(|| unsafe {
            let item = item_at(general_pasteboard()?, item);
            if item == nil {
                return Ok(Vec::new());
            }

            let types: id = msg_send![item, types];
            if types == nil {
                return Ok(Vec::new());
            }
            let formats = (0..types.count())
                .map(|i| rust_string(types.objectAtIndex(i)))
                .collect::<Vec<_>>();
            trace!("Pasteboard item publishes {:?}", formats);
            Ok(formats)
        })
    }

    fn data_for_format(&self, item: usize, format: &str) -> Result<Option<Vec<u8>>> {
        with_pool(|| unsafe {
            let item = item_at(general_pasteboard()?, item);
            if item == nil {
                return Ok(None);
            }

            let data: id = msg_send![item, dataForType: ns_string(format)];
            if data == nil {
                return Ok(None);
            }
            Ok(Some(data_bytes(data)))
        })
    }

    fn data_for_all_items(&self, format: &str) -> Result<Vec<Option<Vec<u8>>>> {
        with_pool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let items: id = msg_send![pasteboard, pasteboardItems];
            if items == nil {
                return Ok(Vec::new());
            }

            let format = ns_string(format);
            let data = (0..items.count())
                .map(|i| {
                    let data: id = msg_send![items.objectAtIndex(i), dataForType: format];
                    (data != nil).then(|| data_bytes(data))
                })
                .collect();
            Ok(data)
        })
    }

    fn clear_contents(&self) -> Result<i64> {
        with_pool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let count: i64 = msg_send![pasteboard, clearContents];
            debug!("Cleared general pasteboard, change count {}", count);
            Ok(count)
        })
    }

    fn write_data(&self, bytes: &[u8], format: &str) -> Result<bool> {
        with_pool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let data: id = NSData::dataWithBytes_length_(
                nil,
                bytes.as_ptr() as *const c_void,
                bytes.len() as u64,
            );
            if data == nil {
                return Err(PasteboardError::service("could not allocate NSData"));
            }

            let accepted: BOOL = msg_send![pasteboard, setData: data forType: ns_string(format)];
            Ok(accepted != NO)
        })
    }
}
