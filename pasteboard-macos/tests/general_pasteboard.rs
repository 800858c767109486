//! Exercises the real general pasteboard; these tests overwrite the clipboard.
#![cfg(target_os = "macos")]

use pasteboard_core::{ContentKind, Payload, Session};
use pasteboard_macos::GeneralPasteboard;
use serial_test::serial;

#[test]
#[serial]
fn test_text_round_trip() {
    let session = Session::new(GeneralPasteboard::new());
    assert!(session.set("pasteboard round trip", ContentKind::PlainText).unwrap());
    assert_eq!(
        session.get(ContentKind::PlainText, false).unwrap(),
        Some(Payload::Text("pasteboard round trip".to_string()))
    );
}

#[test]
#[serial]
fn test_diff_after_own_write() {
    let session = Session::new(GeneralPasteboard::new());
    assert!(session.set("\u{1f385}", ContentKind::PlainText).unwrap());
    assert_eq!(
        session.get(ContentKind::PlainText, true).unwrap(),
        Some(Payload::Text("\u{1f385}".to_string()))
    );
    assert_eq!(session.get(ContentKind::PlainText, true).unwrap(), None);
}

#[test]
#[serial]
fn test_null_truncation_and_no_file_urls() {
    let session = Session::new(GeneralPasteboard::new());
    assert!(session.set("abc\0def", ContentKind::PlainText).unwrap());
    assert_eq!(
        session.get(ContentKind::PlainText, false).unwrap(),
        Some(Payload::Text("abc".to_string()))
    );
    assert_eq!(session.file_urls(false).unwrap(), None);
    assert_eq!(session.file_urls(true).unwrap(), None);
}

#[test]
#[serial]
fn test_every_kind_round_trips() {
    let session = Session::new(GeneralPasteboard::new());
    for kind in ContentKind::ALL {
        let payload = if kind.is_text() {
            Payload::Text(format!("contents for {}", kind.name()))
        } else {
            Payload::Bytes(vec![0, 1, 2, 254, 255])
        };
        assert!(session.set(payload.clone(), kind).unwrap());
        assert_eq!(session.get(kind, false).unwrap(), Some(payload));
        assert_eq!(session.get(kind, true).unwrap(), None);
        assert!(session.available_kinds().unwrap().contains(&kind));
    }
}

#[test]
#[serial]
fn test_change_count_moves_on_write() {
    let session = Session::new(GeneralPasteboard::new());
    let before = session.change_count().unwrap();
    assert!(session.set("tick", ContentKind::PlainText).unwrap());
    assert!(session.change_count().unwrap() > before);
}
