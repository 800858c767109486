use anyhow::Context;
use log::{info, warn};
use pasteboard_core::{ContentKind, Payload, PasteboardService, Session};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

/// How a command finished, mapped to the process exit code by `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    /// Nothing matched the request
    Empty,
    /// Another application replaced the pasteboard mid-write
    Contended,
}

pub fn get<S: PasteboardService>(
    session: &Session<S>,
    kind: ContentKind,
    diff: bool,
    output: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    let Some(payload) = session.get(kind, diff)? else {
        return Ok(Status::Empty);
    };

    match output {
        Some(path) => std::fs::write(path, payload.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?,
        None => match &payload {
            Payload::Text(text) => writeln!(out, "{}", text)?,
            Payload::Bytes(bytes) => out.write_all(bytes)?,
        },
    }
    out.flush()?;
    Ok(Status::Done)
}

pub fn set<S: PasteboardService>(
    session: &Session<S>,
    kind: ContentKind,
    text: Option<String>,
    input: Option<&Path>,
    stdin: &mut impl Read,
) -> anyhow::Result<Status> {
    let payload = match (text, input) {
        (Some(text), _) => Payload::Text(text),
        (None, Some(path)) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            raw_payload(kind, bytes)
        }
        (None, None) => {
            let mut bytes = Vec::new();
            stdin.read_to_end(&mut bytes).context("reading stdin")?;
            raw_payload(kind, bytes)
        }
    };

    if session.set(payload, kind)? {
        Ok(Status::Done)
    } else {
        Ok(Status::Contended)
    }
}

/// Text kinds keep valid UTF-8 as text; anything else goes out verbatim
fn raw_payload(kind: ContentKind, bytes: Vec<u8>) -> Payload {
    if !kind.is_text() {
        return Payload::Bytes(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(text) => Payload::Text(text),
        Err(e) => Payload::Bytes(e.into_bytes()),
    }
}

pub fn files<S: PasteboardService>(
    session: &Session<S>,
    diff: bool,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    let Some(urls) = session.file_urls(diff)? else {
        return Ok(Status::Empty);
    };
    for url in urls {
        writeln!(out, "{}", url)?;
    }
    Ok(Status::Done)
}

pub fn kinds<S: PasteboardService>(
    session: &Session<S>,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    let kinds = session.available_kinds()?;
    if kinds.is_empty() {
        return Ok(Status::Empty);
    }
    for kind in kinds {
        writeln!(out, "{:<5} {}", kind.name(), kind)?;
    }
    Ok(Status::Done)
}

/// Print a new value if the pasteboard changed; returns whether it did
pub fn poll<S: PasteboardService>(
    session: &Session<S>,
    kind: ContentKind,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let Some(payload) = session.get(kind, true)? else {
        return Ok(false);
    };
    match payload {
        Payload::Text(text) => writeln!(out, "{}", text)?,
        Payload::Bytes(bytes) => writeln!(out, "{}: {} bytes", kind, bytes.len())?,
    }
    out.flush()?;
    Ok(true)
}

/// Record the current pasteboard as seen without printing it
///
/// Contents that fail to decode still count as seen; the watch goes on.
fn mark_seen<S: PasteboardService>(session: &Session<S>, kind: ContentKind) {
    if let Err(e) = session.get(kind, false) {
        warn!("Could not read current pasteboard: {:#}", e);
    }
}

pub async fn watch<S: PasteboardService>(
    session: &Session<S>,
    kind: ContentKind,
    interval: Duration,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    info!("Watching pasteboard for {} every {:?}", kind, interval);

    mark_seen(session, kind);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = poll(session, kind, &mut *out) {
                    warn!("Pasteboard read failed: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching");
                return Ok(Status::Done);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasteboard_core::{MemoryPasteboard, FILE_URL_FORMAT};

    fn session() -> (MemoryPasteboard, Session<MemoryPasteboard>) {
        let pb = MemoryPasteboard::new();
        (pb.clone(), Session::new(pb))
    }

    #[test]
    fn test_get_prints_text() {
        let (pb, session) = session();
        pb.external_write(ContentKind::PlainText.format_id(), "hello");

        let mut out = Vec::new();
        let status = get(&session, ContentKind::PlainText, false, None, &mut out).unwrap();
        assert_eq!(status, Status::Done);
        assert_eq!(out, b"hello\n");

        let mut out = Vec::new();
        let status = get(&session, ContentKind::PlainText, true, None, &mut out).unwrap();
        assert_eq!(status, Status::Empty);
        assert!(out.is_empty());
    }

    #[test]
    fn test_get_writes_binary_to_file() {
        let (pb, session) = session();
        pb.external_write(ContentKind::Png.format_id(), vec![0x89, b'P', b'N', b'G']);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut out = Vec::new();
        let status =
            get(&session, ContentKind::Png, false, Some(path.as_path()), &mut out).unwrap();
        assert_eq!(status, Status::Done);
        assert!(out.is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_set_from_argument_and_stdin() {
        let (pb, session) = session();
        let text = Some("<b>x</b>".to_string());
        let status = set(&session, ContentKind::Html, text, None, &mut &b""[..]).unwrap();
        assert_eq!(status, Status::Done);
        assert_eq!(
            pb.data_for_format(0, ContentKind::Html.format_id()).unwrap(),
            Some(b"<b>x</b>".to_vec())
        );

        let mut stdin = &[0xffu8, 0x00, 0x10][..];
        let status = set(&session, ContentKind::Tiff, None, None, &mut stdin).unwrap();
        assert_eq!(status, Status::Done);
        assert_eq!(
            pb.data_for_format(0, ContentKind::Tiff.format_id()).unwrap(),
            Some(vec![0xff, 0x00, 0x10])
        );
    }

    #[test]
    fn test_set_text_argument_for_binary_kind_fails() {
        let (pb, session) = session();
        let result = set(&session, ContentKind::Png, Some("hi".into()), None, &mut &b""[..]);
        assert!(result.is_err());
        assert_eq!(pb.change_count().unwrap(), 0);
    }

    #[test]
    fn test_set_reports_contention() {
        let (pb, session) = session();
        pb.race_next_write(ContentKind::PlainText.format_id(), "other app");
        let text = Some("mine".to_string());
        let status = set(&session, ContentKind::PlainText, text, None, &mut &b""[..]).unwrap();
        assert_eq!(status, Status::Contended);
    }

    #[test]
    fn test_raw_payload_keeps_invalid_utf8_verbatim() {
        assert_eq!(
            raw_payload(ContentKind::PlainText, b"ok".to_vec()),
            Payload::Text("ok".to_string())
        );
        assert_eq!(
            raw_payload(ContentKind::RichText, vec![0xc3, 0x28]),
            Payload::Bytes(vec![0xc3, 0x28])
        );
    }

    #[test]
    fn test_files_and_kinds() {
        let (pb, session) = session();
        pb.external_write_items(vec![
            vec![
                (FILE_URL_FORMAT, b"file:///a".to_vec()),
                (ContentKind::PlainText.format_id(), b"a".to_vec()),
            ],
            vec![(FILE_URL_FORMAT, b"file:///b".to_vec())],
        ]);

        let mut out = Vec::new();
        assert_eq!(files(&session, false, &mut out).unwrap(), Status::Done);
        assert_eq!(String::from_utf8(out).unwrap(), "file:///a\nfile:///b\n");

        let mut out = Vec::new();
        assert_eq!(kinds(&session, &mut out).unwrap(), Status::Done);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "text  <PasteboardType public.utf8-plain-text>\n"
        );

        pb.external_clear();
        let mut out = Vec::new();
        assert_eq!(files(&session, true, &mut out).unwrap(), Status::Empty);
        assert_eq!(kinds(&session, &mut out).unwrap(), Status::Empty);
    }

    #[test]
    fn test_poll_prints_each_change_once() {
        let (pb, session) = session();
        let mut out = Vec::new();

        pb.external_write(ContentKind::PlainText.format_id(), "first");
        assert!(poll(&session, ContentKind::PlainText, &mut out).unwrap());
        assert!(!poll(&session, ContentKind::PlainText, &mut out).unwrap());

        pb.external_write(ContentKind::Png.format_id(), vec![1, 2, 3]);
        assert!(poll(&session, ContentKind::Png, &mut out).unwrap());

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "first\n<PasteboardType public.png>: 3 bytes\n"
        );
    }

    #[test]
    fn test_undecodable_start_is_still_marked_seen() {
        let (pb, session) = session();
        pb.external_write(ContentKind::PlainText.format_id(), vec![b'x', 0xc3, 0x28]);

        mark_seen(&session, ContentKind::PlainText);
        assert_eq!(session.last_seen(), Some(1));

        let mut out = Vec::new();
        assert!(!poll(&session, ContentKind::PlainText, &mut out).unwrap());
        assert!(out.is_empty());

        pb.external_write(ContentKind::PlainText.format_id(), "fixed");
        assert!(poll(&session, ContentKind::PlainText, &mut out).unwrap());
        assert_eq!(out, b"fixed\n");
    }
}
