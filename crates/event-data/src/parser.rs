//! Reader and writer for JSON-lines event files.
//!
//! One event per line:
//! `{"id":{"run":1,"event":7},"collections":{"hltL3MuonCandidates":[...]}}`
//!
//! Blank lines are skipped. Lines are parsed in parallel, so when several
//! lines are malformed any one of them may be the one reported.

use crate::error::{EventDataError, Result};
use crate::types::Event;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EventDataError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => EventDataError::IoError(e),
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse a single event line.
///
/// `file` and `line_no` only feed the error message.
pub fn parse_event_line(line: &str, file: &str, line_no: usize) -> Result<Event> {
    serde_json::from_str(line).map_err(|e| EventDataError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: e.to_string(),
    })
}

/// Parse every event in a JSON-lines file, preserving file order.
pub fn parse_events(path: &Path) -> Result<Vec<Event>> {
    let lines = read_lines(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    lines
        .par_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_event_line(line.trim(), &file_name, idx + 1))
        .collect()
}

/// Write events as JSON lines, one per event.
pub fn write_events(path: &Path, events: &[Event]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for event in events {
        let line = serde_json::to_string(event).map_err(|e| EventDataError::InvalidValue {
            field: "event".to_string(),
            value: format!("{} ({})", event.id, e),
        })?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{"id":{"run":1,"event":2},"collections":{"muons":[{"pt":10.0,"eta":0.5,"phi":0.1,"charge":-1,"d0":0.01,"dz":0.2,"valid_hits":12,"curvature_error":0.001,"curvature":0.1,"momentum":{"x":9.9,"y":1.0,"z":5.2}}]}}"#;

    #[test]
    fn test_parse_event_line() {
        let event = parse_event_line(LINE, "events.jsonl", 1).unwrap();
        assert_eq!(event.id.run, 1);
        assert_eq!(event.id.event, 2);

        let muons = event.get_by_label("muons").unwrap();
        assert_eq!(muons.len(), 1);
        assert_eq!(muons[0].valid_hits, 12);
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = parse_event_line("{not json", "events.jsonl", 42).unwrap_err();
        match err {
            EventDataError::ParseError { file, line, .. } => {
                assert_eq!(file, "events.jsonl");
                assert_eq!(line, 42);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_charge_rejected() {
        let bad = LINE.replace(r#""charge":-1"#, r#""charge":2"#);
        assert!(parse_event_line(&bad, "events.jsonl", 1).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_events(Path::new("/nonexistent/events.jsonl")).unwrap_err();
        assert!(matches!(err, EventDataError::FileNotFound { .. }));
    }
}
