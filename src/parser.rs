//! Line parser and filter for data files
//!
//! Reads a file line by line, parses every non-empty line as a base-10
//! signed integer and forwards values accepted by the predicate to the
//! [`NumberSet`]. A malformed line, including one that is not valid UTF-8,
//! is fatal for the whole run.

use crate::aggregate::NumberSet;
use crate::error::{FormatError, LineError, NumsiftError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Counts gathered while parsing one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Non-empty lines parsed
    pub lines: u64,
    /// Values accepted by the predicate (before deduplication)
    pub accepted: u64,
    /// Values that were new to the set
    pub inserted: u64,
    /// Bytes read, including line terminators
    pub bytes: u64,
}

/// Parse a data file, inserting accepted values into `numbers`
///
/// The file handle lives only for the duration of this call.
pub fn parse_file<P>(path: &Path, predicate: &P, numbers: &mut NumberSet) -> Result<FileStats>
where
    P: Fn(i64) -> bool + ?Sized,
{
    let file = File::open(path).map_err(|e| NumsiftError::io(path, e))?;
    parse_reader(BufReader::new(file), path, predicate, numbers)
}

/// Parse already-open input; `path` is only used for error context
pub fn parse_reader<R, P>(
    mut reader: R,
    path: &Path,
    predicate: &P,
    numbers: &mut NumberSet,
) -> Result<FileStats>
where
    R: BufRead,
    P: Fn(i64) -> bool + ?Sized,
{
    let mut stats = FileStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| NumsiftError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        stats.bytes += read as u64;

        let text = std::str::from_utf8(&buf)
            .map_err(|e| {
                format_error(path, line_no, String::from_utf8_lossy(&buf).trim(), e)
            })?
            .trim();
        if text.is_empty() {
            continue;
        }

        let value = text
            .parse::<i64>()
            .map_err(|e| format_error(path, line_no, text, e))?;
        stats.lines += 1;

        if predicate(value) {
            stats.accepted += 1;
            if numbers.insert(value) {
                stats.inserted += 1;
            }
        }
    }

    Ok(stats)
}

fn format_error(
    path: &Path,
    line: usize,
    content: &str,
    source: impl Into<LineError>,
) -> NumsiftError {
    FormatError {
        path: path.to_path_buf(),
        line,
        content: content.to_string(),
        source: source.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    fn parse(input: &str, predicate: impl Fn(i64) -> bool) -> Result<(NumberSet, FileStats)> {
        parse_bytes(input.as_bytes(), predicate)
    }

    fn parse_bytes(
        input: &[u8],
        predicate: impl Fn(i64) -> bool,
    ) -> Result<(NumberSet, FileStats)> {
        let mut numbers = NumberSet::new();
        let stats = parse_reader(
            Cursor::new(input),
            Path::new("mem.txt"),
            &predicate,
            &mut numbers,
        )?;
        Ok((numbers, stats))
    }

    #[test]
    fn test_filters_and_dedups() {
        let (numbers, stats) = parse("7\n11\n11\n4\n15\n", |v| v % 4 == 3).unwrap();
        assert_eq!(numbers.iter().collect::<Vec<_>>(), vec![15, 11, 7]);
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.accepted, 4);
        assert_eq!(stats.inserted, 3);
        assert_eq!(stats.bytes, 13);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let (numbers, stats) = parse("1\r\n\r\n-2\r\n\n+3", |_| true).unwrap();
        assert_eq!(numbers.iter().collect::<Vec<_>>(), vec![3, 1, -2]);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let err = parse("1\n2\nabc\n4\n", |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        match err {
            NumsiftError::Format(e) => {
                assert_eq!(e.line, 3);
                assert_eq!(e.content, "abc");
                assert_eq!(e.path, Path::new("mem.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let err = parse_bytes(b"7\n\xff\xfe\n", |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        match err {
            NumsiftError::Format(e) => {
                assert_eq!(e.line, 2);
                assert!(matches!(e.source, LineError::Utf8(_)));
                assert_eq!(e.content, "\u{FFFD}\u{FFFD}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overflow_is_format_error() {
        let err = parse("99999999999999999999\n", |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_rejected_values_leave_no_trace() {
        let (numbers, stats) = parse("2\n4\n6\n", |v| v % 2 == 1).unwrap();
        assert!(numbers.is_empty());
        assert_eq!(stats.accepted, 0);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut numbers = NumberSet::new();
        let err = parse_file(Path::new("/nonexistent/numsift.txt"), &|_| true, &mut numbers)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.path(), Some(Path::new("/nonexistent/numsift.txt")));
    }
}
