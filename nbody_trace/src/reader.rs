use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    iter::FusedIterator,
    path::Path,
    sync::Arc,
};

use crate::{TraceError, TraceRecord};

/// Lazily parses [TraceRecord]s from a line-oriented source.
///
/// Whitespace-only lines are skipped. The first error ends the iteration:
/// after yielding an `Err`, the reader only yields `None`.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_number: usize,
    failed: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| TraceError::OpenFailed {
            path: path.to_path_buf(),
            error: Arc::new(error),
        })?;
        tracing::info!("Reading trace from {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an already open reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            failed: false,
        }
    }

    /// The 1-based number of the last line read, or 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_record(&mut self) -> Option<Result<TraceRecord, TraceError>> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    return Some(Err(TraceError::ReadFailed {
                        line: self.line_number,
                        error: Arc::new(error),
                    }))
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(line.parse().map_err(|error| TraceError::Parse {
                line: self.line_number,
                error,
            }));
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.read_record();
        if matches!(result, Some(Err(_)) | None) {
            self.failed = true;
        }
        result
    }
}

impl<R: BufRead> FusedIterator for TraceReader<R> {}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::RecordParseError;

    fn reader(text: &str) -> TraceReader<Cursor<&str>> {
        TraceReader::new(Cursor::new(text))
    }

    #[test]
    fn test_reads_all_records() {
        let records: Vec<TraceRecord> = reader("1 9 0.5 0.5\n1 3 0.25 0.75\n2 9 0.5 0.6\n")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].iteration, 2.0);
        assert_eq!(records[1].mass, 3.0);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records: Vec<_> = reader("1 9 0.5 0.5").collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_skips_blank_lines() {
        let mut reader = reader("\n1 9 0.5 0.5\n   \n\n2 9 0.5 0.5\n");
        assert_eq!(reader.next().unwrap().unwrap().iteration, 1.0);
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next().unwrap().unwrap().iteration, 2.0);
        assert_eq!(reader.line_number(), 5);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_stops_after_first_error() {
        let mut reader = reader("1 9 0.5 0.5\n1 9 0.5\n1 9 0.5 0.5\n");
        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(TraceError::Parse {
                line: 2,
                error: RecordParseError::FieldCount { found: 3 },
            })) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_non_numeric_token_reports_line() {
        let error = reader("1 9 0.5 0.5\n2 9 x 0.5\n")
            .find_map(Result::err)
            .unwrap();
        assert_eq!(error.line(), Some(2));
        assert!(error.to_string().contains("\"x\""));
    }

    #[test]
    fn test_open_missing_file() {
        let path = std::env::temp_dir().join("nbody_trace_does_not_exist.txt");
        match TraceReader::open(&path) {
            Err(TraceError::OpenFailed { path: error_path, .. }) => assert_eq!(error_path, path),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
