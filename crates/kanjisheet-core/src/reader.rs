use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use kanjisheet_types::{InputRecord, KEY_COLUMN};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot open input: {0}")]
    Open(#[source] csv::Error),

    #[error("cannot read header row: {0}")]
    Header(#[source] csv::Error),

    #[error("header has no `kanji` column")]
    MissingKeyColumn,

    #[error("row {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("{count} unparsable row(s), first at row {line}: {source}")]
    BadRows {
        count: usize,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Iterates data rows of a delimited file with a header row
pub struct InputReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    key_index: usize,
    line: u64,
    done: bool,
}

impl InputReader<File> {
    pub fn open(path: &Path, delimiter: u8) -> Result<Self, ReadError> {
        let reader = builder(delimiter)
            .from_path(path)
            .map_err(ReadError::Open)?;
        Self::with_reader(reader)
    }
}

impl<R: io::Read> InputReader<R> {
    pub fn from_reader(rdr: R, delimiter: u8) -> Result<Self, ReadError> {
        Self::with_reader(builder(delimiter).from_reader(rdr))
    }

    fn with_reader(mut reader: csv::Reader<R>) -> Result<Self, ReadError> {
        let headers = reader.headers().map_err(ReadError::Header)?.clone();

        let key_index = headers
            .iter()
            .position(|h| h == KEY_COLUMN)
            .ok_or(ReadError::MissingKeyColumn)?;

        Ok(Self {
            reader,
            headers,
            key_index,
            line: 0,
            done: false,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    fn to_input(&self, row: &StringRecord) -> InputRecord {
        let kanji = row.get(self.key_index).unwrap_or_default().to_string();
        let columns = self
            .headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();

        InputRecord {
            line: self.line,
            kanji,
            columns,
        }
    }
}

impl<R: io::Read> Iterator for InputReader<R> {
    type Item = Result<InputRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut row = StringRecord::new();
        match self.reader.read_record(&mut row) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                self.line += 1;
                Some(Ok(self.to_input(&row)))
            }
            Err(source) => {
                self.line += 1;
                // The underlying reader is broken, nothing more to read
                if source.is_io_error() {
                    self.done = true;
                }
                Some(Err(ReadError::Row {
                    line: self.line,
                    source,
                }))
            }
        }
    }
}

fn builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers);
    builder
}

/// Drain a reader. Every unparsable row is logged and reading goes on, but
/// any of them fails the whole read with [`ReadError::BadRows`].
pub fn collect_records<R: io::Read>(reader: InputReader<R>) -> Result<Vec<InputRecord>, ReadError> {
    tracing::debug!("Input columns: {:?}", reader.headers());

    let mut records = Vec::new();
    let mut bad_rows = 0;
    let mut first_bad = None;

    for item in reader {
        match item {
            Ok(record) => {
                tracing::debug!("reading row {}: {:?}", record.line, record.columns);
                records.push(record);
            }
            Err(ReadError::Row { line, source }) if !source.is_io_error() => {
                tracing::error!("Cannot parse input row {}: {}", line, source);
                bad_rows += 1;
                first_bad.get_or_insert((line, source));
            }
            Err(e) => return Err(e),
        }
    }

    if let Some((line, source)) = first_bad {
        return Err(ReadError::BadRows {
            count: bad_rows,
            line,
            source,
        });
    }

    tracing::info!("Parsed {} rows", records.len());
    Ok(records)
}

/// Read every row of the file at `path`
pub fn read_records(path: &Path, delimiter: u8) -> Result<Vec<InputRecord>, ReadError> {
    collect_records(InputReader::open(path, delimiter)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_bytes(input: &[u8]) -> Result<Vec<InputRecord>, ReadError> {
        collect_records(InputReader::from_reader(input, b',')?)
    }

    fn read_str(input: &str) -> Result<Vec<InputRecord>, ReadError> {
        read_bytes(input.as_bytes())
    }

    fn kanji(records: &[InputRecord]) -> Vec<&str> {
        records.iter().map(|r| r.kanji.as_str()).collect()
    }

    #[test]
    fn test_reads_rows_in_order() {
        let records = read_str("kanji\n木\n日\n水\n").unwrap();

        assert_eq!(kanji(&records), vec!["木", "日", "水"]);
        let lines: Vec<u64> = records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_extra_columns_are_kept() {
        let records = read_str("id,kanji,notes\n1,木,common\n2,森,\"forest, woods\"\n").unwrap();

        assert_eq!(kanji(&records), vec!["木", "森"]);
        assert_eq!(records[0].get("id"), Some("1"));
        assert_eq!(records[1].get("notes"), Some("forest, woods"));
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(read_str("kanji\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_key_column() {
        assert!(matches!(
            read_str("character,meaning\n木,tree\n"),
            Err(ReadError::MissingKeyColumn)
        ));
    }

    #[test]
    fn test_empty_input_has_no_key_column() {
        assert!(matches!(read_str(""), Err(ReadError::MissingKeyColumn)));
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let records = read_str(" kanji ,notes\n木,x\n").unwrap();
        assert_eq!(kanji(&records), vec!["木"]);
    }

    #[test]
    fn test_headers_are_exposed() {
        let reader = InputReader::from_reader("id,kanji\n".as_bytes(), b',').unwrap();
        let headers: Vec<&str> = reader.headers().iter().collect();
        assert_eq!(headers, vec!["id", "kanji"]);
    }

    #[test]
    fn test_bad_row_fails_the_read() {
        let err = read_str("kanji,notes\n木,a\n日,b,extra\n水,c\n").unwrap_err();

        match err {
            ReadError::BadRows { count, line, .. } => {
                assert_eq!(count, 1);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_every_bad_row_is_counted() {
        let err = read_bytes(b"kanji,notes\n\xff,a\n\xe6\x9c\xa8,b\n\xe6\x97\xa5,b,extra\n").unwrap_err();

        assert!(
            matches!(err, ReadError::BadRows { count: 2, line: 1, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_row_error_carries_line() {
        let reader = InputReader::from_reader("kanji,n\n木,1\n日\n".as_bytes(), b',').unwrap();
        let items: Vec<_> = reader.collect();

        assert_eq!(items.len(), 2);
        let err = items[1].as_ref().unwrap_err();
        assert!(matches!(err, ReadError::Row { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_invalid_utf8_row_does_not_stop_iteration() {
        let reader = InputReader::from_reader(&b"kanji\n\xff\n\xe6\x9c\xa8\n"[..], b',').unwrap();
        let items: Vec<_> = reader.collect();

        assert_eq!(items.len(), 2);
        match &items[0] {
            Err(ReadError::Row { line, source }) => {
                assert_eq!(*line, 1);
                assert!(!source.is_io_error());
            }
            other => panic!("unexpected item: {other:?}"),
        }
        let record = items[1].as_ref().unwrap();
        assert_eq!(record.kanji, "木");
        assert_eq!(record.line, 2);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let reader = InputReader::from_reader("notes;kanji\na,b;火\n".as_bytes(), b';').unwrap();
        let records = collect_records(reader).unwrap();
        assert_eq!(kanji(&records), vec!["火"]);
        assert_eq!(records[0].get("notes"), Some("a,b"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        assert!(matches!(
            read_records(&path, b','),
            Err(ReadError::Open(_))
        ));
    }
}
