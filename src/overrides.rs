//! CSV override rows applied on top of the catalog.
//!
//! Each row is `source,target`. Rows are inserted after every catalog unit, so
//! an override always replaces a catalog entry with the same key hash.

use std::path::PathBuf;

use crate::error::{
    MalformedOverrideRow,
    SourceError,
};

/// Raw CSV record: the fields exactly as read.
pub type OverrideRecord = Vec<String>;

/// Supplies override records in file order.
pub trait OverrideSource {
    /// # Errors
    /// [`SourceError`] when the records cannot be read at all.
    fn rows(&self) -> Result<Vec<OverrideRecord>, SourceError>;
}

impl OverrideSource for Vec<OverrideRecord> {
    fn rows(&self) -> Result<Vec<OverrideRecord>, SourceError> {
        Ok(self.clone())
    }
}

/// A validated override: key source and replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRow {
    /// Source text with backslashes already stripped.
    pub source: String,
    pub target: String,
}

impl OverrideRow {
    /// Validates a raw record.
    ///
    /// `row` is the 1-based record number, used only for diagnostics.
    ///
    /// # Errors
    /// [`MalformedOverrideRow`] unless the record has exactly two non-empty fields.
    pub fn from_record(row: usize, record: &[String]) -> Result<Self, MalformedOverrideRow> {
        let [source, target] = record else {
            return Err(MalformedOverrideRow::FieldCount { row, found: record.len() });
        };

        if source.is_empty() || target.is_empty() {
            return Err(MalformedOverrideRow::EmptyField { row });
        }

        Ok(Self { source: strip_backslashes(source), target: target.clone() })
    }
}

/// Removes every `\` from an override source.
///
/// Spreadsheet exports escape some characters with backslashes; keys never
/// contain a literal backslash, so all of them are dropped before hashing.
#[must_use]
pub fn strip_backslashes(source: &str) -> String {
    source.replace('\\', "")
}

/// Override rows stored in a CSV file (UTF-8, optional BOM).
#[derive(Debug, Clone)]
pub struct CsvOverrideFile {
    /// Path to the CSV file
    path: PathBuf,
}

impl CsvOverrideFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OverrideSource for CsvOverrideFile {
    fn rows(&self) -> Result<Vec<OverrideRecord>, SourceError> {
        tracing::debug!("Loading overrides from: {:?}", self.path);

        let content = std::fs::read(&self.path)
            .map_err(|source| SourceError::Io { path: self.path.clone(), source })?;
        parse_csv(&content)
    }
}

/// UTF-8 byte-order mark written by spreadsheet exports.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Splits CSV data into records.
///
/// There is no header row and records may have any number of fields; the
/// field count is checked later by [`OverrideRow::from_record`]. A leading
/// byte-order mark is dropped and blank lines produce no record.
///
/// # Errors
/// [`SourceError::Csv`] when a record is not valid UTF-8.
pub fn parse_csv(data: &[u8]) -> Result<Vec<OverrideRecord>, SourceError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader =
        csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(data);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(ToString::to_string).collect());
    }

    tracing::debug!("Parsed {} override records", records.len());
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::record;

    #[rstest]
    fn parse_simple_rows() {
        let records = parse_csv("Save,保存\nOpen,打开\n".as_bytes()).unwrap();

        assert_eq!(records, vec![record(&["Save", "保存"]), record(&["Open", "打开"])]);
    }

    #[rstest]
    fn parse_quoted_fields() {
        let records = parse_csv(b"\"Hello, world\",\"He said \"\"hi\"\"\"\r\n").unwrap();

        assert_eq!(records, vec![record(&["Hello, world", "He said \"hi\""])]);
    }

    #[rstest]
    fn parse_multiline_quoted_field() {
        let records = parse_csv(b"\"line1\nline2\",target\nnext,row").unwrap();

        assert_eq!(
            records,
            vec![record(&["line1\nline2", "target"]), record(&["next", "row"])]
        );
    }

    #[rstest]
    fn parse_strips_bom_and_skips_blank_lines() {
        let records = parse_csv(b"\xef\xbb\xbfa,1\n\nb,2").unwrap();

        assert_eq!(records, vec![record(&["a", "1"]), record(&["b", "2"])]);
    }

    #[rstest]
    fn parse_uneven_field_counts() {
        let records = parse_csv(b"a,\nsingle\nx,y,z\n").unwrap();

        assert_eq!(records, vec![record(&["a", ""]), record(&["single"]), record(&["x", "y", "z"])]);
    }

    #[rstest]
    fn parse_invalid_utf8() {
        let result = parse_csv(b"ok,row\n\xff\xfe,row\n");

        assert!(matches!(result, Err(SourceError::Csv(_))));
    }

    #[rstest]
    #[case::single_field(record(&["Save"]), MalformedOverrideRow::FieldCount { row: 3, found: 1 })]
    #[case::three_fields(record(&["a", "b", "c"]), MalformedOverrideRow::FieldCount { row: 3, found: 3 })]
    #[case::empty_record(record(&[]), MalformedOverrideRow::FieldCount { row: 3, found: 0 })]
    #[case::empty_source(record(&["", "保存"]), MalformedOverrideRow::EmptyField { row: 3 })]
    #[case::empty_target(record(&["Save", ""]), MalformedOverrideRow::EmptyField { row: 3 })]
    fn from_record_rejects(#[case] fields: OverrideRecord, #[case] expected: MalformedOverrideRow) {
        assert_eq!(OverrideRow::from_record(3, &fields), Err(expected));
    }

    #[rstest]
    fn malformed_row_is_copy() {
        let malformed = OverrideRow::from_record(2, &record(&["Save"])).unwrap_err();
        let copied = malformed;

        assert_eq!(malformed, copied);
    }

    #[rstest]
    fn from_record_strips_backslashes_from_source_only() {
        let row = OverrideRow::from_record(1, &record(&["Load \\\"%s\\\"", "读取 \\n"])).unwrap();

        assert_that!(row.source, eq("Load \"%s\""));
        assert_that!(row.target, eq("读取 \\n"));
    }

    #[rstest]
    fn csv_override_file_reads_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zh_CN.csv");
        fs::write(&path, "\u{feff}Save,保存中\n\nC:\\dir,目录\n").unwrap();

        let rows = CsvOverrideFile::new(&path).rows().unwrap();

        assert_eq!(rows, vec![record(&["Save", "保存中"]), record(&["C:\\dir", "目录"])]);
    }

    #[rstest]
    fn csv_override_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = CsvOverrideFile::new(temp_dir.path().join("none.csv")).rows();

        assert!(matches!(result, Err(SourceError::Io { .. })));
    }
}
