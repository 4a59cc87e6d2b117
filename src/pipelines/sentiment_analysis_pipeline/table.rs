use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::core::UploadError;

/// An uploaded comma-separated table with a header row.
///
/// Cells are kept as text. Bytes that are not valid UTF-8 are replaced
/// rather than rejected, and rows shorter than the header are padded with
/// empty cells, so one odd row never fails the whole upload. Rows longer
/// than the header are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Build a table from headers and rows. Rows must match the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<Self> {
        if headers.is_empty() {
            return Err(UploadError::NoColumns.into());
        }
        if let Some(i) = rows.iter().position(|r| r.len() != headers.len()) {
            anyhow::bail!(
                "row {} has {} fields, expected {}",
                i + 1,
                rows[i].len(),
                headers.len()
            );
        }
        Ok(Self { headers, rows })
    }

    /// Parse CSV text from `reader`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, UploadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode_cell).collect();
        if headers.is_empty() {
            return Err(UploadError::NoColumns);
        }

        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(UploadError::ExtraFields {
                    line: record.position().map_or(0, |p| p.line()),
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(decode_cell).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed upload");
        Ok(Self { headers, rows })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UploadError> {
        Self::from_csv_reader(bytes)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        Ok(Self::from_csv_reader(std::io::BufReader::new(file))?)
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header; the first match wins on duplicates.
    pub fn column_index(&self, name: &str) -> Result<usize, UploadError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| UploadError::UnknownColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// All values of column `name`, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, UploadError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = ReviewTable::from_bytes(b"id,review\n1,good\n2,\"bad, really\"\n").unwrap();
        assert_eq!(table.columns(), &["id".to_string(), "review".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("review").unwrap(), vec!["good", "bad, really"]);
    }

    #[test]
    fn invalid_utf8_is_coerced() {
        let table = ReviewTable::from_bytes(b"review\ncaf\xe9\n").unwrap();
        assert_eq!(table.column("review").unwrap(), vec!["caf\u{fffd}"]);
    }

    #[test]
    fn empty_upload_has_no_columns() {
        assert!(matches!(
            ReviewTable::from_bytes(b""),
            Err(UploadError::NoColumns)
        ));
    }

    #[test]
    fn header_only_upload_is_empty() {
        let table = ReviewTable::from_bytes(b"review\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let table = ReviewTable::from_bytes(b"review,stars\ngood,5\nok\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], vec!["ok".to_string(), String::new()]);
        assert_eq!(table.column("stars").unwrap(), vec!["5", ""]);
    }

    #[test]
    fn long_rows_are_malformed() {
        let err = ReviewTable::from_bytes(b"a,b\n1,2\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            UploadError::ExtraFields {
                line: 3,
                found: 3,
                expected: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "malformed CSV: line 3 has 3 fields, expected 2"
        );
    }

    #[test]
    fn malformed_message_does_not_repeat_the_source() {
        let source = csv::ReaderBuilder::new()
            .from_reader(&b"a\n1,2\n"[..])
            .records()
            .find_map(Result::err)
            .unwrap();
        let err = anyhow::Error::from(UploadError::from(source));
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with("malformed CSV: CSV error"));
        assert_eq!(rendered.matches("CSV error").count(), 1);
    }

    #[test]
    fn unknown_column_lists_available() {
        let table = ReviewTable::from_bytes(b"text\nhi\n").unwrap();
        let err = table.column("review").unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 'review' not found; available columns: text"
        );
    }

    #[test]
    fn new_checks_width() {
        assert!(ReviewTable::new(vec!["a".into()], vec![vec!["1".into(), "2".into()]]).is_err());
        assert!(ReviewTable::new(vec![], vec![]).is_err());
    }
}
