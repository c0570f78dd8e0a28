//! Record reader turning decoded CSV text into header->value records

use crate::error::{Error, Result};
use crate::sniff;
use encoding_rs::Encoding;
use std::path::Path;

/// One CSV data row, keyed by the header row.
///
/// Headers are kept as an ordered list of pairs rather than a map:
/// exports in the wild carry duplicate and empty header labels, and
/// extraction priority depends on column order. Values for columns a
/// short row does not cover are empty strings, never absent.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Build a record from header/value pairs (useful for testing)
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Iterate over (header, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of the first column with this exact header label
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == header)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a column with this exact header label exists
    pub fn has_header(&self, header: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == header)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Read a CSV file into records using the detected delimiter and encoding.
///
/// The whole file is decoded up front; contact exports are small enough
/// that streaming buys nothing.
pub fn read_records<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = sniff::decode(&bytes, encoding);
    parse_records(&text, delimiter, path)
}

/// Read records from a string (useful for testing)
pub fn read_records_str(content: &str, delimiter: u8) -> Result<Vec<RawRecord>> {
    parse_records(content, delimiter, Path::new("<string>"))
}

fn parse_records(content: &str, delimiter: u8, path: &Path) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .from_reader(content.as_bytes());

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Pair every header with its value; short rows pad with ""
        let fields: Vec<(String, String)> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                (
                    header.to_string(),
                    record.get(i).unwrap_or("").to_string(),
                )
            })
            .collect();

        records.push(RawRecord { fields });
    }

    Ok(records)
}
