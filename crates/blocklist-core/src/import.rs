//! The import pipeline: CSV file in, merged JSON store out

use crate::error::{Error, Result};
use crate::extract::extract_record;
use crate::normalize::cleanup_entries;
use crate::reader::RawRecord;
use crate::sniff;
use crate::store::{run_timestamp, Entry, Store};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// CSV file to import
    pub input: PathBuf,
    /// Country code substituted for a leading national `0`, e.g. "+41"
    pub country_code: String,
    /// JSON store to read and then overwrite
    pub merge: PathBuf,
}

/// Counts describing what one import run did
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// CSV data rows read from the input
    pub records_read: usize,
    /// Number candidates extracted from those rows
    pub candidates_extracted: usize,
    /// Entries dropped during cleanup (rejected or duplicate)
    pub entries_dropped: usize,
    /// Entries in the final store
    pub total_entries: usize,
    /// Whether the store file was (re)written
    pub store_written: bool,
}

/// Run a full import: load the store, sniff and read the CSV, extract
/// and normalize entries, merge, and persist the result.
pub fn run_import(options: &ImportOptions) -> Result<ImportReport> {
    let mut store = Store::load(&options.merge)?;
    debug!(
        store = %store.name,
        prior_entries = store.entries.len(),
        "loaded merge store"
    );

    let bytes = std::fs::read(&options.input).map_err(|e| Error::FileRead {
        path: options.input.clone(),
        source: e,
    })?;

    let delimiter = sniff::detect_delimiter(&bytes);
    let encoding = sniff::detect_encoding(&bytes);
    let text = sniff::decode(&bytes, encoding);

    let records = crate::reader::read_records_str(&text, delimiter).map_err(|e| match e {
        // Attribute record-stream errors to the real input path
        Error::Csv { source, .. } => Error::Csv {
            path: options.input.clone(),
            source,
        },
        other => other,
    })?;

    let date = run_timestamp();
    let mut report = ImportReport {
        records_read: records.len(),
        ..Default::default()
    };

    for record in &records {
        let entries = entries_from_record(record, &date);
        report.candidates_extracted += entries.len();
        store.entries.extend(entries);
    }

    let before_cleanup = store.entries.len();
    store.entries = cleanup_entries(store.entries, &options.country_code);
    report.entries_dropped = before_cleanup - store.entries.len();
    report.total_entries = store.entries.len();

    report.store_written = store.save_if_nonempty(&options.merge)?;

    info!(
        input = %options.input.display(),
        records = report.records_read,
        candidates = report.candidates_extracted,
        dropped = report.entries_dropped,
        total = report.total_entries,
        written = report.store_written,
        "import complete"
    );

    Ok(report)
}

/// Turn one raw record into zero or more entries dated with the run
/// timestamp. The entry name carries the source column label.
fn entries_from_record(record: &RawRecord, date: &str) -> Vec<Entry> {
    let extracted = extract_record(record);

    extracted
        .candidates
        .into_iter()
        .map(|candidate| {
            let name = format!("{} ({})", extracted.name, candidate.label);
            Entry::new(candidate.number, name, date)
        })
        .collect()
}
