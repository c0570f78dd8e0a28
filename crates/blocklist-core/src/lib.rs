//! blocklist-core: Core library for importing contact CSV exports
//!
//! This library provides functionality to:
//! - Detect the delimiter and text encoding of an uncontrolled CSV export
//! - Stream the file as header->value records
//! - Heuristically extract names and phone numbers from arbitrary columns
//! - Normalize numbers to international format and deduplicate them
//! - Merge the result into a persisted JSON store for a call blocklist

pub mod error;
pub mod extract;
pub mod import;
pub mod normalize;
pub mod reader;
pub mod sniff;
pub mod store;

pub use error::{Error, Result};
pub use extract::{extract_record, Extracted, NumberCandidate, SourceSchema};
pub use import::{run_import, ImportOptions, ImportReport};
pub use normalize::{cleanup_entries, to_international, RejectReason};
pub use reader::{read_records, read_records_str, RawRecord};
pub use sniff::{detect_delimiter, detect_encoding};
pub use store::{Entry, Store};
