//! Number normalization, filtering and deduplication
//!
//! Numbers arrive stripped to digits and `+` but still in whatever
//! national convention the export used. This module rewrites them to
//! international format, drops the ones a blocklist must not act on,
//! and collapses duplicates.

use crate::store::Entry;
use std::collections::HashSet;
use tracing::debug;

/// Shortest acceptable number, counting the `+`. Anything shorter
/// would match far too many callers to be safe on a blocklist.
const MIN_NUMBER_LEN: usize = 4;

/// Longest acceptable number: E.164 allows 15 digits plus the `+`
const MAX_NUMBER_LEN: usize = 16;

/// Why a number was rejected during cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Shorter than [`MIN_NUMBER_LEN`]
    TooShort,
    /// No leading `+` after normalization
    NotInternational,
    /// Longer than [`MAX_NUMBER_LEN`]
    TooLong,
}

/// Rewrite a stripped number to international format.
///
/// `00` prefixes become `+`; a single national `0` is replaced by the
/// configured country code; anything else passes through unchanged, so
/// the operation is idempotent on already-international numbers.
pub fn to_international(number: &str, country_code: &str) -> String {
    if let Some(rest) = number.strip_prefix("00") {
        format!("+{}", rest)
    } else if let Some(rest) = number.strip_prefix('0') {
        format!("{}{}", country_code, rest)
    } else {
        number.to_string()
    }
}

/// Check a normalized number against the blocklist's format limits
pub fn validate(number: &str) -> std::result::Result<(), RejectReason> {
    if number.len() < MIN_NUMBER_LEN {
        return Err(RejectReason::TooShort);
    }
    if !number.starts_with('+') {
        return Err(RejectReason::NotInternational);
    }
    if number.len() > MAX_NUMBER_LEN {
        return Err(RejectReason::TooLong);
    }
    Ok(())
}

/// Normalize, filter and deduplicate a sequence of entries.
///
/// Rejections are logged and dropped, never fatal. Deduplication keeps
/// the first entry per distinct number and preserves relative order;
/// with old store entries ahead of the new import this means a
/// re-imported number keeps its original `date_created`.
pub fn cleanup_entries(entries: Vec<Entry>, country_code: &str) -> Vec<Entry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<Entry> = Vec::new();

    for mut entry in entries {
        entry.number = to_international(&entry.number, country_code);

        match validate(&entry.number) {
            Ok(()) => {}
            Err(RejectReason::TooShort) => {
                debug!(number = %entry.number, name = %entry.name, "skip too small number");
                continue;
            }
            Err(RejectReason::NotInternational) => {
                debug!(number = %entry.number, name = %entry.name, "skip unknown format number");
                continue;
            }
            Err(RejectReason::TooLong) => {
                debug!(number = %entry.number, name = %entry.name, "skip too long number");
                continue;
            }
        }

        if seen.insert(entry.number.clone()) {
            unique.push(entry);
        } else {
            debug!(number = %entry.number, "skip duplicate number");
        }
    }

    unique
}
