//! Heuristic extraction of names and phone numbers from arbitrary columns
//!
//! Exports never agree on column names, so headers are classified by
//! case-insensitive substring match against small ordered role tables.
//! Evaluation order is significant: it encodes priority.

use crate::reader::RawRecord;

/// Name fragments, scanned in this order; each role contributes at most
/// once and the first matching header wins.
const NAME_ROLES: &[&str] = &["first name", "middle name", "last name"];

/// Phone-like header patterns, in priority order
const NUMBER_ROLES: &[&str] = &["phone", "pager", "fax"];

/// Known export schemas that need rules beyond the generic header scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSchema {
    /// Generic address-book export, handled purely by the role tables
    AddressBook,
    /// tellows reverse-lookup export, identified by its literal
    /// `Score` and `Anruftyp` columns
    Tellows,
}

impl SourceSchema {
    /// Classify a record by the columns it carries
    pub fn detect(record: &RawRecord) -> Self {
        if record.has_header("Score") && record.has_header("Anruftyp") {
            SourceSchema::Tellows
        } else {
            SourceSchema::AddressBook
        }
    }
}

/// One phone-number candidate pulled out of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberCandidate {
    /// Candidate value, stripped to digits and `+`
    pub number: String,
    /// Header label the candidate came from (e.g. "Mobile Phone")
    pub label: String,
}

/// Everything extracted from a single record
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Display name built from the name-role columns
    pub name: String,
    /// Zero or more phone-number candidates
    pub candidates: Vec<NumberCandidate>,
}

/// Extract a display name and number candidates from one record
pub fn extract_record(record: &RawRecord) -> Extracted {
    let schema = SourceSchema::detect(record);

    Extracted {
        name: extract_name(record, schema),
        candidates: extract_candidates(record),
    }
}

fn extract_name(record: &RawRecord, schema: SourceSchema) -> String {
    if schema == SourceSchema::Tellows {
        // Schema detection guarantees both columns exist
        let call_type = record.get("Anruftyp").unwrap_or("");
        let score = record.get("Score").unwrap_or("");
        return format!("{} / score:{}", call_type, score);
    }

    let mut fragments: Vec<&str> = Vec::new();
    for role in NAME_ROLES {
        let matched = record
            .iter()
            .find(|(header, _)| !header.is_empty() && header.to_lowercase().contains(role));
        if let Some((_, value)) = matched {
            fragments.push(value);
        }
    }

    fragments.join(" ").trim().to_string()
}

fn extract_candidates(record: &RawRecord) -> Vec<NumberCandidate> {
    let mut candidates = Vec::new();

    for (header, value) in record.iter() {
        if header.is_empty() {
            continue;
        }

        let lower = header.to_lowercase();
        let raw_candidate = if NUMBER_ROLES.iter().any(|r| lower.contains(r)) {
            Some((value.to_string(), header.to_string()))
        } else if header.contains("Nummer") && record.has_header("Land") {
            // tellows numbers are split into a country-code column and a
            // national column whose first character is a leading zero
            let land = record.get("Land").unwrap_or("");
            let national: String = value.chars().skip(1).collect();
            Some((format!("+{}{}", land, national), "phone".to_string()))
        } else {
            None
        };

        if let Some((raw, label)) = raw_candidate {
            let number = strip_number(&raw);
            if !number.is_empty() {
                candidates.push(NumberCandidate { number, label });
            }
        }
    }

    candidates
}

/// Strip everything except digits and `+` from a candidate value
fn strip_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_number() {
        assert_eq!(strip_number("079 123 45 67"), "0791234567");
        assert_eq!(strip_number("+41 (0)79-123.45.67"), "+410791234567");
        assert_eq!(strip_number("n/a"), "");
    }

    #[test]
    fn test_extract_address_book_record() {
        let record = RawRecord::from_pairs([
            ("First Name", "John"),
            ("Last Name", "Smith"),
            ("Mobile Phone", "079 123 45 67"),
        ]);

        let extracted = extract_record(&record);
        assert_eq!(extracted.name, "John Smith");
        assert_eq!(extracted.candidates.len(), 1);
        assert_eq!(extracted.candidates[0].number, "0791234567");
        assert_eq!(extracted.candidates[0].label, "Mobile Phone");
    }

    #[test]
    fn test_name_roles_match_in_fixed_order() {
        // Column order in the file must not change the name order
        let record = RawRecord::from_pairs([
            ("Last Name", "Smith"),
            ("Middle Name", "Q"),
            ("First Name", "John"),
        ]);

        let extracted = extract_record(&record);
        assert_eq!(extracted.name, "John Q Smith");
    }

    #[test]
    fn test_first_matching_header_wins_per_role() {
        let record = RawRecord::from_pairs([
            ("First Name", "John"),
            ("Partner First Name", "Jane"),
        ]);

        let extracted = extract_record(&record);
        assert_eq!(extracted.name, "John");
    }

    #[test]
    fn test_multiple_number_columns() {
        let record = RawRecord::from_pairs([
            ("First Name", "John"),
            ("Home Phone", "044 111 22 33"),
            ("Business Fax", "044 444 55 66"),
            ("Pager", "044 777 88 99"),
        ]);

        let extracted = extract_record(&record);
        let labels: Vec<&str> = extracted
            .candidates
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Home Phone", "Business Fax", "Pager"]);
    }

    #[test]
    fn test_header_matching_is_case_insensitive() {
        let record = RawRecord::from_pairs([("HOME PHONE", "0791234567")]);
        let extracted = extract_record(&record);
        assert_eq!(extracted.candidates.len(), 1);
    }

    #[test]
    fn test_empty_value_after_strip_is_skipped() {
        let record = RawRecord::from_pairs([("Phone", ""), ("Fax", "-")]);
        let extracted = extract_record(&record);
        assert!(extracted.candidates.is_empty());
    }

    #[test]
    fn test_tellows_schema() {
        let record = RawRecord::from_pairs([
            ("Anruftyp", "Spam"),
            ("Score", "9"),
            ("Land", "41"),
            ("Nummer", "0791234567"),
        ]);

        assert_eq!(SourceSchema::detect(&record), SourceSchema::Tellows);

        let extracted = extract_record(&record);
        assert_eq!(extracted.name, "Spam / score:9");
        assert_eq!(extracted.candidates.len(), 1);
        assert_eq!(extracted.candidates[0].number, "+41791234567");
        assert_eq!(extracted.candidates[0].label, "phone");
    }

    #[test]
    fn test_nummer_without_land_is_ignored() {
        let record = RawRecord::from_pairs([("Nummer", "0791234567")]);
        let extracted = extract_record(&record);
        assert!(extracted.candidates.is_empty());
    }

    #[test]
    fn test_generic_schema_detected_without_tellows_columns() {
        let record = RawRecord::from_pairs([("Score", "9")]);
        assert_eq!(SourceSchema::detect(&record), SourceSchema::AddressBook);
    }
}
