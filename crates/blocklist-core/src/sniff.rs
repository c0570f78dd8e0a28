//! Delimiter and encoding detection for uncontrolled CSV exports
//!
//! Address-book exports do not agree on a field separator or a text
//! encoding, so both are sniffed from the raw bytes before any record
//! is parsed.

use encoding_rs::Encoding;
use tracing::debug;

/// Candidate encodings, tried in order against the whole file.
///
/// UTF-8 comes first; the rest are single-byte regional encodings seen
/// in real exports. WINDOWS_1252 is last because it maps all 256 byte
/// values, so the trial loop can never exhaust the list.
const ENCODING_CANDIDATES: &[&Encoding] = &[
    encoding_rs::UTF_8,
    encoding_rs::ISO_8859_2,
    encoding_rs::ISO_8859_15,
    encoding_rs::WINDOWS_1250,
    encoding_rs::WINDOWS_1254,
    encoding_rs::WINDOWS_1252,
];

/// Detect the field delimiter from the header line.
///
/// Counts `;` versus `,` in the first line of the raw bytes; semicolon
/// wins only when strictly more frequent. Comma is the default, which
/// also covers an empty or missing header line.
pub fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = match bytes.iter().position(|&b| b == b'\n') {
        Some(end) => &bytes[..end],
        None => bytes,
    };

    let semi_count = first_line.iter().filter(|&&b| b == b';').count();
    let comma_count = first_line.iter().filter(|&&b| b == b',').count();

    let delimiter = if semi_count > comma_count { b';' } else { b',' };
    let delimiter_char = delimiter as char;
    debug!(delimiter = %delimiter_char, semi_count, comma_count, "detected delimiter");
    delimiter
}

/// Detect the text encoding of the file contents.
///
/// Tries each candidate in order and returns the first one that decodes
/// the entire buffer without errors. The final candidate accepts any
/// byte sequence, so this always returns an encoding.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    for &candidate in ENCODING_CANDIDATES {
        let (_, had_errors) = candidate.decode_without_bom_handling(bytes);
        if !had_errors {
            debug!(encoding = candidate.name(), "detected encoding");
            return candidate;
        }
        debug!(encoding = candidate.name(), "candidate failed to decode, trying next");
    }

    // Unreachable: windows-1252 decodes every byte.
    encoding_rs::WINDOWS_1252
}

/// Decode the file contents with the given encoding.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
