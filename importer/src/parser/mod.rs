//! TSV row reader with encoding auto-detection, and the person name parser.
//!
//! The input is a tab-separated export with a header row followed by rows of
//! `name, composers, arrangers, genre, digitized`. The header is discarded,
//! rows with fewer than five fields are skipped and counted.

pub mod name;

pub use name::parse_person_name;

use std::path::Path;

use crate::error::{ReaderError, ReaderResult};
use crate::models::PieceRow;

/// Rows read from an input file, with metadata.
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    /// Data rows in input order
    pub rows: Vec<PieceRow>,
    /// Header fields (discarded for processing)
    pub headers: Vec<String>,
    /// Rows skipped for having fewer than five fields
    pub skipped: usize,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// ISO-8859-1 maps every byte to the code point of the same value. Unknown
/// or undetected encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => bytes.iter().map(|&b| b as char).collect(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => decoded,
    }
}

/// Parse tab-separated content. The first record is the header.
pub fn parse_tsv(content: &str) -> ReaderResult<ParsedRows> {
    if content.is_empty() {
        return Err(ReaderError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0;

    for record in reader.records() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        match PieceRow::from_fields(&fields) {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    Ok(ParsedRows {
        rows,
        headers,
        skipped,
        encoding: "utf-8".to_string(),
    })
}

/// Parse TSV bytes. Valid UTF-8 is always read as UTF-8; chardet is only
/// consulted for other input.
pub fn parse_bytes_auto(bytes: &[u8]) -> ReaderResult<ParsedRows> {
    if bytes.is_empty() {
        return Err(ReaderError::Empty);
    }
    let (content, encoding) = match std::str::from_utf8(bytes) {
        Ok(text) => (decode_content(text.as_bytes(), "utf-8"), "utf-8".to_string()),
        Err(_) => {
            let encoding = detect_encoding(bytes);
            (decode_content(bytes, &encoding), encoding)
        }
    };
    let mut parsed = parse_tsv(&content)?;
    parsed.encoding = encoding;
    Ok(parsed)
}

/// Read and parse a TSV file.
pub async fn read_rows(path: &Path) -> ReaderResult<ParsedRows> {
    let bytes = tokio::fs::read(path).await?;
    parse_bytes_auto(&bytes)
}
