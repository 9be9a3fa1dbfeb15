//! Input validation for ISBNs.

use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(String),

    #[error("ISBN checksum mismatch: {0}")]
    IsbnChecksum(String),
}

/// Normalize and validate an ISBN-10 or ISBN-13
///
/// Hyphens and spaces are removed and a trailing `x` check digit is upper-cased.
/// Returns the bare digits if the length and checksum are valid.
pub fn normalize_isbn(raw: &str) -> Result<String, ValidationError> {
    let isbn: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if isbn.is_empty() {
        return Err(ValidationError::InvalidIsbn("empty ISBN".to_string()));
    }
    if !isbn.is_ascii() {
        return Err(ValidationError::InvalidIsbn(raw.to_string()));
    }

    let valid = match isbn.len() {
        10 => {
            let (body, check) = isbn.split_at(9);
            if !body.chars().all(|c| c.is_ascii_digit())
                || !check.chars().all(|c| c.is_ascii_digit() || c == 'X')
            {
                return Err(ValidationError::InvalidIsbn(raw.to_string()));
            }
            isbn10_checksum_ok(&isbn)
        }
        13 => {
            if !isbn.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::InvalidIsbn(raw.to_string()));
            }
            isbn13_checksum_ok(&isbn)
        }
        _ => {
            return Err(ValidationError::InvalidIsbn(format!(
                "{} (expected 10 or 13 digits)",
                raw
            )))
        }
    };

    if valid {
        Ok(isbn)
    } else {
        Err(ValidationError::IsbnChecksum(raw.to_string()))
    }
}

fn isbn10_checksum_ok(isbn: &str) -> bool {
    let sum: u32 = isbn
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let value = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
            value * (10 - i as u32)
        })
        .sum();
    sum % 11 == 0
}

fn isbn13_checksum_ok(isbn: &str) -> bool {
    let sum: u32 = isbn
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    sum % 10 == 0
}
