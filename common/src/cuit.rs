//! # CUIT
//!
//! The CUIT is the 11 digit tax id that identifies a business. Users type it with
//! or without `-` separators (`20-12345678-6`, `20123456786`); the backend stores
//! the bare digits and owns every other rule (check digit, uniqueness).

const CUIT_LEN: usize = 11;

/// Strips `-` separators, returning the bare digits when exactly 11 remain.
pub fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();

    if digits.len() != CUIT_LEN || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Returns `true` when `raw` is 11 digits once separators are stripped.
pub fn is_valid(raw: &str) -> bool {
    normalize(raw).is_some()
}

/// Formats bare digits as `XX-XXXXXXXX-X`. Anything that does not normalize is returned as-is.
pub fn format(raw: &str) -> String {
    match normalize(raw) {
        Some(d) => format!("{}-{}-{}", &d[..2], &d[2..10], &d[10..]),
        None => raw.to_string(),
    }
}
