//! Recognition of the "no data" token family.
//!
//! Submitters spell missing data many ways ("NA", "n/a", "unknown", "99", ...).
//! Every one of them collapses to [`BLANK`] during normalization, independent
//! of which field the value came from.

/// Canonical token stored for any field without data.
pub const BLANK: &str = "NA";

/// Lower-cased spellings that mean "no data" in addition to empty text.
pub const BLANK_SYNONYMS: [&str; 8] = [
    "99",
    "na",
    "n/a",
    "unknown",
    "not known",
    "unavailable",
    "not available",
    "not determined",
];

/// Returns true when the value is empty after trimming or is a known blank spelling.
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    BLANK_SYNONYMS.contains(&lowered.as_str())
}

/// Same as [`is_blank`] for a cell that may not exist at all.
pub fn is_blank_cell(value: Option<&str>) -> bool {
    value.is_none_or(is_blank)
}
