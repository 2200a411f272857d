//! Shared traits and lenient value parsing for finance records.

use chrono::NaiveDate;
use uuid::Uuid;

/// Exposes a stable identifier for rows stored in a record table.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving the monetary amount of a record.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Records that may carry a calendar date.
pub trait Dated {
    fn date(&self) -> Option<NaiveDate>;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO-8601 date, tolerating a trailing time component.
///
/// Empty, malformed, or out-of-range inputs yield `None` instead of an error.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    let head = trimmed.get(..10)?;
    let rest = &trimmed[10..];
    if !(rest.starts_with(' ') || rest.starts_with('T')) {
        tracing::debug!(value = trimmed, "coercing malformed date to missing");
        return None;
    }
    let parsed = NaiveDate::parse_from_str(head, DATE_FORMAT).ok();
    if parsed.is_none() {
        tracing::debug!(value = trimmed, "coercing malformed date to missing");
    }
    parsed
}

/// Formats an optional date for tabular storage; missing dates become empty cells.
pub fn format_date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parses a monetary cell. Blank cells read as `None`; non-numeric or non-finite
/// values are reported as `Err` with the offending text.
pub fn parse_amount_cell(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(trimmed.to_string()),
    }
}

/// Returns `true` for amounts accepted on record creation: finite and strictly positive.
pub fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
