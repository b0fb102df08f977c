//! Checks run before a request leaves the client
//!
//! Each check mirrors a rule the server enforces, so bad input is reported
//! without a round trip.

use crate::client::error::ClientError;
use chrono::NaiveDate;
use std::path::Path;

pub const MIN_SEARCH_LEN: usize = 2;

/// Spreadsheet extensions the server accepts
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

fn invalid(message: impl Into<String>) -> ClientError {
    ClientError::Validation(message.into())
}

/// Trimmed value of a required field
pub fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, ClientError> {
    let value = value.trim();
    if value.is_empty() {
        Err(invalid(message))
    } else {
        Ok(value)
    }
}

pub fn search_query(query: &str) -> Result<&str, ClientError> {
    let query = query.trim();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(invalid("Query must be at least 2 characters"));
    }
    Ok(query)
}

/// File name of an uploadable spreadsheet
pub fn spreadsheet(path: &Path) -> Result<&str, ClientError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("No file selected"))?;

    let allowed = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if !allowed {
        return Err(invalid("Invalid file type. Upload .xls or .xlsx"));
    }
    Ok(name)
}

/// A name that stays a single path segment on the server
pub fn path_segment<'a>(value: &'a str, what: &str) -> Result<&'a str, ClientError> {
    if value.is_empty() || value.contains("..") || value.contains('/') || value.contains('\\') {
        return Err(invalid(format!("Invalid {what}")));
    }
    Ok(value)
}

/// A calendar date in `YYYY-MM-DD` form
pub fn iso_date(value: &str) -> Result<&str, ClientError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| value)
        .map_err(|_| invalid("Invalid order_date (expected YYYY-MM-DD)"))
}
