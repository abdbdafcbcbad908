//! Input validation for user-supplied query parameters.

use crate::error::DugoutError;

pub const MAX_NAME_LENGTH: usize = 100;
/// Search terms shorter than this return an empty result set without
/// contacting any provider.
pub const MIN_SEARCH_LENGTH: usize = 2;

const MIN_SEASON: i32 = 1903;
const MAX_SEASON: i32 = 2100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim
/// whitespace, and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, DugoutError> {
    if input.len() > max_len {
        return Err(DugoutError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    Ok(sanitized)
}

/// Validates a player name used for resolution. Must be non-empty after
/// sanitization.
pub fn validate_player_name(name: &str) -> Result<String, DugoutError> {
    let sanitized = sanitize_text(name, MAX_NAME_LENGTH)?;
    if sanitized.is_empty() {
        return Err(DugoutError::InvalidInput(
            "player name must not be empty".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Sanitizes a search term. An empty or too-short term is not an error;
/// callers treat it as an empty result.
pub fn sanitize_search(term: &str) -> Result<String, DugoutError> {
    sanitize_text(term, MAX_NAME_LENGTH)
}

/// Validates a season year against the era the providers cover.
pub fn validate_season(year: i32) -> Result<i32, DugoutError> {
    if !(MIN_SEASON..=MAX_SEASON).contains(&year) {
        return Err(DugoutError::InvalidInput(format!(
            "season {} is out of range",
            year
        )));
    }
    Ok(year)
}
