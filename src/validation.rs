//! Validation of values typed in by the game master.

use crate::battle::{INITIATIVE_MAX, INITIATIVE_MIN};
use crate::errors::ValidationError;

/// Parse an integer stat (hp, cd, init). Blank input counts as 0.
pub fn parse_stat(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: trimmed.to_string(),
        })
}

/// Parse a battle initiative, which must be an integer in 1..=20.
pub fn parse_initiative(raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field: "initiative",
            value: trimmed.to_string(),
        })?;
    check_initiative_range(value)
}

pub fn check_initiative_range(value: i64) -> Result<i32, ValidationError> {
    if value < i64::from(INITIATIVE_MIN) || value > i64::from(INITIATIVE_MAX) {
        return Err(ValidationError::InitiativeOutOfRange {
            value,
            min: INITIATIVE_MIN,
            max: INITIATIVE_MAX,
        });
    }
    Ok(value as i32)
}

/// Reject an initiative already taken by another player.
pub fn check_unique_initiative(value: i32, taken: &[i32]) -> Result<(), ValidationError> {
    if taken.contains(&value) {
        return Err(ValidationError::DuplicateInitiative(value));
    }
    Ok(())
}

/// Names are trimmed; an empty result is rejected.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}
