use std::ops::RangeInclusive;

use uuid::Uuid;

use crate::services::error::EngineError;
use crate::types::AttemptResult;

pub const DEFAULT_WORD_COUNT: usize = 10;
pub const WORD_COUNT_RANGE: RangeInclusive<usize> = 5..=20;
pub const BATCH_SIZE_RANGE: RangeInclusive<usize> = 1..=20;
pub const ATTEMPT_NUMBER_RANGE: RangeInclusive<i32> = 1..=10;

pub fn validate_word_count(word_count: usize) -> Result<(), EngineError> {
    if WORD_COUNT_RANGE.contains(&word_count) {
        return Ok(());
    }
    Err(EngineError::invalid(
        "word_count",
        format!(
            "word_count must be between {} and {}",
            WORD_COUNT_RANGE.start(),
            WORD_COUNT_RANGE.end()
        ),
    ))
}

pub fn validate_uuid(field: &'static str, value: &str) -> Result<(), EngineError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| EngineError::invalid(field, format!("{field} must be a valid UUID")))
}

pub fn validate_attempt_number(attempt_number: i32) -> Result<(), EngineError> {
    if ATTEMPT_NUMBER_RANGE.contains(&attempt_number) {
        return Ok(());
    }
    Err(EngineError::invalid(
        "attempt_number",
        format!(
            "attempt_number must be between {} and {}",
            ATTEMPT_NUMBER_RANGE.start(),
            ATTEMPT_NUMBER_RANGE.end()
        ),
    ))
}

pub fn validate_attempt(result: &AttemptResult) -> Result<(), EngineError> {
    validate_uuid("vocabulary_id", &result.word_id)?;
    validate_attempt_number(result.attempt_number)
}

/// Checks the whole batch shape before anything is recorded.
pub fn validate_batch(results: &[AttemptResult]) -> Result<(), EngineError> {
    if !BATCH_SIZE_RANGE.contains(&results.len()) {
        return Err(EngineError::invalid(
            "results",
            format!(
                "results must contain between {} and {} words",
                BATCH_SIZE_RANGE.start(),
                BATCH_SIZE_RANGE.end()
            ),
        ));
    }
    results.iter().try_for_each(validate_attempt)
}
