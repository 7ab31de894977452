use std::sync::Arc;

use chrono::Utc;

use crate::services::error::EngineError;
use crate::services::scoring;
use crate::services::validation::{validate_attempt_number, validate_uuid};
use crate::store::{ProgressStore, VocabularyCatalog};
use crate::types::{AttemptOutcome, ProgressRecordView};

#[derive(Clone)]
pub struct ProgressRecorder {
    catalog: Arc<dyn VocabularyCatalog>,
    progress: Arc<dyn ProgressStore>,
}

impl ProgressRecorder {
    pub fn new(catalog: Arc<dyn VocabularyCatalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self { catalog, progress }
    }

    /// Scores one answer and merges it into the learner's row for the word.
    pub async fn record_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        is_correct: bool,
        attempt_number: i32,
    ) -> Result<ProgressRecordView, EngineError> {
        validate_uuid("profile_id", learner_id)?;
        validate_uuid("vocabulary_id", word_id)?;
        validate_attempt_number(attempt_number)?;

        let Some(word) = self.catalog.get_word(word_id).await? else {
            return Err(EngineError::NotFound(format!(
                "Vocabulary word not found: {word_id}"
            )));
        };

        let outcome = AttemptOutcome {
            is_correct,
            stars: scoring::stars(attempt_number, is_correct),
            attempted_at: Utc::now(),
        };
        let record = self
            .progress
            .upsert_attempt(learner_id, word_id, outcome)
            .await?;

        tracing::debug!(
            learner_id,
            word_id,
            is_correct,
            attempt_number,
            stars_earned = record.stars_earned,
            attempts_count = record.attempts_count,
            "attempt recorded"
        );

        Ok(ProgressRecordView::new(record, &word))
    }
}
