use crate::services::error::EngineError;
use crate::services::progress::ProgressRecorder;
use crate::services::validation::{validate_batch, validate_uuid};
use crate::types::{AttemptResult, BatchItemStatus, BatchReport, BatchReportItem};

/// Records a finished session item by item. A failing item is reported and
/// skipped; earlier successes stay persisted.
#[derive(Clone)]
pub struct BatchRecorder {
    recorder: ProgressRecorder,
}

impl BatchRecorder {
    pub fn new(recorder: ProgressRecorder) -> Self {
        Self { recorder }
    }

    pub async fn record_batch(
        &self,
        learner_id: &str,
        results: &[AttemptResult],
    ) -> Result<BatchReport, EngineError> {
        validate_uuid("profile_id", learner_id)?;
        validate_batch(results)?;

        // Sequential on purpose: duplicate word ids must merge in input order.
        let mut report = Vec::with_capacity(results.len());
        for result in results {
            let item = match self
                .recorder
                .record_attempt(
                    learner_id,
                    &result.word_id,
                    result.is_correct,
                    result.attempt_number,
                )
                .await
            {
                Ok(record) => BatchReportItem {
                    word_id: result.word_id.clone(),
                    status: BatchItemStatus::Success,
                    stars_earned: record.stars_earned,
                    is_mastered: record.is_mastered,
                    error_message: None,
                },
                Err(err) => {
                    tracing::error!(
                        learner_id,
                        word_id = %result.word_id,
                        error = %err,
                        error_kind = err.kind(),
                        retryable = err.is_retryable(),
                        "failed to record batch item"
                    );
                    BatchReportItem {
                        word_id: result.word_id.clone(),
                        status: BatchItemStatus::Error,
                        stars_earned: 0,
                        is_mastered: false,
                        error_message: Some(err.to_string()),
                    }
                }
            };
            report.push(item);
        }

        Ok(BatchReport {
            learner_id: learner_id.to_string(),
            processed: results.len(),
            results: report,
        })
    }
}
