pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{AttemptOutcome, Learner, ProgressRecord, VocabularyCategory, VocabularyWord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("store operation timed out")]
    Timeout,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::Corrupt(_))
    }
}

#[async_trait]
pub trait VocabularyCatalog: Send + Sync {
    async fn get_word(&self, word_id: &str) -> Result<Option<VocabularyWord>, StoreError>;

    /// All catalog words, optionally restricted to one category.
    async fn list_words(
        &self,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<VocabularyWord>, StoreError>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get_progress(
        &self,
        learner_id: &str,
        word_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError>;

    /// Every row the learner has, optionally restricted to one catalog category.
    /// One round-trip whose size does not depend on the catalog.
    async fn list_progress(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<ProgressRecord>, StoreError>;

    /// Atomic insert-or-merge keyed by `(learner_id, word_id)`: a fresh row takes the outcome,
    /// an existing row keeps the max stars, ORs mastery and increments attempts.
    async fn upsert_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Result<ProgressRecord, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait LearnerDirectory: Send + Sync {
    async fn find_learner(&self, learner_id: &str) -> Result<Option<Learner>, StoreError>;
}
