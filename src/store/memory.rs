use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::store::{LearnerDirectory, ProgressStore, StoreError, VocabularyCatalog};
use crate::types::{AttemptOutcome, Learner, ProgressRecord, VocabularyCategory, VocabularyWord};

/// Process-local store implementing every collaborator trait.
///
/// Catalog order is insertion order. The progress map is guarded by a single
/// write lock so concurrent upserts for one pair serialise through the merge rule.
#[derive(Default)]
pub struct MemoryStore {
    words: RwLock<Vec<VocabularyWord>>,
    learners: RwLock<HashMap<String, Learner>>,
    progress: RwLock<HashMap<(String, String), ProgressRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<VocabularyWord>) -> Self {
        let store = Self::new();
        *store.words.write() = words;
        store
    }

    pub fn insert_word(&self, word: VocabularyWord) {
        let mut words = self.words.write();
        words.retain(|existing| existing.id != word.id);
        words.push(word);
    }

    pub fn insert_learner(&self, learner: Learner) {
        self.learners.write().insert(learner.id.clone(), learner);
    }

    pub fn insert_progress(&self, record: ProgressRecord) {
        self.progress
            .write()
            .insert((record.learner_id.clone(), record.word_id.clone()), record);
    }

    pub fn progress_snapshot(&self, learner_id: &str, word_id: &str) -> Option<ProgressRecord> {
        self.progress
            .read()
            .get(&(learner_id.to_string(), word_id.to_string()))
            .cloned()
    }

    pub fn progress_len(&self) -> usize {
        self.progress.read().len()
    }
}

#[async_trait]
impl VocabularyCatalog for MemoryStore {
    async fn get_word(&self, word_id: &str) -> Result<Option<VocabularyWord>, StoreError> {
        Ok(self
            .words
            .read()
            .iter()
            .find(|word| word.id == word_id)
            .cloned())
    }

    async fn list_words(
        &self,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<VocabularyWord>, StoreError> {
        Ok(self
            .words
            .read()
            .iter()
            .filter(|word| category.map_or(true, |c| word.category == c))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get_progress(
        &self,
        learner_id: &str,
        word_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self.progress_snapshot(learner_id, word_id))
    }

    async fn list_progress(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        let words = self.words.read();
        let progress = self.progress.read();
        Ok(progress
            .values()
            .filter(|record| record.learner_id == learner_id)
            .filter(|record| {
                category.map_or(true, |c| {
                    words
                        .iter()
                        .any(|word| word.id == record.word_id && word.category == c)
                })
            })
            .cloned()
            .collect())
    }

    async fn upsert_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Result<ProgressRecord, StoreError> {
        let mut progress = self.progress.write();
        let key = (learner_id.to_string(), word_id.to_string());
        let merged = match progress.get(&key) {
            Some(existing) => existing.merge_attempt(outcome),
            None => ProgressRecord::first_attempt(learner_id, word_id, outcome),
        };
        progress.insert(key, merged.clone());
        Ok(merged)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl LearnerDirectory for MemoryStore {
    async fn find_learner(&self, learner_id: &str) -> Result<Option<Learner>, StoreError> {
        Ok(self.learners.read().get(learner_id).cloned())
    }
}
