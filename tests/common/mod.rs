#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use uuid::Uuid;

use wordplay_backend::state::AppState;
use wordplay_backend::store::memory::MemoryStore;
use wordplay_backend::store::{LearnerDirectory, ProgressStore, StoreError, VocabularyCatalog};
use wordplay_backend::types::{
    AttemptOutcome, Learner, ProgressRecord, VocabularyCategory, VocabularyWord,
};

pub const TEST_IMAGE_BASE: &str = "https://images.test/seed";

pub fn word(text: &str, category: VocabularyCategory) -> VocabularyWord {
    VocabularyWord {
        id: Uuid::new_v4().to_string(),
        word_text: text.to_string(),
        category,
        language: "pl".to_string(),
        image_path: format!("vocabulary/{}/{text}.jpg", category.as_str()),
        difficulty_level: Some(1),
    }
}

pub fn words(count: usize, category: VocabularyCategory) -> Vec<VocabularyWord> {
    (0..count)
        .map(|i| word(&format!("{}-{i}", category.as_str()), category))
        .collect()
}

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub parent_id: String,
    pub learner_id: String,
}

impl Fixture {
    pub fn new(catalog: Vec<VocabularyWord>) -> Self {
        let store = Arc::new(MemoryStore::with_words(catalog));
        let parent_id = Uuid::new_v4().to_string();
        let learner_id = Uuid::new_v4().to_string();
        store.insert_learner(Learner {
            id: learner_id.clone(),
            parent_id: parent_id.clone(),
            display_name: "Ola".to_string(),
        });
        Self {
            store,
            parent_id,
            learner_id,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::from_store(Arc::clone(&self.store), Some(TEST_IMAGE_BASE.to_string()))
    }

    pub fn app(&self) -> Router {
        wordplay_backend::create_app(self.state())
    }

    pub async fn word_ids(&self, category: Option<VocabularyCategory>) -> Vec<String> {
        self.store
            .list_words(category)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect()
    }
}

pub fn create_test_app() -> (Router, Fixture) {
    let mut catalog = words(12, VocabularyCategory::Zwierzeta);
    catalog.extend(words(3, VocabularyCategory::Pojazdy));
    let fixture = Fixture::new(catalog);
    (fixture.app(), fixture)
}

/// Wraps a `MemoryStore` and fails upserts for chosen words.
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing_words: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_words: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_upserts_for(&self, word_id: &str) {
        self.failing_words.lock().insert(word_id.to_string());
    }
}

#[async_trait]
impl VocabularyCatalog for FlakyStore {
    async fn get_word(&self, word_id: &str) -> Result<Option<VocabularyWord>, StoreError> {
        self.inner.get_word(word_id).await
    }

    async fn list_words(
        &self,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<VocabularyWord>, StoreError> {
        self.inner.list_words(category).await
    }
}

#[async_trait]
impl ProgressStore for FlakyStore {
    async fn get_progress(
        &self,
        learner_id: &str,
        word_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        self.inner.get_progress(learner_id, word_id).await
    }

    async fn list_progress(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        self.inner.list_progress(learner_id, category).await
    }

    async fn upsert_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Result<ProgressRecord, StoreError> {
        if self.failing_words.lock().contains(word_id) {
            return Err(StoreError::Timeout);
        }
        self.inner.upsert_attempt(learner_id, word_id, outcome).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("flaky".to_string()))
    }
}

#[async_trait]
impl LearnerDirectory for FlakyStore {
    async fn find_learner(&self, learner_id: &str) -> Result<Option<Learner>, StoreError> {
        self.inner.find_learner(learner_id).await
    }
}

/// Counts every store call; used to prove that validation happens before I/O.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl VocabularyCatalog for CountingStore {
    async fn get_word(&self, word_id: &str) -> Result<Option<VocabularyWord>, StoreError> {
        self.hit();
        self.inner.get_word(word_id).await
    }

    async fn list_words(
        &self,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<VocabularyWord>, StoreError> {
        self.hit();
        self.inner.list_words(category).await
    }
}

#[async_trait]
impl ProgressStore for CountingStore {
    async fn get_progress(
        &self,
        learner_id: &str,
        word_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        self.hit();
        self.inner.get_progress(learner_id, word_id).await
    }

    async fn list_progress(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        self.hit();
        self.inner.list_progress(learner_id, category).await
    }

    async fn upsert_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Result<ProgressRecord, StoreError> {
        self.hit();
        self.inner.upsert_attempt(learner_id, word_id, outcome).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.hit();
        Ok(())
    }
}

#[async_trait]
impl LearnerDirectory for CountingStore {
    async fn find_learner(&self, learner_id: &str) -> Result<Option<Learner>, StoreError> {
        self.hit();
        self.inner.find_learner(learner_id).await
    }
}
