use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::services::game_session::DEFAULT_IMAGE_BASE;
use crate::services::{BatchRecorder, ProgressRecorder, SessionBuilder, WordSelector};
use crate::store::{LearnerDirectory, ProgressStore, VocabularyCatalog};

/// Shared handles for request handlers. Every collaborator is injected here;
/// nothing in the engine reaches for global state.
#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    learners: Arc<dyn LearnerDirectory>,
    progress: Arc<dyn ProgressStore>,
    sessions: SessionBuilder,
    recorder: ProgressRecorder,
    batches: BatchRecorder,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn VocabularyCatalog>,
        progress: Arc<dyn ProgressStore>,
        learners: Arc<dyn LearnerDirectory>,
        image_base: impl Into<String>,
    ) -> Self {
        let selector = WordSelector::new(Arc::clone(&catalog), Arc::clone(&progress));
        let recorder = ProgressRecorder::new(Arc::clone(&catalog), Arc::clone(&progress));

        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            learners,
            sessions: SessionBuilder::new(selector, image_base),
            batches: BatchRecorder::new(recorder.clone()),
            recorder,
            progress,
        }
    }

    /// Convenience for stores that implement every collaborator trait.
    pub fn from_store<S>(store: Arc<S>, image_base: Option<String>) -> Self
    where
        S: VocabularyCatalog + ProgressStore + LearnerDirectory + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store,
            image_base.unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string()),
        )
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn learners(&self) -> &dyn LearnerDirectory {
        self.learners.as_ref()
    }

    pub fn progress_store(&self) -> &dyn ProgressStore {
        self.progress.as_ref()
    }

    pub fn sessions(&self) -> &SessionBuilder {
        &self.sessions
    }

    pub fn recorder(&self) -> &ProgressRecorder {
        &self.recorder
    }

    pub fn batches(&self) -> &BatchRecorder {
        &self.batches
    }
}
