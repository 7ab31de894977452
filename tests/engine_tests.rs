use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use wordplay_backend::services::game_session::CreateSessionInput;
use wordplay_backend::services::{EngineError, WordSelector};
use wordplay_backend::state::AppState;
use wordplay_backend::store::memory::MemoryStore;
use wordplay_backend::types::{
    AttemptOutcome, AttemptResult, BatchItemStatus, ProgressRecord, VocabularyCategory,
};

mod common;

use common::{words, CountingStore, Fixture, FlakyStore};

fn attempt(word_id: &str, is_correct: bool, attempt_number: i32) -> AttemptResult {
    AttemptResult {
        word_id: word_id.to_string(),
        is_correct,
        attempt_number,
    }
}

fn mastered(learner_id: &str, word_id: &str, days_ago: i64) -> ProgressRecord {
    ProgressRecord::first_attempt(
        learner_id,
        word_id,
        AttemptOutcome {
            is_correct: true,
            stars: 3,
            attempted_at: Utc::now() - Duration::days(days_ago),
        },
    )
}

#[tokio::test]
async fn test_insufficient_words_reports_counts() {
    let fixture = Fixture::new(words(3, VocabularyCategory::Pojazdy));
    let state = fixture.state();

    let err = state
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: Some(VocabularyCategory::Pojazdy),
            word_count: 10,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::InsufficientWords {
            available: 3,
            requested: 10
        }
    ));
}

#[tokio::test]
async fn test_word_count_out_of_range_rejected_before_io() {
    let store = Arc::new(CountingStore::new(MemoryStore::with_words(words(
        20,
        VocabularyCategory::Zwierzeta,
    ))));
    let state = AppState::from_store(Arc::clone(&store), None);

    for word_count in [0, 3, 21] {
        let err = state
            .sessions()
            .create_session(CreateSessionInput {
                learner_id: Uuid::new_v4().to_string(),
                category: None,
                word_count,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidRequest {
                field: "word_count",
                ..
            }
        ));
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_new_learner_session_is_all_unseen() {
    let fixture = Fixture::new(words(12, VocabularyCategory::Zwierzeta));
    let state = fixture.state();

    let session = state
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: Some(VocabularyCategory::Zwierzeta),
            word_count: 10,
        })
        .await
        .unwrap();

    assert_eq!(session.word_count, 10);
    assert_eq!(session.words.len(), 10);
    let unique: HashSet<_> = session.words.iter().map(|w| w.id.clone()).collect();
    assert_eq!(unique.len(), 10);
    assert!(session.words.iter().all(|w| !w.is_mastered && w.previous_attempts == 0));
    assert_eq!(session.selection_summary.unmastered_words, 10);
    assert_eq!(session.selection_summary.description, "100% new words, 0% review");
    assert!(session
        .words
        .iter()
        .all(|w| w.image_url.starts_with(common::TEST_IMAGE_BASE)));
}

#[tokio::test]
async fn test_mastered_words_only_fill_shortfall() {
    let fixture = Fixture::new(words(12, VocabularyCategory::Zwierzeta));
    let ids = fixture.word_ids(None).await;
    for word_id in &ids[..6] {
        fixture
            .store
            .insert_progress(mastered(&fixture.learner_id, word_id, 2));
    }
    let state = fixture.state();

    let session = state
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: None,
            word_count: 6,
        })
        .await
        .unwrap();
    assert!(session.words.iter().all(|w| !w.is_mastered));

    let session = state
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: None,
            word_count: 10,
        })
        .await
        .unwrap();
    assert_eq!(session.selection_summary.unmastered_words, 6);
    assert_eq!(session.selection_summary.mastered_words, 4);
    assert_eq!(session.selection_summary.description, "60% new words, 40% review");
    assert!(session
        .words
        .iter()
        .filter(|w| w.is_mastered)
        .all(|w| w.previous_stars == 3 && w.previous_attempts == 1));
}

#[tokio::test]
async fn test_fully_mastered_catalog_is_review_session() {
    let fixture = Fixture::new(words(5, VocabularyCategory::KoloryKsztalty));
    for word_id in fixture.word_ids(None).await {
        fixture
            .store
            .insert_progress(mastered(&fixture.learner_id, &word_id, 1));
    }

    let session = fixture
        .state()
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: None,
            word_count: 5,
        })
        .await
        .unwrap();

    assert_eq!(
        session.selection_summary.description,
        "All words mastered - review session"
    );
}

#[tokio::test]
async fn test_retry_keeps_best_stars_and_mastery() {
    let fixture = Fixture::new(words(5, VocabularyCategory::Zwierzeta));
    let word_id = fixture.word_ids(None).await.remove(0);
    let state = fixture.state();

    let first = state
        .recorder()
        .record_attempt(&fixture.learner_id, &word_id, false, 1)
        .await
        .unwrap();
    assert_eq!(first.stars_earned, 0);
    assert!(!first.is_mastered);
    assert_eq!(first.attempts_count, 1);

    let second = state
        .recorder()
        .record_attempt(&fixture.learner_id, &word_id, true, 2)
        .await
        .unwrap();
    assert_eq!(second.stars_earned, 2);
    assert!(second.is_mastered);
    assert_eq!(second.attempts_count, 2);
    assert_eq!(second.id, first.id);

    let third = state
        .recorder()
        .record_attempt(&fixture.learner_id, &word_id, false, 1)
        .await
        .unwrap();
    assert_eq!(third.stars_earned, 2);
    assert!(third.is_mastered);
    assert_eq!(third.attempts_count, 3);
    assert!(third.last_attempted_at >= second.last_attempted_at);
    assert_eq!(fixture.store.progress_len(), 1);
}

#[tokio::test]
async fn test_unknown_word_is_not_found() {
    let fixture = Fixture::new(words(5, VocabularyCategory::Zwierzeta));
    let err = fixture
        .state()
        .recorder()
        .record_attempt(&fixture.learner_id, &Uuid::new_v4().to_string(), true, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::NotFound(_)));
    assert_eq!(fixture.store.progress_len(), 0);
}

#[tokio::test]
async fn test_batch_isolates_unknown_word() {
    let fixture = Fixture::new(words(5, VocabularyCategory::Zwierzeta));
    let ids = fixture.word_ids(None).await;
    let missing = Uuid::new_v4().to_string();

    let report = fixture
        .state()
        .batches()
        .record_batch(
            &fixture.learner_id,
            &[
                attempt(&ids[0], true, 1),
                attempt(&missing, true, 1),
                attempt(&ids[1], true, 3),
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.processed, 3);
    let statuses: Vec<_> = report.results.iter().map(|item| item.status).collect();
    assert_eq!(
        statuses,
        [
            BatchItemStatus::Success,
            BatchItemStatus::Error,
            BatchItemStatus::Success
        ]
    );
    assert_eq!(report.results[0].stars_earned, 3);
    assert_eq!(report.results[1].stars_earned, 0);
    assert!(report.results[1].error_message.is_some());
    assert_eq!(report.results[2].stars_earned, 1);
    assert_eq!(report.failed_items().count(), 1);
    assert_eq!(fixture.store.progress_len(), 2);
}

#[tokio::test]
async fn test_batch_duplicates_merge_in_order() {
    let fixture = Fixture::new(words(5, VocabularyCategory::Zwierzeta));
    let word_id = fixture.word_ids(None).await.remove(0);

    let report = fixture
        .state()
        .batches()
        .record_batch(
            &fixture.learner_id,
            &[attempt(&word_id, false, 1), attempt(&word_id, true, 2)],
        )
        .await
        .unwrap();

    assert_eq!(report.results[0].stars_earned, 0);
    assert!(!report.results[0].is_mastered);
    assert_eq!(report.results[1].stars_earned, 2);
    assert!(report.results[1].is_mastered);

    let row = fixture
        .store
        .progress_snapshot(&fixture.learner_id, &word_id)
        .unwrap();
    assert_eq!(row.attempts_count, 2);
}

#[tokio::test]
async fn test_batch_isolates_transient_storage_error() {
    let catalog = words(5, VocabularyCategory::Pojazdy);
    let failing = catalog[1].id.clone();
    let ids: Vec<_> = catalog.iter().map(|w| w.id.clone()).collect();
    let store = Arc::new(FlakyStore::new(MemoryStore::with_words(catalog)));
    store.fail_upserts_for(&failing);
    let learner_id = Uuid::new_v4().to_string();
    let state = AppState::from_store(Arc::clone(&store), None);

    let report = state
        .batches()
        .record_batch(
            &learner_id,
            &[
                attempt(&ids[0], true, 1),
                attempt(&failing, true, 1),
                attempt(&ids[2], false, 1),
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.results[1].status, BatchItemStatus::Error);
    assert_eq!(report.failed_items().count(), 1);
    assert!(store.inner.progress_snapshot(&learner_id, &ids[0]).is_some());
    assert!(store.inner.progress_snapshot(&learner_id, &failing).is_none());
    assert!(store.inner.progress_snapshot(&learner_id, &ids[2]).is_some());
}

#[tokio::test]
async fn test_batch_shape_errors_reject_whole_batch() {
    let fixture = Fixture::new(words(5, VocabularyCategory::Zwierzeta));
    let ids = fixture.word_ids(None).await;
    let batches = fixture.state().batches().clone();

    let err = batches
        .record_batch(&fixture.learner_id, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest { field: "results", .. }));

    let err = batches
        .record_batch(
            &fixture.learner_id,
            &[attempt(&ids[0], true, 1), attempt(&ids[1], true, 11)],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidRequest {
            field: "attempt_number",
            ..
        }
    ));
    assert_eq!(fixture.store.progress_len(), 0);
}

#[tokio::test]
async fn test_session_reflects_recorded_progress() {
    let fixture = Fixture::new(words(5, VocabularyCategory::OwoceWarzywa));
    let ids = fixture.word_ids(None).await;
    let state = fixture.state();
    state
        .recorder()
        .record_attempt(&fixture.learner_id, &ids[0], true, 1)
        .await
        .unwrap();

    let session = state
        .sessions()
        .create_session(CreateSessionInput {
            learner_id: fixture.learner_id.clone(),
            category: Some(VocabularyCategory::OwoceWarzywa),
            word_count: 5,
        })
        .await
        .unwrap();

    let practiced = session.words.iter().find(|w| w.id == ids[0]).unwrap();
    assert!(practiced.is_mastered);
    assert_eq!(practiced.previous_stars, 3);
    assert_eq!(practiced.previous_attempts, 1);
    assert_eq!(session.selection_summary.mastered_words, 1);
}

#[tokio::test]
async fn test_select_word_ids_distinct_and_shuffled() {
    let catalog = words(12, VocabularyCategory::Zwierzeta);
    let catalog_ids: Vec<String> = catalog.iter().map(|w| w.id.clone()).collect();
    let store = Arc::new(MemoryStore::with_words(catalog));
    let selector = WordSelector::new(store.clone(), store);
    let learner_id = Uuid::new_v4().to_string();

    let mut saw_reordering = false;
    for _ in 0..20 {
        let ids = selector
            .select_word_ids(&learner_id, Some(VocabularyCategory::Zwierzeta), 12)
            .await
            .unwrap();
        assert_eq!(ids.len(), 12);
        let unique: HashSet<_> = ids.iter().cloned().collect();
        assert_eq!(unique.len(), 12);
        assert!(ids.iter().all(|id| catalog_ids.contains(id)));
        saw_reordering |= ids != catalog_ids;
    }
    assert!(saw_reordering);

    let ids = selector
        .select_word_ids(&learner_id, None, 7)
        .await
        .unwrap();
    assert_eq!(ids.len(), 7);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 7);

    let err = selector
        .select_word_ids(&learner_id, Some(VocabularyCategory::Pojazdy), 5)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientWords {
            available: 0,
            requested: 5
        }
    ));
}
