use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::services::error::EngineError;
use crate::services::validation::validate_word_count;
use crate::store::{ProgressStore, VocabularyCatalog};
use crate::types::{ProgressRecord, VocabularyCategory, VocabularyWord};

/// Picks session words: unseen first, then seen-but-unmastered, then mastered
/// words whose last attempt is oldest. The chosen set is shuffled.
#[derive(Clone)]
pub struct WordSelector {
    catalog: Arc<dyn VocabularyCatalog>,
    progress: Arc<dyn ProgressStore>,
}

/// A chosen word with the learner's row for it, if one exists.
#[derive(Debug, Clone)]
pub struct SelectedWord {
    pub word: VocabularyWord,
    pub progress: Option<ProgressRecord>,
}

impl WordSelector {
    pub fn new(catalog: Arc<dyn VocabularyCatalog>, progress: Arc<dyn ProgressStore>) -> Self {
        Self { catalog, progress }
    }

    /// Chosen words joined with the progress rows the selection was based on.
    pub async fn select(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
        count: usize,
    ) -> Result<Vec<SelectedWord>, EngineError> {
        validate_word_count(count)?;

        let candidates = self.catalog.list_words(category).await?;
        if candidates.len() < count {
            tracing::info!(
                learner_id,
                category = ?category,
                available = candidates.len(),
                requested = count,
                "not enough catalog words for session"
            );
            return Err(EngineError::InsufficientWords {
                available: candidates.len(),
                requested: count,
            });
        }

        let progress = self.progress.list_progress(learner_id, category).await?;
        Ok(prioritize(candidates, progress, count, &mut rand::rng()))
    }

    pub async fn select_words(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
        count: usize,
    ) -> Result<Vec<VocabularyWord>, EngineError> {
        let selected = self.select(learner_id, category, count).await?;
        Ok(selected.into_iter().map(|selected| selected.word).collect())
    }

    pub async fn select_word_ids(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
        count: usize,
    ) -> Result<Vec<String>, EngineError> {
        let selected = self.select(learner_id, category, count).await?;
        Ok(selected.into_iter().map(|selected| selected.word.id).collect())
    }
}

#[derive(Debug, Default)]
struct Partition {
    unseen: Vec<VocabularyWord>,
    learning: Vec<(VocabularyWord, ProgressRecord)>,
    mastered: Vec<(VocabularyWord, ProgressRecord)>,
}

fn partition(words: Vec<VocabularyWord>, progress: Vec<ProgressRecord>) -> Partition {
    let mut by_word: HashMap<String, ProgressRecord> = progress
        .into_iter()
        .map(|record| (record.word_id.clone(), record))
        .collect();

    let mut parts = Partition::default();
    for word in words {
        match by_word.remove(&word.id) {
            None => parts.unseen.push(word),
            Some(record) if record.is_mastered => parts.mastered.push((word, record)),
            Some(record) => parts.learning.push((word, record)),
        }
    }
    parts
}

/// Fill order is unseen, learning, mastered. Within the seen groups the least
/// recently attempted word goes first; ties are broken randomly.
pub(crate) fn prioritize<R: Rng + ?Sized>(
    words: Vec<VocabularyWord>,
    progress: Vec<ProgressRecord>,
    count: usize,
    rng: &mut R,
) -> Vec<SelectedWord> {
    let Partition {
        mut unseen,
        mut learning,
        mut mastered,
    } = partition(words, progress);

    unseen.shuffle(rng);
    learning.shuffle(rng);
    mastered.shuffle(rng);
    learning.sort_by_key(|(_, record)| record.last_attempted_at);
    mastered.sort_by_key(|(_, record)| record.last_attempted_at);

    let seen = |(word, record): (VocabularyWord, ProgressRecord)| SelectedWord {
        word,
        progress: Some(record),
    };
    let mut chosen: Vec<SelectedWord> = unseen
        .into_iter()
        .map(|word| SelectedWord {
            word,
            progress: None,
        })
        .chain(learning.into_iter().map(seen))
        .chain(mastered.into_iter().map(seen))
        .take(count)
        .collect();

    chosen.shuffle(rng);
    chosen
}
