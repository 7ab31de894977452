use chrono::Utc;
use uuid::Uuid;

use crate::services::error::EngineError;
use crate::services::validation::{validate_uuid, validate_word_count};
use crate::services::word_selector::{SelectedWord, WordSelector};
use crate::types::{GameSession, SelectionSummary, SessionWord, VocabularyCategory};

pub const DEFAULT_IMAGE_BASE: &str = "https://picsum.photos/seed";

#[derive(Debug, Clone)]
pub struct CreateSessionInput {
    pub learner_id: String,
    pub category: Option<VocabularyCategory>,
    pub word_count: usize,
}

#[derive(Clone)]
pub struct SessionBuilder {
    selector: WordSelector,
    image_base: String,
}

impl SessionBuilder {
    pub fn new(selector: WordSelector, image_base: impl Into<String>) -> Self {
        Self {
            selector,
            image_base: image_base.into(),
        }
    }

    pub async fn create_session(&self, input: CreateSessionInput) -> Result<GameSession, EngineError> {
        validate_word_count(input.word_count)?;
        validate_uuid("profile_id", &input.learner_id)?;

        // Prior progress travels with the selection; no second lookup.
        let words: Vec<SessionWord> = self
            .selector
            .select(&input.learner_id, input.category, input.word_count)
            .await?
            .into_iter()
            .map(|selected| self.session_word(selected))
            .collect();

        let selection_summary = summarize(&words, input.word_count);

        Ok(GameSession {
            session_id: Uuid::new_v4().to_string(),
            learner_id: input.learner_id,
            category: input.category,
            word_count: words.len(),
            words,
            selection_summary,
            created_at: Utc::now(),
        })
    }

    fn session_word(&self, selected: SelectedWord) -> SessionWord {
        let SelectedWord { word, progress } = selected;
        let record = progress.as_ref();
        let image_url = image_url(&self.image_base, &word.image_path);
        SessionWord {
            id: word.id,
            word_text: word.word_text,
            category: word.category,
            image_path: word.image_path,
            image_url,
            difficulty_level: word.difficulty_level,
            is_mastered: record.is_some_and(|r| r.is_mastered),
            previous_stars: record.map_or(0, |r| r.stars_earned),
            previous_attempts: record.map_or(0, |r| r.attempts_count),
        }
    }
}

pub fn summarize(words: &[SessionWord], word_count: usize) -> SelectionSummary {
    let mastered_words = words.iter().filter(|word| word.is_mastered).count();
    let unmastered_words = words.len() - mastered_words;

    let description = if unmastered_words > 0 {
        format!(
            "{}% new words, {}% review",
            percent(unmastered_words, word_count),
            percent(mastered_words, word_count)
        )
    } else {
        "All words mastered - review session".to_string()
    };

    SelectionSummary {
        unmastered_words,
        mastered_words,
        description,
    }
}

fn percent(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * 100.0 / whole as f64).round() as i64
}

/// Stable placeholder image derived from the file stem of the catalog path.
pub fn image_url(base: &str, image_path: &str) -> String {
    let file_name = image_path.rsplit('/').next().unwrap_or_default();
    let stem = [".jpg", ".png", ".svg"]
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name);
    let stem = if stem.is_empty() { "default" } else { stem };

    format!(
        "{}/{}/400/300",
        base.trim_end_matches('/'),
        string_hash(stem)
    )
}

fn string_hash(value: &str) -> i64 {
    let hash = value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32));
    (hash as i64).abs()
}
