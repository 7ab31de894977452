use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_STARS: i32 = 0;
pub const MAX_STARS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyCategory {
    Zwierzeta,
    OwoceWarzywa,
    Pojazdy,
    KoloryKsztalty,
    PrzedmiotyCodzienne,
}

impl VocabularyCategory {
    pub const ALL: [VocabularyCategory; 5] = [
        VocabularyCategory::Zwierzeta,
        VocabularyCategory::OwoceWarzywa,
        VocabularyCategory::Pojazdy,
        VocabularyCategory::KoloryKsztalty,
        VocabularyCategory::PrzedmiotyCodzienne,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyCategory::Zwierzeta => "zwierzeta",
            VocabularyCategory::OwoceWarzywa => "owoce_warzywa",
            VocabularyCategory::Pojazdy => "pojazdy",
            VocabularyCategory::KoloryKsztalty => "kolory_ksztalty",
            VocabularyCategory::PrzedmiotyCodzienne => "przedmioty_codzienne",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value.trim())
    }
}

impl std::fmt::Display for VocabularyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry. Owned by content loading; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: String,
    pub word_text: String,
    pub category: VocabularyCategory,
    pub language: String,
    pub image_path: String,
    pub difficulty_level: Option<i32>,
}

/// Child profile; `parent_id` is the owning parent account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learner {
    pub id: String,
    pub parent_id: String,
    pub display_name: String,
}

/// Per-(learner, word) progress row.
///
/// `is_mastered` is sticky and `stars_earned` never decreases; both are
/// enforced by [`ProgressRecord::merge_attempt`] and by the sqlite upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: String,
    pub learner_id: String,
    pub word_id: String,
    pub is_mastered: bool,
    pub stars_earned: i32,
    pub attempts_count: i32,
    pub last_attempted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One scored attempt, ready to be merged into a progress row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub is_correct: bool,
    pub stars: i32,
    pub attempted_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn first_attempt(
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            learner_id: learner_id.to_string(),
            word_id: word_id.to_string(),
            is_mastered: outcome.is_correct,
            stars_earned: outcome.stars.clamp(MIN_STARS, MAX_STARS),
            attempts_count: 1,
            last_attempted_at: outcome.attempted_at,
            created_at: outcome.attempted_at,
            updated_at: outcome.attempted_at,
        }
    }

    pub fn merge_attempt(&self, outcome: AttemptOutcome) -> Self {
        Self {
            id: self.id.clone(),
            learner_id: self.learner_id.clone(),
            word_id: self.word_id.clone(),
            is_mastered: self.is_mastered || outcome.is_correct,
            stars_earned: self
                .stars_earned
                .max(outcome.stars.clamp(MIN_STARS, MAX_STARS)),
            attempts_count: self.attempts_count.saturating_add(1),
            last_attempted_at: outcome.attempted_at,
            created_at: self.created_at,
            updated_at: outcome.attempted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttemptResult {
    #[serde(rename = "vocabulary_id")]
    pub word_id: String,
    pub is_correct: bool,
    pub attempt_number: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionWord {
    pub id: String,
    pub word_text: String,
    pub category: VocabularyCategory,
    pub image_path: String,
    pub image_url: String,
    pub difficulty_level: Option<i32>,
    pub is_mastered: bool,
    pub previous_stars: i32,
    pub previous_attempts: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectionSummary {
    pub unmastered_words: usize,
    pub mastered_words: usize,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    pub session_id: String,
    #[serde(rename = "profile_id")]
    pub learner_id: String,
    pub category: Option<VocabularyCategory>,
    pub word_count: usize,
    pub words: Vec<SessionWord>,
    #[serde(rename = "algorithm")]
    pub selection_summary: SelectionSummary,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordDetails {
    pub word_text: String,
    pub category: VocabularyCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressRecordView {
    pub id: String,
    #[serde(rename = "profile_id")]
    pub learner_id: String,
    #[serde(rename = "vocabulary_id")]
    pub word_id: String,
    pub is_mastered: bool,
    pub stars_earned: i32,
    pub attempts_count: i32,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub last_attempted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub updated_at: DateTime<Utc>,
    pub word_details: WordDetails,
}

impl ProgressRecordView {
    pub fn new(record: ProgressRecord, word: &VocabularyWord) -> Self {
        Self {
            id: record.id,
            learner_id: record.learner_id,
            word_id: record.word_id,
            is_mastered: record.is_mastered,
            stars_earned: record.stars_earned,
            attempts_count: record.attempts_count,
            last_attempted_at: record.last_attempted_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            word_details: WordDetails {
                word_text: word.word_text.clone(),
                category: word.category,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BatchReportItem {
    #[serde(rename = "vocabulary_id")]
    pub word_id: String,
    pub status: BatchItemStatus,
    pub stars_earned: i32,
    pub is_mastered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(rename = "profile_id")]
    pub learner_id: String,
    pub processed: usize,
    pub results: Vec<BatchReportItem>,
}

impl BatchReport {
    pub fn failed_items(&self) -> impl Iterator<Item = &BatchReportItem> {
        self.results
            .iter()
            .filter(|item| item.status == BatchItemStatus::Error)
    }
}

pub fn format_iso_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_iso_millis(value))
}
