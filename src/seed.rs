use uuid::Uuid;

use crate::db::DatabaseProxy;
use crate::store::StoreError;
use crate::types::{Learner, VocabularyCategory, VocabularyWord};

pub const DEMO_PARENT_ID: &str = "00000000-0000-4000-8000-000000000001";
pub const DEMO_LEARNER_ID: &str = "00000000-0000-4000-8000-000000000002";

const DEMO_WORDS: &[(VocabularyCategory, &str, i32)] = &[
    (VocabularyCategory::Zwierzeta, "pies", 1),
    (VocabularyCategory::Zwierzeta, "kot", 1),
    (VocabularyCategory::Zwierzeta, "krowa", 1),
    (VocabularyCategory::Zwierzeta, "koń", 2),
    (VocabularyCategory::Zwierzeta, "słoń", 2),
    (VocabularyCategory::Zwierzeta, "żyrafa", 3),
    (VocabularyCategory::OwoceWarzywa, "jabłko", 1),
    (VocabularyCategory::OwoceWarzywa, "banan", 1),
    (VocabularyCategory::OwoceWarzywa, "marchewka", 2),
    (VocabularyCategory::OwoceWarzywa, "gruszka", 2),
    (VocabularyCategory::OwoceWarzywa, "pomidor", 2),
    (VocabularyCategory::Pojazdy, "auto", 1),
    (VocabularyCategory::Pojazdy, "autobus", 1),
    (VocabularyCategory::Pojazdy, "rower", 1),
    (VocabularyCategory::Pojazdy, "pociąg", 2),
    (VocabularyCategory::Pojazdy, "samolot", 2),
    (VocabularyCategory::Pojazdy, "statek", 2),
    (VocabularyCategory::Pojazdy, "tramwaj", 3),
    (VocabularyCategory::KoloryKsztalty, "czerwony", 1),
    (VocabularyCategory::KoloryKsztalty, "niebieski", 1),
    (VocabularyCategory::KoloryKsztalty, "koło", 1),
    (VocabularyCategory::KoloryKsztalty, "kwadrat", 2),
    (VocabularyCategory::KoloryKsztalty, "trójkąt", 2),
    (VocabularyCategory::PrzedmiotyCodzienne, "łyżka", 1),
    (VocabularyCategory::PrzedmiotyCodzienne, "kubek", 1),
    (VocabularyCategory::PrzedmiotyCodzienne, "krzesło", 1),
    (VocabularyCategory::PrzedmiotyCodzienne, "książka", 2),
    (VocabularyCategory::PrzedmiotyCodzienne, "zegar", 2),
];

/// Demo catalog with deterministic ids, so reseeding is idempotent.
pub fn demo_catalog() -> Vec<VocabularyWord> {
    DEMO_WORDS
        .iter()
        .map(|(category, text, difficulty)| {
            let key = format!("{}/{}", category.as_str(), text);
            VocabularyWord {
                id: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string(),
                word_text: (*text).to_string(),
                category: *category,
                language: "pl".to_string(),
                image_path: format!("vocabulary/{}/{}.jpg", category.as_str(), text),
                difficulty_level: Some(*difficulty),
            }
        })
        .collect()
}

pub fn demo_learner() -> Learner {
    Learner {
        id: DEMO_LEARNER_ID.to_string(),
        parent_id: DEMO_PARENT_ID.to_string(),
        display_name: "Demo".to_string(),
    }
}

pub async fn seed_demo_data(proxy: &DatabaseProxy) -> Result<(), StoreError> {
    let catalog = demo_catalog();
    for word in &catalog {
        proxy.insert_word(word).await?;
    }
    proxy.insert_profile(&demo_learner()).await?;

    tracing::info!(
        words = catalog.len(),
        learner_id = DEMO_LEARNER_ID,
        parent_id = DEMO_PARENT_ID,
        "seeded demo catalog"
    );
    Ok(())
}
