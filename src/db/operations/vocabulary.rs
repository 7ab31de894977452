use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DatabaseProxy;
use crate::store::{StoreError, VocabularyCatalog};
use crate::types::{VocabularyCategory, VocabularyWord};

fn map_vocabulary_row(row: &SqliteRow) -> Result<VocabularyWord, StoreError> {
    let category_code: String = row.try_get("category")?;
    let category = VocabularyCategory::parse(&category_code)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown category {category_code:?}")))?;

    Ok(VocabularyWord {
        id: row.try_get("id")?,
        word_text: row.try_get("wordText")?,
        category,
        language: row.try_get("language")?,
        image_path: row.try_get("imagePath")?,
        difficulty_level: row.try_get("difficultyLevel")?,
    })
}

impl DatabaseProxy {
    pub async fn insert_word(&self, word: &VocabularyWord) -> Result<(), StoreError> {
        self.timed(
            sqlx::query(
                r#"
                INSERT INTO "vocabulary" ("id","wordText","category","language","imagePath","difficultyLevel")
                VALUES (?,?,?,?,?,?)
                ON CONFLICT ("id") DO UPDATE SET
                  "wordText" = excluded."wordText",
                  "category" = excluded."category",
                  "language" = excluded."language",
                  "imagePath" = excluded."imagePath",
                  "difficultyLevel" = excluded."difficultyLevel"
                "#,
            )
            .bind(&word.id)
            .bind(&word.word_text)
            .bind(word.category.as_str())
            .bind(&word.language)
            .bind(&word.image_path)
            .bind(word.difficulty_level)
            .execute(self.pool()),
        )
        .await?;
        Ok(())
    }

    pub async fn count_words(&self) -> Result<i64, StoreError> {
        self.timed(
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM "vocabulary""#).fetch_one(self.pool()),
        )
        .await
    }
}

#[async_trait]
impl VocabularyCatalog for DatabaseProxy {
    async fn get_word(&self, word_id: &str) -> Result<Option<VocabularyWord>, StoreError> {
        let row = self
            .timed(
                sqlx::query(r#"SELECT * FROM "vocabulary" WHERE "id" = ? LIMIT 1"#)
                    .bind(word_id)
                    .fetch_optional(self.pool()),
            )
            .await?;
        row.as_ref().map(map_vocabulary_row).transpose()
    }

    async fn list_words(
        &self,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<VocabularyWord>, StoreError> {
        let rows = match category {
            Some(category) => {
                self.timed(
                    sqlx::query(
                        r#"SELECT * FROM "vocabulary" WHERE "category" = ? ORDER BY "wordText" ASC"#,
                    )
                    .bind(category.as_str())
                    .fetch_all(self.pool()),
                )
                .await?
            }
            None => {
                self.timed(
                    sqlx::query(r#"SELECT * FROM "vocabulary" ORDER BY "wordText" ASC"#)
                        .fetch_all(self.pool()),
                )
                .await?
            }
        };
        rows.iter().map(map_vocabulary_row).collect()
    }
}
