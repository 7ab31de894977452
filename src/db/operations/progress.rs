use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::operations::parse_timestamp;
use crate::db::DatabaseProxy;
use crate::store::{ProgressStore, StoreError};
use crate::types::{
    format_iso_millis, AttemptOutcome, ProgressRecord, VocabularyCategory, MAX_STARS, MIN_STARS,
};

fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StoreError> {
    let last_attempted_at: String = row.try_get("lastAttemptedAt")?;
    let created_at: String = row.try_get("createdAt")?;
    let updated_at: String = row.try_get("updatedAt")?;

    Ok(ProgressRecord {
        id: row.try_get("id")?,
        learner_id: row.try_get("profileId")?,
        word_id: row.try_get("vocabularyId")?,
        is_mastered: row.try_get("isMastered")?,
        stars_earned: row.try_get("starsEarned")?,
        attempts_count: row.try_get("attemptsCount")?,
        last_attempted_at: parse_timestamp("lastAttemptedAt", &last_attempted_at)?,
        created_at: parse_timestamp("createdAt", &created_at)?,
        updated_at: parse_timestamp("updatedAt", &updated_at)?,
    })
}

#[async_trait]
impl ProgressStore for DatabaseProxy {
    async fn get_progress(
        &self,
        learner_id: &str,
        word_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        let row = self
            .timed(
                sqlx::query(
                    r#"SELECT * FROM "user_progress" WHERE "profileId" = ? AND "vocabularyId" = ? LIMIT 1"#,
                )
                .bind(learner_id)
                .bind(word_id)
                .fetch_optional(self.pool()),
            )
            .await?;
        row.as_ref().map(map_progress_row).transpose()
    }

    async fn list_progress(
        &self,
        learner_id: &str,
        category: Option<VocabularyCategory>,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        let rows = match category {
            Some(category) => {
                self.timed(
                    sqlx::query(
                        r#"
                        SELECT p.* FROM "user_progress" p
                        JOIN "vocabulary" v ON v."id" = p."vocabularyId"
                        WHERE p."profileId" = ? AND v."category" = ?
                        "#,
                    )
                    .bind(learner_id)
                    .bind(category.as_str())
                    .fetch_all(self.pool()),
                )
                .await?
            }
            None => {
                self.timed(
                    sqlx::query(r#"SELECT * FROM "user_progress" WHERE "profileId" = ?"#)
                        .bind(learner_id)
                        .fetch_all(self.pool()),
                )
                .await?
            }
        };
        rows.iter().map(map_progress_row).collect()
    }

    async fn upsert_attempt(
        &self,
        learner_id: &str,
        word_id: &str,
        outcome: AttemptOutcome,
    ) -> Result<ProgressRecord, StoreError> {
        let now = format_iso_millis(&outcome.attempted_at);
        let stars = outcome.stars.clamp(MIN_STARS, MAX_STARS);

        // A single statement: the uniqueness constraint serialises writers and
        // the DO UPDATE clause applies max/or/increment against the stored row.
        // fetch_all steps the statement to completion so the write commits here.
        let rows = self
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO "user_progress"
                      ("id","profileId","vocabularyId","isMastered","starsEarned","attemptsCount","lastAttemptedAt","createdAt","updatedAt")
                    VALUES (?,?,?,?,?,1,?,?,?)
                    ON CONFLICT ("profileId","vocabularyId") DO UPDATE SET
                      "starsEarned" = MAX("user_progress"."starsEarned", excluded."starsEarned"),
                      "isMastered" = ("user_progress"."isMastered" OR excluded."isMastered"),
                      "attemptsCount" = "user_progress"."attemptsCount" + 1,
                      "lastAttemptedAt" = excluded."lastAttemptedAt",
                      "updatedAt" = excluded."updatedAt"
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(learner_id)
                .bind(word_id)
                .bind(outcome.is_correct)
                .bind(stars)
                .bind(&now)
                .bind(&now)
                .bind(&now)
                .fetch_all(self.pool()),
            )
            .await?;

        let row = rows.first().ok_or_else(|| {
            StoreError::Corrupt(format!(
                "upsert returned no row for {learner_id}/{word_id}"
            ))
        })?;
        map_progress_row(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.timed(sqlx::query("SELECT 1").execute(self.pool()))
            .await
            .map(|_| ())
    }
}
