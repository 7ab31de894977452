use async_trait::async_trait;
use sqlx::Row;

use crate::db::DatabaseProxy;
use crate::store::{LearnerDirectory, StoreError};
use crate::types::Learner;

impl DatabaseProxy {
    pub async fn insert_profile(&self, learner: &Learner) -> Result<(), StoreError> {
        self.timed(
            sqlx::query(
                r#"
                INSERT INTO "profiles" ("id","parentId","displayName")
                VALUES (?,?,?)
                ON CONFLICT ("id") DO NOTHING
                "#,
            )
            .bind(&learner.id)
            .bind(&learner.parent_id)
            .bind(&learner.display_name)
            .execute(self.pool()),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LearnerDirectory for DatabaseProxy {
    async fn find_learner(&self, learner_id: &str) -> Result<Option<Learner>, StoreError> {
        let row = self
            .timed(
                sqlx::query(
                    r#"SELECT "id","parentId","displayName" FROM "profiles" WHERE "id" = ? LIMIT 1"#,
                )
                .bind(learner_id)
                .fetch_optional(self.pool()),
            )
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Learner {
            id: row.try_get("id")?,
            parent_id: row.try_get("parentId")?,
            display_name: row.try_get("displayName")?,
        }))
    }
}
