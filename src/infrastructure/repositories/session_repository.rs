//! SeaORM implementation of SessionRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, SessionRepository};
use crate::models::session::{ActiveModel, Column, Entity as SessionEntity, Model};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of SessionRepository
pub struct SeaOrmSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SeaOrmSessionRepository {
    async fn create(
        &self,
        id: String,
        user_id: i32,
        expires_at: String,
    ) -> Result<Model, DomainError> {
        let session = ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            created_at: Set(now_timestamp()),
            expires_at: Set(expires_at),
        };

        Ok(session.insert(&self.db).await?)
    }

    async fn find_active(&self, id: &str, now: &str) -> Result<Option<Model>, DomainError> {
        let session = SessionEntity::find_by_id(id.to_owned())
            .filter(Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await?;

        Ok(session)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        SessionEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self, now: &str) -> Result<u64, DomainError> {
        let result = SessionEntity::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
