//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::{DomainError, NewUser, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};
use crate::models::{favorite_movie, session};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: NewUser) -> Result<Model, DomainError> {
        let now = now_timestamp();

        let user = ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        user.insert(&self.db).await.map_err(|e| {
            DomainError::from_db_with_duplicate(e, "username or email already exists")
        })
    }

    async fn find_active_by_login(&self, identifier: &str) -> Result<Option<Model>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::DeletedAt.is_null())
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await?;

        Ok(user)
    }

    async fn find_active_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        let user = UserEntity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(user)
    }

    async fn soft_delete(&self, id: i32) -> Result<(), DomainError> {
        let now = now_timestamp();
        let txn = self.db.begin().await?;

        let result = UserEntity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(now.clone()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::NotFound);
        }

        favorite_movie::Entity::update_many()
            .col_expr(favorite_movie::Column::DeletedAt, Expr::value(now.clone()))
            .col_expr(favorite_movie::Column::UpdatedAt, Expr::value(now))
            .filter(favorite_movie::Column::UserId.eq(id))
            .filter(favorite_movie::Column::DeletedAt.is_null())
            .exec(&txn)
            .await?;

        session::Entity::delete_many()
            .filter(session::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
