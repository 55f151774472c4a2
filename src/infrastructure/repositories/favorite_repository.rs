//! SeaORM implementation of FavoriteRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    DomainError, FavoriteFilter, FavoriteRepository, FavoriteStats, FavoriteUpdate, NewFavorite,
};
use crate::models::favorite_movie::{
    ActiveModel, Column, Entity as FavoriteEntity, FavoriteMovie, WatchStatus,
};

/// SeaORM-based implementation of FavoriteRepository
pub struct SeaOrmFavoriteRepository {
    db: DatabaseConnection,
}

impl SeaOrmFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live rows owned by `user_id`
    fn owned(user_id: i32) -> Select<FavoriteEntity> {
        FavoriteEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
    }
}

#[async_trait]
impl FavoriteRepository for SeaOrmFavoriteRepository {
    async fn create(&self, input: NewFavorite) -> Result<FavoriteMovie, DomainError> {
        let genre_ids =
            serde_json::to_string(&input.genre_ids).unwrap_or_else(|_| "[]".to_string());

        let favorite = ActiveModel {
            user_id: Set(input.user_id),
            tmdb_id: Set(input.tmdb_id),
            title: Set(input.title),
            overview: Set(input.overview),
            release_date: Set(input.release_date),
            poster_path: Set(input.poster_path),
            genre_ids: Set(genre_ids),
            status: Set(input.status),
            rating: Set(input.rating),
            notes: Set(input.notes),
            recommended_by: Set(input.recommended_by),
            added_at: Set(input.added_at.clone()),
            watched_at: Set(input.watched_at),
            created_at: Set(input.added_at.clone()),
            updated_at: Set(input.added_at),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = favorite
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::from_db_with_duplicate(e, "movie is already in favorites"))?;

        Ok(FavoriteMovie::from(model))
    }

    async fn find_all(
        &self,
        user_id: i32,
        filter: FavoriteFilter,
    ) -> Result<Vec<FavoriteMovie>, DomainError> {
        let mut query = Self::owned(user_id);

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }

        // Id breaks ties between rows added within the same microsecond
        query = query
            .order_by_desc(Column::AddedAt)
            .order_by_desc(Column::Id);

        if filter.limit > 0 {
            query = query.offset(filter.offset).limit(filter.limit);
        }

        let favorites = query.all(&self.db).await?;
        Ok(favorites.into_iter().map(FavoriteMovie::from).collect())
    }

    async fn find_by_id(&self, id: i32, user_id: i32) -> Result<Option<FavoriteMovie>, DomainError> {
        let favorite = Self::owned(user_id)
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(favorite.map(FavoriteMovie::from))
    }

    async fn update(
        &self,
        id: i32,
        user_id: i32,
        update: FavoriteUpdate,
        now: String,
    ) -> Result<FavoriteMovie, DomainError> {
        let mut statement = FavoriteEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null());

        match update {
            FavoriteUpdate::Status { status, watched_at } => {
                statement = statement.col_expr(Column::Status, Expr::value(status.as_str()));
                // Single statement: an existing watched_at always wins
                if let Some(watched_at) = watched_at {
                    statement = statement.col_expr(
                        Column::WatchedAt,
                        SimpleExpr::FunctionCall(Func::coalesce([
                            Expr::col(Column::WatchedAt).into(),
                            Expr::value(watched_at),
                        ])),
                    );
                }
            }
            FavoriteUpdate::Rating(rating) => {
                statement = statement.col_expr(Column::Rating, Expr::value(rating));
            }
            FavoriteUpdate::Notes {
                notes,
                recommended_by,
            } => {
                statement = statement
                    .col_expr(Column::Notes, Expr::value(notes))
                    .col_expr(Column::RecommendedBy, Expr::value(recommended_by));
            }
        }

        let result = statement.exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        self.find_by_id(id, user_id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    async fn delete(&self, id: i32, user_id: i32, now: String) -> Result<(), DomainError> {
        let result = FavoriteEntity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn stats(&self, user_id: i32) -> Result<FavoriteStats, DomainError> {
        // One grouped read, so the partitions always add up to the total
        let counts: Vec<(WatchStatus, i64)> = Self::owned(user_id)
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Status)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut stats = FavoriteStats::default();
        for (status, count) in counts {
            let count = count.max(0) as u64;
            match status {
                WatchStatus::ToWatch => stats.to_watch = count,
                WatchStatus::Watched => stats.watched = count,
                WatchStatus::Recommended => stats.recommended = count,
            }
            stats.total += count;
        }

        Ok(stats)
    }
}
