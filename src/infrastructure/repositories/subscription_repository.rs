use crate::infrastructure::db::DbPool;
use crate::{
    domain::subscription::{
        NewSubscription, SubscriptionChanges, SubscriptionRecord, SummaryQuery,
    },
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use std::sync::Arc;

/// CRUD contract for the subscriptions table. One Postgres implementation;
/// tests substitute an in-memory double.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn create(&self, sub: NewSubscription) -> AppResult<i32>;

    async fn find_all(&self) -> AppResult<Vec<SubscriptionRecord>>;

    async fn find_by_id(&self, sub_id: i32) -> AppResult<SubscriptionRecord>;

    async fn update(&self, sub_id: i32, changes: SubscriptionChanges) -> AppResult<()>;

    async fn delete(&self, sub_id: i32) -> AppResult<()>;

    async fn summary(&self, query: SummaryQuery) -> AppResult<i64>;
}

pub struct SubscriptionRepository {
    pool: Arc<DbPool>,
}

impl SubscriptionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    /// Insert a subscription and return its generated id. The insert and the
    /// id scan run in one transaction, rolled back if the scan fails.
    async fn create(&self, sub: NewSubscription) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO subscriptions (service_name, price, user_id, start_date, finish_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.user_id)
        .bind(sub.start_date)
        .bind(sub.finish_date)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(sub_id) => {
                tx.commit().await?;
                Ok(sub_id)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(AppError::Database(e))
            }
        }
    }

    async fn find_all(&self) -> AppResult<Vec<SubscriptionRecord>> {
        let pool = self.pool.as_ref();
        let records = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT id, service_name, price, user_id, start_date, finish_date
            FROM subscriptions
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    async fn find_by_id(&self, sub_id: i32) -> AppResult<SubscriptionRecord> {
        let pool = self.pool.as_ref();
        let record = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT id, service_name, price, user_id, start_date, finish_date
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(sub_id)
        .fetch_optional(pool)
        .await?;

        record.ok_or_else(|| AppError::NotFound("subscription not found".to_string()))
    }

    /// Partial update rendered from the present fields as (column, value)
    /// pairs. Column names come from a fixed set; only values are bound.
    async fn update(&self, sub_id: i32, changes: SubscriptionChanges) -> AppResult<()> {
        if changes.is_empty() {
            return Err(AppError::BadRequest(
                "update structure has no values".to_string(),
            ));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE subscriptions SET ");
        let mut set_clauses = builder.separated(", ");

        if let Some(price) = changes.price {
            set_clauses.push("price = ").push_bind_unseparated(price);
        }
        if let Some(start_date) = changes.start_date {
            set_clauses
                .push("start_date = ")
                .push_bind_unseparated(start_date);
        }
        if let Some(finish_date) = changes.finish_date {
            set_clauses
                .push("finish_date = ")
                .push_bind_unseparated(finish_date);
        }

        builder.push(" WHERE id = ").push_bind(sub_id);

        builder.build().execute(self.pool.as_ref()).await?;

        Ok(())
    }

    /// Delete one row. Zero affected rows is surfaced as an error, not a
    /// silent success.
    async fn delete(&self, sub_id: i32) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(sub_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("subscription not found".to_string()));
        }

        Ok(())
    }

    /// Sum of prices over rows whose start date falls inside the period,
    /// narrowed by the optional user and service filters.
    async fn summary(&self, query: SummaryQuery) -> AppResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(price), 0) FROM subscriptions WHERE start_date >= ",
        );
        builder.push_bind(query.start_date);
        builder.push(" AND start_date <= ").push_bind(query.finish_date);

        if let Some(user_id) = query.user_id {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(service_name) = query.service_name {
            builder.push(" AND service_name = ").push_bind(service_name);
        }

        let total_cost: i64 = builder
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total_cost)
    }
}
