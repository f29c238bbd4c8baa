use super::error::SubscriptionServiceError;
use crate::domain::subscription::{
    add_one_month, parse_month_year, NewSubscription, Subscription, SubscriptionChanges,
    SummaryQuery, SummaryRequest, UpdateSubscriptionRequest,
};
use crate::infrastructure::repositories::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionStore>) -> Self {
        Self { repo }
    }
}

#[async_trait]
pub trait SubscriptionServiceApi: Send + Sync {
    async fn create(&self, request: Subscription) -> Result<i32, SubscriptionServiceError>;

    async fn get_all(&self) -> Result<Vec<Subscription>, SubscriptionServiceError>;

    async fn get_by_id(&self, sub_id: i32) -> Result<Subscription, SubscriptionServiceError>;

    async fn update(
        &self,
        sub_id: i32,
        request: UpdateSubscriptionRequest,
    ) -> Result<(), SubscriptionServiceError>;

    async fn delete(&self, sub_id: i32) -> Result<(), SubscriptionServiceError>;

    async fn get_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<i64, SubscriptionServiceError>;
}

#[async_trait]
impl SubscriptionServiceApi for SubscriptionService {
    async fn create(&self, request: Subscription) -> Result<i32, SubscriptionServiceError> {
        let user_id = parse_user_id(&request.user_id)?;
        let start_date = parse_start_date(&request.start_date)?;
        let finish_date = derive_finish_date(start_date)?;

        let sub_id = self
            .repo
            .create(NewSubscription {
                service_name: request.service_name,
                price: request.price,
                user_id,
                start_date,
                finish_date,
            })
            .await?;

        Ok(sub_id)
    }

    async fn get_all(&self) -> Result<Vec<Subscription>, SubscriptionServiceError> {
        let records = self.repo.find_all().await?;
        Ok(records.into_iter().map(Subscription::from).collect())
    }

    async fn get_by_id(&self, sub_id: i32) -> Result<Subscription, SubscriptionServiceError> {
        let record = self.repo.find_by_id(sub_id).await?;
        Ok(Subscription::from(record))
    }

    async fn update(
        &self,
        sub_id: i32,
        request: UpdateSubscriptionRequest,
    ) -> Result<(), SubscriptionServiceError> {
        request
            .validate()
            .map_err(SubscriptionServiceError::Invalid)?;

        let mut changes = SubscriptionChanges {
            price: request.price,
            ..Default::default()
        };

        if let Some(start_date) = request.start_date.as_deref() {
            let start_date = parse_start_date(start_date)?;
            changes.start_date = Some(start_date);
            changes.finish_date = Some(derive_finish_date(start_date)?);
        }

        self.repo.update(sub_id, changes).await?;

        Ok(())
    }

    async fn delete(&self, sub_id: i32) -> Result<(), SubscriptionServiceError> {
        self.repo.delete(sub_id).await?;

        Ok(())
    }

    async fn get_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<i64, SubscriptionServiceError> {
        let start_date = parse_start_date(&request.period.start_date)?;
        let finish_date = parse_start_date(&request.period.finish_date)?;

        let user_id = match request.filters.user_id.as_deref() {
            Some(raw) => Some(parse_user_id(raw)?),
            None => None,
        };

        let total_cost = self
            .repo
            .summary(SummaryQuery {
                user_id,
                service_name: request.filters.service_name.clone(),
                start_date,
                finish_date,
            })
            .await?;

        Ok(total_cost)
    }
}

fn parse_user_id(raw: &str) -> Result<Uuid, SubscriptionServiceError> {
    Uuid::parse_str(raw).map_err(|e| {
        SubscriptionServiceError::Invalid(format!("invalid user ID format: {}", e))
    })
}

fn parse_start_date(raw: &str) -> Result<DateTime<Utc>, SubscriptionServiceError> {
    parse_month_year(raw).ok_or_else(|| {
        SubscriptionServiceError::Invalid(
            "invalid start date format, expected MM-YYYY".to_string(),
        )
    })
}

fn derive_finish_date(start_date: DateTime<Utc>) -> Result<DateTime<Utc>, SubscriptionServiceError> {
    add_one_month(start_date).ok_or_else(|| {
        SubscriptionServiceError::Invalid("start date out of range".to_string())
    })
}
