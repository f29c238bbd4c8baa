use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Wire representation of a subscription. Dates travel as "MM-YYYY" strings,
/// the user id as a textual UUID. Also used as the create request body, where
/// `id` and `finish_date` are absent and filled in server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: i32,
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
    #[serde(default)]
    pub finish_date: String,
}

impl Subscription {
    /// Required-field validation for create requests. Empty strings and a
    /// non-positive price count as missing.
    pub fn validate(&self) -> Result<(), String> {
        if self.service_name.is_empty() {
            return Err("Error: service_name is required".to_string());
        }
        if self.price <= 0 {
            return Err("Error: price is required and must be positive".to_string());
        }
        if self.user_id.is_empty() {
            return Err("Error: user_id is required".to_string());
        }
        if self.start_date.is_empty() {
            return Err("Error: start_date is required".to_string());
        }
        Ok(())
    }
}

/// Storage representation of a subscription row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SubscriptionRecord {
    pub id: i32,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
}

impl From<SubscriptionRecord> for Subscription {
    fn from(record: SubscriptionRecord) -> Self {
        Self {
            id: record.id,
            service_name: record.service_name,
            price: record.price,
            user_id: record.user_id.to_string(),
            start_date: format_month_year(&record.start_date),
            finish_date: format_month_year(&record.finish_date),
        }
    }
}

/// Insert payload, id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
}

/// Partial update request. Absent fields are left unchanged; at least one
/// must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub price: Option<i32>,
    pub start_date: Option<String>,
}

impl UpdateSubscriptionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.price.is_none() && self.start_date.is_none() {
            return Err("update structure has no values".to_string());
        }
        Ok(())
    }
}

/// Typed column changes handed to the store. finish_date is always set
/// together with start_date.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionChanges {
    pub price: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
}

impl SubscriptionChanges {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.start_date.is_none() && self.finish_date.is_none()
    }
}

/// Summary request: a required period plus optional filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub period: Period,
    #[serde(default)]
    pub filters: SummaryFilters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    pub start_date: String,
    pub finish_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryFilters {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

/// Summary response: the request echoed back with the computed totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_cost: i64,
    pub currency: String,
    pub period: Period,
    pub filters: SummaryFilters,
}

/// Typed summary criteria handed to the store
#[derive(Debug, Clone)]
pub struct SummaryQuery {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
}

/// Parse a "MM-YYYY" string into a UTC timestamp at the first of the month.
pub fn parse_month_year(value: &str) -> Option<DateTime<Utc>> {
    let (month, year) = value.split_once('-')?;
    if month.len() != 2 || year.len() != 4 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Render a timestamp back to its "MM-YYYY" wire form.
pub fn format_month_year(value: &DateTime<Utc>) -> String {
    format!("{:02}-{:04}", value.month(), value.year())
}

/// Finish date derivation: exactly one calendar month after the start.
pub fn add_one_month(value: DateTime<Utc>) -> Option<DateTime<Utc>> {
    value.checked_add_months(Months::new(1))
}
