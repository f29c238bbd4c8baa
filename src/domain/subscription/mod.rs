pub mod error;
pub mod model;
pub mod service;

pub use error::SubscriptionServiceError;
pub use model::{
    add_one_month, format_month_year, parse_month_year, NewSubscription, Period, Subscription,
    SubscriptionChanges, SubscriptionRecord, SummaryFilters, SummaryQuery, SummaryRequest,
    SummaryResponse, UpdateSubscriptionRequest,
};
pub use service::{SubscriptionService, SubscriptionServiceApi};
