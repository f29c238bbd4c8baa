use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("{0}")]
    Invalid(String),
    #[error("subscription not found")]
    NotFound,
}

impl From<AppError> for SubscriptionServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => SubscriptionServiceError::Invalid(msg),
            AppError::NotFound(_) => SubscriptionServiceError::NotFound,
            _ => SubscriptionServiceError::Dependency(err.to_string()),
        }
    }
}

// Every service-layer failure surfaces as 500. The controllers classify only
// their own extractor rejections as client errors.
impl From<SubscriptionServiceError> for AppError {
    fn from(err: SubscriptionServiceError) -> Self {
        AppError::Internal(err.to_string())
    }
}
