use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::subscription::{
        Subscription, SubscriptionServiceApi, SummaryRequest, SummaryResponse,
        UpdateSubscriptionRequest,
    },
    error::{AppError, AppResult},
};

const CURRENCY: &str = "RUB";
const STATUS_OK: &str = "Operation completed successfully";

/// Response for create: the id assigned by the store
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSubscriptionResponse {
    #[serde(rename = "subId")]
    pub sub_id: i32,
}

/// Response for list: subscriptions wrapped in a "data" field
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSubscriptionsResponse {
    pub data: Vec<Subscription>,
}

/// Confirmation body for operations that return no data
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

pub struct SubscriptionController {
    subscription_service: Arc<dyn SubscriptionServiceApi>,
}

impl SubscriptionController {
    pub fn new(subscription_service: Arc<dyn SubscriptionServiceApi>) -> Self {
        Self {
            subscription_service,
        }
    }

    /// POST /subscriptions/ - Create a new subscription
    pub async fn create(
        State(controller): State<Arc<SubscriptionController>>,
        payload: Result<Json<Subscription>, JsonRejection>,
    ) -> AppResult<Json<CreateSubscriptionResponse>> {
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.to_string()))?;
        request.validate().map_err(AppError::BadRequest)?;

        let sub_id = controller.subscription_service.create(request).await?;
        Ok(Json(CreateSubscriptionResponse { sub_id }))
    }

    /// GET /subscriptions/ - List all subscriptions
    pub async fn list(
        State(controller): State<Arc<SubscriptionController>>,
    ) -> AppResult<Json<ListSubscriptionsResponse>> {
        let data = controller.subscription_service.get_all().await?;
        Ok(Json(ListSubscriptionsResponse { data }))
    }

    /// GET /subscriptions/{subscription_id} - Get one subscription
    pub async fn get_by_id(
        State(controller): State<Arc<SubscriptionController>>,
        path: Result<Path<i32>, PathRejection>,
    ) -> AppResult<Json<Subscription>> {
        let Path(sub_id) = parse_sub_id(path)?;
        let subscription = controller.subscription_service.get_by_id(sub_id).await?;
        Ok(Json(subscription))
    }

    /// PUT /subscriptions/{subscription_id} - Partial update
    pub async fn update(
        State(controller): State<Arc<SubscriptionController>>,
        path: Result<Path<i32>, PathRejection>,
        payload: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
    ) -> AppResult<Json<StatusResponse>> {
        let Path(sub_id) = parse_sub_id(path)?;
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.to_string()))?;

        controller
            .subscription_service
            .update(sub_id, request)
            .await?;
        Ok(Json(StatusResponse {
            status: STATUS_OK.to_string(),
        }))
    }

    /// DELETE /subscriptions/{subscription_id} - Delete a subscription
    pub async fn delete(
        State(controller): State<Arc<SubscriptionController>>,
        path: Result<Path<i32>, PathRejection>,
    ) -> AppResult<Json<StatusResponse>> {
        let Path(sub_id) = parse_sub_id(path)?;

        controller.subscription_service.delete(sub_id).await?;
        Ok(Json(StatusResponse {
            status: STATUS_OK.to_string(),
        }))
    }

    /// GET /subscriptions/total-cost - Cost summary over a period
    pub async fn summary(
        State(controller): State<Arc<SubscriptionController>>,
        payload: Result<Json<SummaryRequest>, JsonRejection>,
    ) -> AppResult<Json<SummaryResponse>> {
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.to_string()))?;

        let total_cost = controller.subscription_service.get_summary(&request).await?;
        Ok(Json(SummaryResponse {
            total_cost,
            currency: CURRENCY.to_string(),
            period: request.period,
            filters: request.filters,
        }))
    }
}

fn parse_sub_id(path: Result<Path<i32>, PathRejection>) -> AppResult<Path<i32>> {
    path.map_err(|_| AppError::BadRequest("invalid subscription_id param".to_string()))
}
