use axum::{extract::Query, http::StatusCode, Json};
use contracts::domain::a025_marketplace_order::aggregate::{
    MarketplaceOrder, OrderStatusInfo, StatusChangeRequest, StatusNormalization,
    StatusTransitionCheck,
};
use serde::Deserialize;

use crate::domain::a025_marketplace_order::error::OrderStatusError;
use crate::domain::a025_marketplace_order::service;

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanStatusChangeBody {
    pub order: MarketplaceOrder,
    pub target: String,
}

/// Handler для получения справочника статусов заказа
pub async fn list_statuses() -> Json<Vec<OrderStatusInfo>> {
    Json(service::status_catalog())
}

/// Handler для нормализации произвольной строки статуса
pub async fn normalize(Query(query): Query<NormalizeQuery>) -> Json<StatusNormalization> {
    Json(service::normalize(query.value.as_deref()))
}

/// Handler для проверки допустимости перехода
pub async fn check_transition(
    Query(query): Query<TransitionQuery>,
) -> Json<StatusTransitionCheck> {
    Json(service::check_transition(
        query.from.as_deref(),
        query.to.as_deref(),
    ))
}

/// Handler для подготовки запроса на смену статуса
pub async fn plan_status_change(
    Json(body): Json<PlanStatusChangeBody>,
) -> Result<Json<StatusChangeRequest>, (StatusCode, Json<serde_json::Value>)> {
    service::plan_status_change(&body.order, &body.target)
        .map(Json)
        .map_err(|e| {
            tracing::warn!(
                "Status change rejected for order {:?}: {}",
                body.order.order_number,
                e
            );
            let status = match &e {
                OrderStatusError::MissingOrderNumber => StatusCode::BAD_REQUEST,
                OrderStatusError::TerminalStatus { .. }
                | OrderStatusError::TransitionNotAllowed { .. } => StatusCode::CONFLICT,
            };
            (
                status,
                Json(serde_json::json!({
                    "error": e.code(),
                    "message": e.to_string(),
                })),
            )
        })
}
