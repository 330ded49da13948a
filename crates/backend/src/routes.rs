use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A025 Marketplace order status
        // ========================================
        .route(
            "/api/order_status",
            get(handlers::a025_marketplace_order::list_statuses),
        )
        .route(
            "/api/order_status/normalize",
            get(handlers::a025_marketplace_order::normalize),
        )
        .route(
            "/api/order_status/transition",
            get(handlers::a025_marketplace_order::check_transition),
        )
        .route(
            "/api/order_status/plan",
            post(handlers::a025_marketplace_order::plan_status_change),
        )
}
