use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};

/// Строка лога запроса: `HH:MM:SS | 12ms | 200    GET /path`
pub fn format_request_line(
    timestamp: DateTime<Utc>,
    elapsed_ms: u128,
    status: u16,
    method: &str,
    path: &str,
) -> String {
    format!(
        "{} | {:>5}ms | {} {:>6} {}",
        timestamp.format("%H:%M:%S"),
        elapsed_ms,
        status,
        method,
        path
    )
}

/// Простой middleware для логирования запросов
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let line = format_request_line(
        Utc::now(),
        start.elapsed().as_millis(),
        response.status().as_u16(),
        method.as_str(),
        uri.path(),
    );
    if response.status().is_success() {
        tracing::info!("{}", line);
    } else {
        tracing::warn!("{}", line);
    }

    response
}
