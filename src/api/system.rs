use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::domain::customer::CustomerService;
use crate::health::HealthStatus;

/// GET /ping - liveness probe
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "result": "pong" }))
}

/// GET /health - 503 when storage reports unhealthy
pub async fn health(service: web::Data<CustomerService>) -> HttpResponse {
    let storage = service.dao().check_health().await;

    let unhealthy = storage.status.is_unhealthy();
    let status = match &storage.status {
        HealthStatus::Healthy => "healthy",
        HealthStatus::Degraded(_) => "degraded",
        HealthStatus::Unhealthy(_) => "unhealthy",
    };
    let body = json!({
        "status": status,
        "service": "customer-api",
        "components": [storage],
    });

    if unhealthy {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
