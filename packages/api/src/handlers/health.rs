use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointIndex {
    pub health: &'static str,
    pub yellow_books: &'static str,
    pub categories: &'static str,
    pub reviews: &'static str,
    pub search: &'static str,
    pub business_details: &'static str,
    pub docs: &'static str,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ServiceBanner {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub endpoints: EndpointIndex,
    pub documentation: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Service",
    operation_id = "health",
    summary = "Liveness probe",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    operation_id = "serviceIndex",
    summary = "Service banner with an endpoint index",
    responses((status = 200, description = "Banner", body = ServiceBanner)),
)]
pub async fn index() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        name: "Yellow Book API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        timestamp: Utc::now(),
        endpoints: EndpointIndex {
            health: "/health",
            yellow_books: "/api/yellow-books",
            categories: "/api/categories",
            reviews: "/api/reviews/{businessId}",
            search: "/api/yellow-books?q=keyword",
            business_details: "/api/yellow-books/{id}",
            docs: "/swagger-ui",
        },
        documentation: "Yellow Book API - Монголын бизнесийн лавлагаа",
    })
}
