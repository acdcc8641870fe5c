/*
 * src/controllers/health.rs
 *
 * File for liveness endpoints
 *
 * Purpose:
 *   Serve `GET /` and `GET /health`, used by load balancers and
 *   deployment tooling to confirm the process is up.
 */

use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::controllers::AxumRouter;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: &'static str,
	pub service: &'static str,
}

#[derive(OpenApi)]
#[openapi(
	paths(api_health),
	info(title = "Health Routes", description = "Liveness checks."),
	tags((name = "Health"))
)]
pub struct HealthApiDoc;

#[utoipa::path(
	get,
	path = "/",
	summary = "Liveness check",
	responses((status = 200, description = "Service is up", body = HealthResponse)),
	tag = "Health"
)]
pub async fn api_health() -> Json<HealthResponse> {
	Json(HealthResponse { status: "ok", service: "tour-optimizer" })
}

pub fn health_routes() -> AxumRouter {
	AxumRouter::new()
		.route("/", axum::routing::get(api_health))
		.route("/health", axum::routing::get(api_health))
}
