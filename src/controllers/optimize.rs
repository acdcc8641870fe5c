/*
 * src/controllers/optimize.rs
 *
 * File for the optimizer endpoints
 *
 * Purpose:
 *   Serve `POST /optimize` (function-quota allocation) and
 *   `POST /optimize-route` (clustering preview allocation). Both share
 *   the optimizer pipeline end to end except for the allocator stage.
 */

use std::sync::Arc;

use axum::{Extension, Json, extract::rejection::JsonRejection};
use utoipa::OpenApi;

use crate::controllers::AxumRouter;
use crate::error::ApiResult;
use crate::http_models::optimize::{OptimizeRequest, OptimizeResponse};
use crate::optimizer::pipeline::{self, OptimizerContext};

#[derive(OpenApi)]
#[openapi(
	paths(api_optimize, api_optimize_route),
	info(
		title = "Optimizer Routes",
		description = "Multi-day tour itinerary optimization endpoints."
	),
	tags((name = "Optimizer"))
)]
pub struct OptimizerApiDoc;

/// Optimizes a multi-day itinerary using function-quota day allocation.
///
/// # Method
/// `POST /optimize`
#[utoipa::path(
	post,
	path = "/optimize",
	summary = "Optimize a multi-day itinerary (function-quota allocation)",
	request_body(content = OptimizeRequest, content_type = "application/json"),
	responses(
		(status = 200, description = "Optimized day plans", body = OptimizeResponse),
		(status = 400, description = "Malformed request body")
	),
	tag = "Optimizer"
)]
pub async fn api_optimize(
	Extension(ctx): Extension<Arc<OptimizerContext>>,
	payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> ApiResult<Json<OptimizeResponse>> {
	let Json(req) = payload?;
	Ok(Json(pipeline::optimize_quota(&ctx, req).await))
}

/// Optimizes a multi-day itinerary using geographic clustering preview
/// allocation.
///
/// # Method
/// `POST /optimize-route`
#[utoipa::path(
	post,
	path = "/optimize-route",
	summary = "Optimize a multi-day itinerary (clustering preview allocation)",
	request_body(content = OptimizeRequest, content_type = "application/json"),
	responses(
		(status = 200, description = "Optimized day plans", body = OptimizeResponse),
		(status = 400, description = "Malformed request body")
	),
	tag = "Optimizer"
)]
pub async fn api_optimize_route(
	Extension(ctx): Extension<Arc<OptimizerContext>>,
	payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> ApiResult<Json<OptimizeResponse>> {
	let Json(req) = payload?;
	Ok(Json(pipeline::optimize_cluster(&ctx, req).await))
}

pub fn optimize_routes() -> AxumRouter {
	AxumRouter::new()
		.route("/optimize", axum::routing::post(api_optimize))
		.route("/optimize-route", axum::routing::post(api_optimize_route))
}
