#![allow(unexpected_cfgs)]

mod controllers;
mod error;
mod global;
mod http_models;
mod log;
mod middleware;
mod models;
mod optimizer;

#[cfg(not(tarpaulin_include))]
mod swagger;

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::Extension;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::controllers::AxumRouter;
use crate::optimizer::pipeline::OptimizerContext;
use crate::optimizer::travel_time::HttpDistanceMatrixClient;

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();
	log::init_panic_handler();
	log::init_logger();

	let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

	// DISTANCE_MATRIX_API_KEY is optional: its absence just means every
	// request falls back to the haversine estimator.
	let distance_matrix_client = env::var("DISTANCE_MATRIX_API_KEY")
		.ok()
		.map(|key| Box::new(HttpDistanceMatrixClient::new(key)) as Box<dyn crate::optimizer::travel_time::DistanceMatrixClient>);
	// GEOCODING_API_KEY is read for parity with the upstream pipeline's
	// .env but this service never calls a geocoding collaborator directly.
	let _ = env::var("GEOCODING_API_KEY");

	let ctx = Arc::new(OptimizerContext { distance_matrix_client });

	let cors = CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST])
		.allow_headers(Any);

	let api_routes = AxumRouter::new()
		.merge(controllers::health::health_routes())
		.merge(controllers::optimize::optimize_routes());

	#[cfg(all(not(test), debug_assertions))]
	let api_routes = crate::swagger::merge_swagger(api_routes);

	let app = axum::Router::new()
		.merge(api_routes)
		.layer(axum::middleware::from_fn(middleware::trace_requests))
		.layer(Extension(ctx))
		.layer(cors);

	let addr = SocketAddr::from_str(&bind_address).expect("Invalid BIND_ADDRESS format");
	tracing::info!("server starting on {bind_address}");

	let listener = tokio::net::TcpListener::bind(addr).await?;
	axum::serve(listener, app.into_make_service()).await?;

	Ok(())
}
