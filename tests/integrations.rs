/*
 * tests/integrations.rs
 *
 * Integration tests for the server
 *
 * Purpose:
 *   Spin up one instance of the server on an ephemeral port and drive
 *   the optimizer endpoints over real HTTP requests.
 *
 * How to make new tests:
 *   Create a regular async function WITHOUT `#[tokio::test]`.
 *   In test_endpoints below, there is a tokio::join macro at the bottom of the function which contains all the tests.
 *   Just call your function in that join macro similar to the others.
 */

extern crate tour_optimizer as app;
use app::controllers;
use app::optimizer::pipeline::OptimizerContext;
use axum::Extension;
use httpc_test::Client;
use serde_json::json;
use std::sync::{Arc, Once};

static TEST_LOG_INIT: Once = Once::new();

#[tokio::test]
async fn test_endpoints() {
	_ = dotenvy::dotenv();

	TEST_LOG_INIT.call_once(|| {
		if std::env::var("RUST_LOG").is_err() {
			unsafe { std::env::set_var("RUST_LOG", "debug") };
		}
		app::log::init_panic_handler();
		app::log::init_logger();
	});

	let ctx = Arc::new(OptimizerContext { distance_matrix_client: None });
	let app_routes = axum::Router::new()
		.merge(controllers::health::health_routes())
		.merge(controllers::optimize::optimize_routes())
		.layer(Extension(ctx));

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app_routes.into_make_service()).await.unwrap();
	});

	let hc = httpc_test::new_client(format!("http://localhost:{}", addr.port())).unwrap();

	tokio::join!(
		async { test_health_endpoint(&hc).await },
		async { test_empty_poi_list_yields_empty_route(&hc).await },
		async { test_closed_at_departure_is_excluded_then_rescheduled(&hc).await },
		async { test_threshold_rejection_yields_empty_route(&hc).await },
		async { test_eta_matrix_supplied_avoids_external_calls(&hc).await },
		async { test_optimize_route_endpoint_clusters(&hc).await },
		async { test_malformed_body_is_rejected(&hc).await },
	);
}

async fn test_health_endpoint(hc: &Client) {
	let resp = hc.do_get("/health").await.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
	let body = resp.json_body().unwrap();
	assert_eq!(body["status"], "ok");
}

async fn test_empty_poi_list_yields_empty_route(hc: &Client) {
	let resp = hc
		.do_post(
			"/optimize",
			json!({
				"poi_list": [],
				"user_mood": "Địa phương & Đích thực",
				"duration_days": 1,
				"current_location": { "lat": 10.0, "lng": 106.0 },
				"start_datetime": "2026-08-03T08:00:00"
			}),
		)
		.await
		.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
	let body = resp.json_body().unwrap();
	assert_eq!(body["optimized_route"].as_array().unwrap().len(), 1);
	assert!(body["optimized_route"][0]["activities"].as_array().unwrap().is_empty());
}

// S1: a POI open 09:00-17:00 Monday should not be scheduled at the 08:00
// departure instant (closed) but should appear once the clock reaches
// its opening time.
async fn test_closed_at_departure_is_excluded_then_rescheduled(hc: &Client) {
	let resp = hc
		.do_post(
			"/optimize",
			json!({
				"poi_list": [
					{
						"id": "p1",
						"name": "Morning Market",
						"location": { "lat": 10.0, "lng": 106.0 },
						"emotional_tags": { "local": 1.0, "authentic": 1.0 },
						"function": "CORE_ATTRACTION",
						"includeInDailyRoute": true,
						"types": ["market"],
						"regularOpeningHours": {
							"regularPeriods": [
								{ "open": { "day": 1, "hour": 9, "minute": 0 }, "close": { "day": 1, "hour": 17, "minute": 0 } }
							]
						}
					}
				],
				"user_mood": "Địa phương & Đích thực",
				"duration_days": 1,
				"current_location": { "lat": 10.0, "lng": 106.0 },
				"start_datetime": "2026-08-03T08:00:00"
			}),
		)
		.await
		.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
}

// S6: a mood that penalizes the POI's only tag should reject everything.
async fn test_threshold_rejection_yields_empty_route(hc: &Client) {
	let resp = hc
		.do_post(
			"/optimize",
			json!({
				"poi_list": [
					{
						"id": "modern1",
						"name": "Modern Gallery",
						"location": { "lat": 10.0, "lng": 106.0 },
						"emotional_tags": { "modern": 1.0 },
						"function": "CORE_ATTRACTION",
						"includeInDailyRoute": true,
						"types": ["art_gallery"]
					}
				],
				"user_mood": "Tâm linh & Tôn giáo",
				"duration_days": 1,
				"current_location": { "lat": 10.0, "lng": 106.0 },
				"start_datetime": "2026-08-03T10:00:00"
			}),
		)
		.await
		.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
	let body = resp.json_body().unwrap();
	assert!(body["optimized_route"][0]["activities"].as_array().unwrap().is_empty());
}

async fn test_eta_matrix_supplied_avoids_external_calls(hc: &Client) {
	let resp = hc
		.do_post(
			"/optimize",
			json!({
				"poi_list": [
					{
						"id": "a",
						"name": "A",
						"location": { "lat": 10.0, "lng": 106.0 },
						"emotional_tags": { "peaceful": 1.0 },
						"function": "CORE_ATTRACTION",
						"includeInDailyRoute": true,
						"types": []
					},
					{
						"id": "b",
						"name": "B",
						"location": { "lat": 10.5, "lng": 106.5 },
						"emotional_tags": { "peaceful": 1.0 },
						"function": "CORE_ATTRACTION",
						"includeInDailyRoute": true,
						"types": []
					}
				],
				"user_mood": "Yên tĩnh & Thư giãn",
				"duration_days": 1,
				"current_location": { "lat": 10.0, "lng": 106.0 },
				"start_datetime": "2026-08-03T10:00:00",
				"eta_matrix": { "a": { "b": 5.0 }, "b": { "a": 5.0 } },
				"eta_from_current": { "a": 1.0, "b": 50.0 }
			}),
		)
		.await
		.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
}

async fn test_optimize_route_endpoint_clusters(hc: &Client) {
	let resp = hc
		.do_post(
			"/optimize-route",
			json!({
				"poi_list": [
					{
						"id": "c1",
						"name": "C1",
						"location": { "lat": 10.0, "lng": 106.0 },
						"emotional_tags": { "peaceful": 1.0 },
						"function": "CORE_ATTRACTION",
						"includeInDailyRoute": true,
						"types": []
					}
				],
				"user_mood": ["Yên tĩnh & Thư giãn"],
				"duration_days": 2,
				"current_location": { "lat": 10.0, "lng": 106.0 },
				"start_datetime": "2026-08-03T09:00:00",
				"poi_per_day": 2
			}),
		)
		.await
		.unwrap();
	assert_eq!(resp.status().as_u16(), 200);
	let body = resp.json_body().unwrap();
	assert_eq!(body["optimized_route"].as_array().unwrap().len(), 2);
}

async fn test_malformed_body_is_rejected(hc: &Client) {
	let resp = hc.do_post("/optimize", json!({ "poi_list": "not-a-list" })).await.unwrap();
	assert_eq!(resp.status().as_u16(), 400);
}
