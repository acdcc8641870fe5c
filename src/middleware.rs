/*
 * src/middleware.rs
 *
 * Purpose:
 *   Ambient request logging. The teacher's middleware in this slot decrypted
 *   an auth cookie and injected an `AuthUser` extension; this service has no
 *   accounts, so the equivalent ambient concern is simply recording
 *   method/path/status/latency for every request.
 */

use axum::{extract::Request, middleware::Next, response::IntoResponse};
use std::time::Instant;
use tracing::info;

pub async fn trace_requests(req: Request, next: Next) -> impl IntoResponse {
	let method = req.method().clone();
	let path = req.uri().path().to_string();
	let start = Instant::now();

	let response = next.run(req).await;

	let status = response.status();
	let elapsed = start.elapsed();
	if status.is_server_error() {
		tracing::error!(%method, %path, %status, ?elapsed, "request failed");
	} else {
		info!(%method, %path, %status, ?elapsed, "request handled");
	}

	response
}
