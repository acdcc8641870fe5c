/*
 * src/optimizer/travel_time.rs
 *
 * File for the travel-time provider
 *
 * Purpose:
 *   Resolves ETAs between points in minutes: caller-supplied matrix
 *   first, then a batched live distance-matrix query, then a haversine
 *   fallback. Every consumer (sequencer, allocators) sees the same
 *   `eta(origin, destination) -> minutes` shape regardless of which
 *   tier answered.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use crate::global::{FALLBACK_KMH, MAX_MATRIX_BATCH, UNREACHABLE_ETA_MINUTES};
use crate::models::poi::GeoPoint;
use crate::optimizer::geo::haversine_km;

/// An origin or destination passed to the travel-time provider: either a
/// named POI with a resolvable coordinate, or a bare point (the caller's
/// current location has no POI id).
#[derive(Debug, Clone, Copy)]
pub struct Waypoint<'a> {
	pub id: Option<&'a str>,
	pub location: Option<GeoPoint>,
}

impl<'a> Waypoint<'a> {
	pub fn poi(id: &'a str, location: Option<GeoPoint>) -> Self {
		Waypoint { id: Some(id), location }
	}

	pub fn point(location: GeoPoint) -> Self {
		Waypoint { id: None, location: Some(location) }
	}
}

/// A live distance-matrix backend: one origin, up to `MAX_MATRIX_BATCH`
/// destinations per call, seconds per pair (element-failure tolerant).
#[async_trait]
pub trait DistanceMatrixClient: Send + Sync {
	async fn batch_seconds(
		&self,
		origin: GeoPoint,
		destinations: &[GeoPoint],
		travel_mode: &str,
	) -> Option<Vec<Option<f64>>>;
}

/// `reqwest`-backed client for an external distance-matrix API.
pub struct HttpDistanceMatrixClient {
	api_key: String,
	http: reqwest::Client,
}

impl HttpDistanceMatrixClient {
	pub fn new(api_key: String) -> Self {
		HttpDistanceMatrixClient { api_key, http: reqwest::Client::new() }
	}
}

#[async_trait]
impl DistanceMatrixClient for HttpDistanceMatrixClient {
	async fn batch_seconds(
		&self,
		origin: GeoPoint,
		destinations: &[GeoPoint],
		travel_mode: &str,
	) -> Option<Vec<Option<f64>>> {
		let origins = format!("{},{}", origin.lat, origin.lng);
		let dest_param = destinations
			.iter()
			.map(|p| format!("{},{}", p.lat, p.lng))
			.collect::<Vec<_>>()
			.join("|");

		let resp = self
			.http
			.get("https://maps.googleapis.com/maps/api/distancematrix/json")
			.query(&[
				("origins", origins.as_str()),
				("destinations", dest_param.as_str()),
				("mode", travel_mode),
				("key", self.api_key.as_str()),
			])
			.timeout(std::time::Duration::from_secs(15))
			.send()
			.await
			.ok()?
			.json::<Value>()
			.await
			.ok()?;

		let row = resp.get("rows")?.get(0)?.get("elements")?.as_array()?;
		Some(
			row.iter()
				.map(|el| {
					el.get("status")
						.and_then(Value::as_str)
						.filter(|s| *s == "OK")
						.and_then(|_| el.get("duration")?.get("value")?.as_f64())
				})
				.collect(),
		)
	}
}

/// Resolution-order ETA provider per the travel-time contract: caller
/// matrix, then a batched live query, then haversine.
pub struct TravelTimeProvider<'a> {
	matrix: Option<&'a HashMap<String, HashMap<String, f64>>>,
	from_current: Option<&'a HashMap<String, f64>>,
	client: Option<&'a dyn DistanceMatrixClient>,
	travel_mode: &'a str,
}

impl<'a> TravelTimeProvider<'a> {
	pub fn new(
		matrix: Option<&'a HashMap<String, HashMap<String, f64>>>,
		from_current: Option<&'a HashMap<String, f64>>,
		client: Option<&'a dyn DistanceMatrixClient>,
		travel_mode: &'a str,
	) -> Self {
		TravelTimeProvider { matrix, from_current, client, travel_mode }
	}

	fn from_matrix(&self, origin: &Waypoint, destination: &Waypoint) -> Option<f64> {
		if let (Some(from_current), None) = (self.from_current, origin.id) {
			if let Some(dest_id) = destination.id {
				if let Some(m) = from_current.get(dest_id) {
					return Some(*m);
				}
			}
		}
		let matrix = self.matrix?;
		let origin_id = origin.id?;
		let dest_id = destination.id?;
		matrix.get(origin_id)?.get(dest_id).copied()
	}

	fn haversine_fallback(&self, origin: &Waypoint, destination: &Waypoint) -> f64 {
		match (origin.location, destination.location) {
			(Some(a), Some(b)) => haversine_km(a, b) / FALLBACK_KMH * 60.0,
			_ => UNREACHABLE_ETA_MINUTES,
		}
	}

	/// Single-pair ETA in minutes, applying the full resolution order.
	pub async fn eta(&self, origin: Waypoint<'_>, destination: Waypoint<'_>) -> f64 {
		if let Some(m) = self.from_matrix(&origin, &destination) {
			return m;
		}
		if let (Some(client), Some(a), Some(b)) = (self.client, origin.location, destination.location) {
			if let Some(seconds) = client.batch_seconds(a, &[b], self.travel_mode).await.and_then(|mut v| v.pop()).flatten() {
				return seconds / 60.0;
			}
		}
		self.haversine_fallback(&origin, &destination)
	}

	/// Batched ETAs from one origin to many destinations, minimizing
	/// round-trips to the live provider (<= MAX_MATRIX_BATCH per call).
	pub async fn eta_batch(&self, origin: Waypoint<'_>, destinations: &[Waypoint<'_>]) -> Vec<f64> {
		let mut out = vec![None; destinations.len()];
		let mut unresolved_idx = Vec::new();

		for (i, dest) in destinations.iter().enumerate() {
			if let Some(m) = self.from_matrix(&origin, dest) {
				out[i] = Some(m);
			} else {
				unresolved_idx.push(i);
			}
		}

		if let (Some(client), Some(a)) = (self.client, origin.location) {
			let chunks: Vec<&[usize]> = unresolved_idx.chunks(MAX_MATRIX_BATCH).collect();
			let requests = chunks.iter().map(|chunk| {
				let points: Vec<GeoPoint> = chunk.iter().filter_map(|&i| destinations[i].location).collect();
				async move {
					if points.len() != chunk.len() {
						return None;
					}
					client.batch_seconds(a, &points, self.travel_mode).await
				}
			});
			let responses = join_all(requests).await;

			for (chunk, response) in chunks.iter().zip(responses) {
				let Some(seconds) = response else { continue };
				for (slot, secs) in chunk.iter().zip(seconds) {
					if let Some(secs) = secs {
						out[*slot] = Some(secs / 60.0);
					}
				}
			}
		}

		out.into_iter()
			.enumerate()
			.map(|(i, v)| v.unwrap_or_else(|| self.haversine_fallback(&origin, &destinations[i])))
			.collect()
	}
}
