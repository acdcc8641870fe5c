/*
 * src/optimizer/sequencer.rs
 *
 * File for the shared day sequencer
 *
 * Purpose:
 *   Orders a day's allocated POIs by nearest-neighbor from the current
 *   location, then simulates the clock (travel, arrive, check open,
 *   visit, depart) with a deferred-retry loop and bounded forward time
 *   jumps. Shared by both allocators (§4.5 and §4.6 earmark POIs;
 *   only this module turns an earmark into a scheduled day).
 */

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::info;

use crate::global::{MAX_JUMP_HOURS, MAX_RETRY_ROUNDS, MAX_TIME_JUMPS};
use crate::models::poi::{GeoPoint, Poi};
use crate::optimizer::hours;
use crate::optimizer::travel_time::{TravelTimeProvider, Waypoint};
use crate::optimizer::visit_duration::estimate_visit_minutes;

pub struct ScheduledStop<'a> {
	pub poi: &'a Poi,
	pub arrival: NaiveDateTime,
	pub departure: NaiveDateTime,
	pub visit_duration_minutes: u32,
}

fn strict_for(dt: NaiveDateTime) -> bool {
	let h = dt.hour();
	h < 6 || h >= 22
}

/// Cursor tracking where the simulated day currently stands: the clock,
/// and the last visited waypoint (POI id + location, or the original
/// current-location if nothing has been visited yet).
struct Cursor {
	clock: NaiveDateTime,
	prev_id: Option<String>,
	prev_location: GeoPoint,
}

/// Builds the waypoint for the cursor's current position.
fn cursor_origin(cursor: &Cursor) -> Waypoint<'_> {
	match &cursor.prev_id {
		Some(id) => Waypoint::poi(id, Some(cursor.prev_location)),
		None => Waypoint::point(cursor.prev_location),
	}
}

/// Applies an already-resolved travel time (minutes) to decide whether
/// `poi` can be visited from the cursor's current position. On success,
/// advances the cursor and records the stop; returns whether it happened.
fn apply_visit<'a>(cursor: &mut Cursor, poi: &'a Poi, travel_minutes: f64, out: &mut Vec<ScheduledStop<'a>>) -> bool {
	if travel_minutes >= crate::global::UNREACHABLE_ETA_MINUTES {
		return false;
	}

	let arrival = cursor.clock + Duration::minutes(travel_minutes.round() as i64);
	if !hours::is_open(poi, arrival, strict_for(arrival)) {
		return false;
	}

	let visit_minutes = estimate_visit_minutes(poi);
	let departure = arrival + Duration::minutes(visit_minutes as i64);

	out.push(ScheduledStop { poi, arrival, departure, visit_duration_minutes: visit_minutes });

	cursor.clock = departure;
	cursor.prev_id = Some(poi.id.clone());
	if let Some(loc) = poi.location {
		cursor.prev_location = loc;
	}
	true
}

/// Attempts to travel to and visit `poi` from the cursor's current
/// position, resolving the travel time for this single pair.
async fn try_visit<'a>(
	provider: &TravelTimeProvider<'_>,
	cursor: &mut Cursor,
	poi: &'a Poi,
	out: &mut Vec<ScheduledStop<'a>>,
) -> bool {
	let origin = cursor_origin(cursor);
	let dest = Waypoint::poi(&poi.id, poi.location);
	let travel = provider.eta(origin, dest).await;
	apply_visit(cursor, poi, travel, out)
}

/// Picks the nearest remaining candidate from the cursor's current
/// position in a single batched ETA lookup, removes it from `remaining`,
/// and attempts to visit it. Returns the candidate and whether it was
/// visited.
async fn step_nearest<'a>(
	provider: &TravelTimeProvider<'_>,
	cursor: &mut Cursor,
	remaining: &mut Vec<&'a Poi>,
	out: &mut Vec<ScheduledStop<'a>>,
) -> (&'a Poi, bool) {
	let origin = cursor_origin(cursor);
	let destinations: Vec<Waypoint> = remaining.iter().map(|poi| Waypoint::poi(&poi.id, poi.location)).collect();
	let etas = provider.eta_batch(origin, &destinations).await;

	let best_idx = etas
		.iter()
		.enumerate()
		.min_by(|(_, a), (_, b)| a.total_cmp(b))
		.map(|(i, _)| i)
		.unwrap_or(0);

	let travel = etas[best_idx];
	let poi = remaining.remove(best_idx);
	let visited = apply_visit(cursor, poi, travel, out);
	(poi, visited)
}

/// Simulates a single day's schedule for `candidates`, already earmarked
/// by an allocator. Returns the scheduled stops in visit order; POIs
/// that never become reachable within the retry/jump budget are omitted.
pub async fn sequence_day<'a>(
	provider: &TravelTimeProvider<'_>,
	current_location: GeoPoint,
	day_start: NaiveDateTime,
	candidates: &[&'a Poi],
) -> Vec<ScheduledStop<'a>> {
	if candidates.is_empty() {
		return Vec::new();
	}

	let mut remaining: Vec<&Poi> = candidates.to_vec();
	let mut scheduled = Vec::with_capacity(remaining.len());
	let mut deferred: Vec<&Poi> = Vec::new();
	let mut cursor = Cursor { clock: day_start, prev_id: None, prev_location: current_location };

	while !remaining.is_empty() {
		let (poi, visited) = step_nearest(provider, &mut cursor, &mut remaining, &mut scheduled).await;
		if !visited {
			deferred.push(poi);
		}
	}

	let mut jumps_used = 0u32;
	for _round in 0..MAX_RETRY_ROUNDS {
		if deferred.is_empty() {
			break;
		}

		let before = deferred.len();
		let mut still_deferred = Vec::new();
		for poi in deferred.drain(..) {
			if !try_visit(provider, &mut cursor, poi, &mut scheduled).await {
				still_deferred.push(poi);
			}
		}
		deferred = still_deferred;

		if deferred.len() == before {
			if jumps_used >= MAX_TIME_JUMPS {
				break;
			}
			let Some(earliest) = deferred.iter().map(|poi| hours::earliest_opening_after(poi, cursor.clock)).min() else {
				break;
			};
			if earliest - cursor.clock > Duration::hours(MAX_JUMP_HOURS) {
				break;
			}
			cursor.clock = earliest;
			jumps_used += 1;
		}
	}

	for poi in deferred {
		info!(poi_id = %poi.id, "dropping deferred poi that never became reachable");
	}

	scheduled
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::function::Function;
	use crate::models::opening_hours::OpeningHours;
	use std::collections::HashMap;

	fn poi(id: &str, lat: f64, lng: f64) -> Poi {
		Poi {
			id: id.to_string(),
			name: id.to_string(),
			location: Some(GeoPoint { lat, lng }),
			emotional_tags: HashMap::new(),
			function: Some(Function::CoreAttraction),
			include_in_daily_route: Some(true),
			types: vec![],
			opening_hours: OpeningHours::Absent,
			visit_duration_minutes: Some(60),
			estimated_visit_minutes: None,
		}
	}

	fn day_start() -> NaiveDateTime {
		chrono::NaiveDate::from_ymd_opt(2026, 8, 3).unwrap().and_hms_opt(9, 0, 0).unwrap()
	}

	#[tokio::test]
	async fn empty_candidates_yields_empty_schedule() {
		let provider = TravelTimeProvider::new(None, None, None, "driving");
		let current = GeoPoint { lat: 10.0, lng: 106.0 };
		let stops = sequence_day(&provider, current, day_start(), &[]).await;
		assert!(stops.is_empty());
	}

	#[tokio::test]
	async fn visits_all_reachable_pois_in_order() {
		let provider = TravelTimeProvider::new(None, None, None, "driving");
		let current = GeoPoint { lat: 10.0, lng: 106.0 };
		let a = poi("a", 10.01, 106.01);
		let b = poi("b", 10.5, 106.5);
		let candidates: Vec<&Poi> = vec![&a, &b];
		let stops = sequence_day(&provider, current, day_start(), &candidates).await;
		assert_eq!(stops.len(), 2);
		assert_eq!(stops[0].poi.id, "a");
		assert!(stops[1].arrival >= stops[0].departure);
	}

	#[tokio::test]
	async fn departure_equals_arrival_plus_visit_duration() {
		let provider = TravelTimeProvider::new(None, None, None, "driving");
		let current = GeoPoint { lat: 10.0, lng: 106.0 };
		let a = poi("a", 10.01, 106.01);
		let candidates: Vec<&Poi> = vec![&a];
		let stops = sequence_day(&provider, current, day_start(), &candidates).await;
		assert_eq!(stops[0].departure, stops[0].arrival + Duration::minutes(stops[0].visit_duration_minutes as i64));
	}

	#[tokio::test]
	async fn unreachable_poi_without_location_is_dropped() {
		let provider = TravelTimeProvider::new(None, None, None, "driving");
		let current = GeoPoint { lat: 10.0, lng: 106.0 };
		let mut unreachable = poi("x", 0.0, 0.0);
		unreachable.location = None;
		let candidates: Vec<&Poi> = vec![&unreachable];
		let stops = sequence_day(&provider, current, day_start(), &candidates).await;
		assert!(stops.is_empty());
	}
}
