/*
 * src/optimizer/pipeline.rs
 *
 * File for request-level orchestration
 *
 * Purpose:
 *   Wires the pipeline stages together for each endpoint: ingest, mood
 *   scoring + filtering, day allocation (function-quota or clustering),
 *   then the shared day sequencer. Both endpoints share everything
 *   except the allocator.
 */

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use crate::global::DEFAULT_ECS_THRESHOLD;
use crate::http_models::optimize::{DayPlanDto, GeoPointDto, OptimizeRequest, OptimizeResponse, PoiDto, ScheduledActivityDto};
use crate::models::function::Function;
use crate::models::poi::{GeoPoint, Poi};
use crate::optimizer::filter::{filter_candidates, MissingIncludeDefault};
use crate::optimizer::ingest::ingest_poi;
use crate::optimizer::sequencer::sequence_day;
use crate::optimizer::travel_time::{DistanceMatrixClient, TravelTimeProvider};
use crate::optimizer::{allocator_cluster, allocator_quota};

/// Shared distance-matrix collaborator the request pipeline borrows from
/// application state; absent when `DISTANCE_MATRIX_API_KEY` is unset.
pub struct OptimizerContext {
	pub distance_matrix_client: Option<Box<dyn DistanceMatrixClient>>,
}

/// Parses `start_datetime` per the request envelope's local-time
/// convention: strip a trailing `Z` or UTC offset, accept the `T`- or
/// space-separated variant, with or without seconds. Falls back to the
/// current instant on any failure, logging a warning.
pub fn parse_start_datetime(raw: Option<&str>) -> NaiveDateTime {
	let Some(raw) = raw else { return chrono::Local::now().naive_local() };

	let trimmed = raw.trim();
	let stripped = trimmed
		.strip_suffix('Z')
		.or_else(|| trimmed.rsplit_once('+').map(|(head, _)| head))
		.unwrap_or(trimmed);

	const FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
	for format in FORMATS {
		if let Ok(parsed) = NaiveDateTime::parse_from_str(stripped, format) {
			return parsed;
		}
	}

	warn!(raw, "could not parse start_datetime, falling back to now");
	chrono::Local::now().naive_local()
}

fn to_geo_point(dto: GeoPointDto) -> GeoPoint {
	GeoPoint { lat: dto.lat, lng: dto.lng }
}

/// Day N's start instant: same clock time as the request's start
/// instant, advanced by N-1 calendar days.
fn day_start(start: NaiveDateTime, day_index: u32) -> NaiveDateTime {
	start + Duration::days(day_index as i64)
}

struct IngestedRequest {
	pois: Vec<Poi>,
	moods: Vec<String>,
	duration_days: u32,
	current_location: GeoPoint,
	start: NaiveDateTime,
	threshold: f64,
	eta_matrix: std::collections::HashMap<String, std::collections::HashMap<String, f64>>,
	eta_from_current: std::collections::HashMap<String, f64>,
	travel_mode: String,
	poi_per_day: usize,
}

fn ingest_request(req: OptimizeRequest) -> IngestedRequest {
	let moods = req.user_mood.into_list();
	let start = parse_start_datetime(req.start_datetime.as_deref());
	IngestedRequest {
		pois: req.poi_list.into_iter().map(ingest_poi).collect(),
		moods,
		duration_days: req.duration_days.max(1),
		current_location: to_geo_point(req.current_location),
		start,
		threshold: req.ecs_score_threshold.unwrap_or(DEFAULT_ECS_THRESHOLD),
		eta_matrix: req.eta_matrix.unwrap_or_default(),
		eta_from_current: req.eta_from_current.unwrap_or_default(),
		travel_mode: req.travel_mode.unwrap_or_else(|| "driving".to_string()),
		poi_per_day: req.poi_per_day.unwrap_or(crate::global::DEFAULT_POIS_PER_DAY),
	}
}

async fn sequence_days(
	ctx: &OptimizerContext,
	ingested: &IngestedRequest,
	earmarks: Vec<Vec<&Poi>>,
) -> Vec<DayPlanDto> {
	let client_ref = ctx.distance_matrix_client.as_deref();
	let provider = TravelTimeProvider::new(
		Some(&ingested.eta_matrix),
		Some(&ingested.eta_from_current),
		client_ref,
		&ingested.travel_mode,
	);

	let mut days = Vec::with_capacity(earmarks.len());
	for (day_index, candidates) in earmarks.into_iter().enumerate() {
		let start = day_start(ingested.start, day_index as u32);
		let stops = sequence_day(&provider, ingested.current_location, start, &candidates).await;
		let activities = stops
			.into_iter()
			.map(|stop| ScheduledActivityDto {
				poi: poi_to_dto(stop.poi),
				estimated_arrival: stop.arrival,
				estimated_departure: stop.departure,
				visit_duration_minutes: stop.visit_duration_minutes,
			})
			.collect();
		days.push(DayPlanDto { day: day_index as u32 + 1, day_start_time: start, activities });
	}
	days
}

fn poi_to_dto(poi: &Poi) -> PoiDto {
	use crate::http_models::optimize::GeoPointDto as LocDto;

	PoiDto {
		google_place_id: Some(poi.id.clone()),
		name: poi.name.clone(),
		location: poi.location.map(|l| LocDto { lat: l.lat, lng: l.lng }),
		emotional_tags: poi.emotional_tags.clone(),
		function: poi.function.map(Function::as_wire_str).map(String::from),
		include_in_daily_route: poi.include_in_daily_route,
		poi_type: None,
		types: Some(poi.types.clone()),
		opening_hours: None,
		weekday_descriptions: None,
		visit_duration_minutes: poi.visit_duration_minutes,
		estimated_visit_minutes: poi.estimated_visit_minutes,
	}
}

/// Runs endpoint A (function-quota allocation, §4.5).
pub async fn optimize_quota(ctx: &OptimizerContext, req: OptimizeRequest) -> OptimizeResponse {
	let ingested = ingest_request(req);
	let scored = filter_candidates(
		&ingested.pois,
		&ingested.moods,
		ingested.threshold,
		ingested.start,
		MissingIncludeDefault::Exclude,
	);
	let earmarks = allocator_quota::allocate(&scored, ingested.duration_days, &ingested.moods, ingested.start);
	let optimized_route = sequence_days(ctx, &ingested, earmarks).await;
	OptimizeResponse { optimized_route }
}

/// Runs endpoint B (clustering preview allocation, §4.6).
pub async fn optimize_cluster(ctx: &OptimizerContext, req: OptimizeRequest) -> OptimizeResponse {
	let ingested = ingest_request(req);
	let scored = filter_candidates(
		&ingested.pois,
		&ingested.moods,
		ingested.threshold,
		ingested.start,
		MissingIncludeDefault::Include,
	);
	let earmarks = allocator_cluster::allocate(
		&scored,
		ingested.duration_days,
		&ingested.moods,
		ingested.current_location,
		ingested.poi_per_day,
		ingested.start,
	);
	let optimized_route = sequence_days(ctx, &ingested, earmarks).await;
	OptimizeResponse { optimized_route }
}
