/*
 * src/http_models/optimize.rs
 *
 * File for the /optimize and /optimize-route request/response DTOs
 *
 * Purpose:
 *   Wire-level shapes. POIs arrive with several historically-accumulated
 *   field-name variants (Google Places API aliases, legacy DB column
 *   names); these DTOs absorb that variance with `serde(alias = ...)` so
 *   the rest of the pipeline only ever sees the normalized
 *   `models::poi::Poi`.
 */

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct GeoPointDto {
	pub lat: f64,
	pub lng: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OpenPeriodEndpointDto {
	pub day: Option<i64>,
	pub hour: Option<u8>,
	#[serde(default)]
	pub minute: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PeriodDto {
	pub open: Option<OpenPeriodEndpointDto>,
	pub close: Option<OpenPeriodEndpointDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct OpeningHoursDto {
	#[serde(default, alias = "regularPeriods")]
	pub periods: Option<Vec<PeriodDto>>,
	#[serde(default, alias = "weekdayDescriptionsText")]
	pub weekday_descriptions: Option<Vec<String>>,
}

/// One candidate point of interest, as supplied by the caller.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PoiDto {
	#[serde(alias = "id", alias = "_id")]
	pub google_place_id: Option<String>,
	pub name: String,
	pub location: Option<GeoPointDto>,
	#[serde(default)]
	pub emotional_tags: HashMap<String, f64>,
	pub function: Option<String>,
	#[serde(default, alias = "includeInDailyRoute")]
	pub include_in_daily_route: Option<bool>,
	#[serde(default, rename = "type")]
	pub poi_type: Option<String>,
	#[serde(default)]
	pub types: Option<Vec<String>>,
	#[serde(default, alias = "regularOpeningHours", alias = "openingHours")]
	pub opening_hours: Option<OpeningHoursDto>,
	#[serde(default, alias = "weekdayDescriptions")]
	pub weekday_descriptions: Option<Vec<String>>,
	#[serde(default)]
	pub visit_duration_minutes: Option<u32>,
	#[serde(default)]
	pub estimated_visit_minutes: Option<u32>,
}

/// Shared request envelope for both `/optimize` and `/optimize-route`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OptimizeRequest {
	pub poi_list: Vec<PoiDto>,
	pub user_mood: MoodInput,
	pub duration_days: u32,
	pub current_location: GeoPointDto,
	#[serde(default)]
	pub start_datetime: Option<String>,
	#[serde(default)]
	pub ecs_score_threshold: Option<f64>,
	#[serde(default)]
	pub eta_matrix: Option<HashMap<String, HashMap<String, f64>>>,
	#[serde(default)]
	pub eta_from_current: Option<HashMap<String, f64>>,
	#[serde(default)]
	pub travel_mode: Option<String>,
	#[serde(default)]
	pub poi_per_day: Option<usize>,
}

/// `user_mood` accepts either a single label or a list of labels.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MoodInput {
	Single(String),
	Many(Vec<String>),
}

impl MoodInput {
	pub fn into_list(self) -> Vec<String> {
		match self {
			MoodInput::Single(m) => vec![m],
			MoodInput::Many(list) => list,
		}
	}
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduledActivityDto {
	pub poi: PoiDto,
	pub estimated_arrival: NaiveDateTime,
	pub estimated_departure: NaiveDateTime,
	pub visit_duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayPlanDto {
	pub day: u32,
	pub day_start_time: NaiveDateTime,
	pub activities: Vec<ScheduledActivityDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OptimizeResponse {
	pub optimized_route: Vec<DayPlanDto>,
}
