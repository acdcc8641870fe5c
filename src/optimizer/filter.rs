/*
 * src/optimizer/filter.rs
 *
 * File for the candidate filter pipeline
 *
 * Purpose:
 *   Narrows the raw POI pool down to what the allocators are allowed to
 *   place: open at departure, meeting the mood threshold, carrying a
 *   usable function tag, and opted into the daily route.
 */

use chrono::{NaiveDateTime, Timelike};

use crate::models::function::Function;
use crate::models::poi::Poi;
use crate::optimizer::hours;
use crate::optimizer::scoring::ecs;

const LODGING_TYPES: [&str; 3] = ["lodging", "hotel", "motel"];

/// A POI that survived the filter pipeline, carrying its computed ECS.
pub struct ScoredPoi<'a> {
	pub poi: &'a Poi,
	pub ecs: f64,
}

/// Whether missing `includeInDailyRoute` excludes the POI. Endpoint A
/// excludes on missing/false; endpoint B defaults missing to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingIncludeDefault {
	Exclude,
	Include,
}

pub fn strict_for_hour(dt: NaiveDateTime) -> bool {
	let h = dt.hour();
	h < 6 || h >= 22
}

/// Runs the filter pipeline over `pois`, returning survivors with their
/// ECS scores attached.
pub fn filter_candidates<'a>(
	pois: &'a [Poi],
	moods: &[String],
	threshold: f64,
	start: NaiveDateTime,
	missing_include: MissingIncludeDefault,
) -> Vec<ScoredPoi<'a>> {
	let strict = strict_for_hour(start);

	pois.iter()
		.filter(|poi| hours::is_open(poi, start, strict))
		.map(|poi| ScoredPoi { poi, ecs: ecs(poi, moods) })
		.filter(|scored| scored.ecs >= threshold)
		.filter(|scored| passes_function_gate(scored.poi, missing_include))
		.collect()
}

fn passes_function_gate(poi: &Poi, missing_include: MissingIncludeDefault) -> bool {
	let Some(function) = poi.function else {
		return false;
	};
	if function == Function::Accommodation {
		return false;
	}
	if function == Function::Resort && poi.has_any_type(&LODGING_TYPES) {
		return false;
	}
	match poi.include_in_daily_route {
		Some(include) => include,
		None => missing_include == MissingIncludeDefault::Include,
	}
}
