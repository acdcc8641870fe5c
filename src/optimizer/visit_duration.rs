/*
 * src/optimizer/visit_duration.rs
 *
 * File for visit-duration estimation
 *
 * Purpose:
 *   How long a visit to a POI is assumed to take, used by the sequencer
 *   to advance the simulated clock after each stop.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::poi::Poi;

const DEFAULT_VISIT_DURATION_MINUTES: u32 = 120;

static VISIT_DURATION_BY_TYPE: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
	HashMap::from([
		("museum", 90),
		("art_gallery", 90),
		("historical", 120),
		("cultural_center", 90),
		("park", 60),
		("natural_feature", 90),
		("scenic", 75),
		("hiking_area", 120),
		("church", 45),
		("temple", 45),
		("place_of_worship", 45),
		("spiritual", 45),
		("tourist_attraction", 75),
		("point_of_interest", 60),
		("landmark", 60),
		("shopping_mall", 90),
		("market", 60),
		("store", 45),
		("amusement_park", 180),
		("zoo", 120),
		("aquarium", 120),
		("beach", 120),
		("seaside", 120),
		("cafe", 45),
		("coffee_shop", 45),
		("bar", 60),
		("restaurant", 60),
		("food", 60),
	])
});

/// Estimates the visit duration for a POI.
///
/// Priority: explicit `visit_duration_minutes` > `estimated_visit_minutes` >
/// exact type-table lookup > category heuristic > default.
pub fn estimate_visit_minutes(poi: &Poi) -> u32 {
	if let Some(m) = poi.visit_duration_minutes {
		return m;
	}
	if let Some(m) = poi.estimated_visit_minutes {
		return m;
	}

	let types: Vec<String> = poi.types.iter().map(|t| t.to_ascii_lowercase()).collect();

	for t in &types {
		if let Some(m) = VISIT_DURATION_BY_TYPE.get(t.as_str()) {
			return *m;
		}
	}

	let has_any = |needles: &[&str]| types.iter().any(|t| needles.contains(&t.as_str()));
	if has_any(&["museum", "art_gallery", "historical", "cultural"]) {
		return 90;
	}
	if has_any(&["park", "natural", "scenic", "beach", "seaside"]) {
		return 75;
	}
	if has_any(&["church", "temple", "spiritual", "place_of_worship"]) {
		return 45;
	}
	if has_any(&["shopping", "market", "store"]) {
		return 60;
	}

	DEFAULT_VISIT_DURATION_MINUTES
}
