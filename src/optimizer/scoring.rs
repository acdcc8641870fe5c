/*
 * src/optimizer/scoring.rs
 *
 * File for the emotional-compatibility score (ECS)
 *
 * Purpose:
 *   Scores a POI against one or more moods by dot-producting its
 *   emotional tags against the fixed per-mood weight table, taking the
 *   max across moods.
 */

use crate::models::mood::MOOD_WEIGHTS;
use crate::models::poi::Poi;

/// The emotional compatibility score of `poi` under the best-fitting of
/// `moods`. An empty `moods` list (or a list of unrecognized labels)
/// resolves every mood to an empty weight table, so every tag
/// contributes 0 and the result is 0.0 - not a special case, just what
/// falls out of "missing tag contributes 0".
pub fn ecs(poi: &Poi, moods: &[String]) -> f64 {
	let candidates: Vec<&str> = if moods.is_empty() {
		vec![""]
	} else {
		moods.iter().map(String::as_str).collect()
	};

	candidates
		.into_iter()
		.map(|mood| score_for_mood(poi, mood))
		.fold(f64::NEG_INFINITY, f64::max)
}

fn score_for_mood(poi: &Poi, mood: &str) -> f64 {
	let Some(weights) = MOOD_WEIGHTS.get(mood) else {
		return 0.0;
	};
	weights
		.iter()
		.map(|(tag, weight)| poi.emotional_tags.get(*tag).copied().unwrap_or(0.0) * weight)
		.sum()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::function::Function;
	use crate::models::opening_hours::OpeningHours;
	use std::collections::HashMap;

	fn poi_with_tags(tags: &[(&str, f64)]) -> Poi {
		Poi {
			id: "p".into(),
			name: "p".into(),
			location: None,
			emotional_tags: tags.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
			function: Some(Function::CoreAttraction),
			include_in_daily_route: Some(true),
			types: vec![],
			opening_hours: OpeningHours::Absent,
			visit_duration_minutes: None,
			estimated_visit_minutes: None,
		}
	}

	#[test]
	fn empty_mood_list_scores_zero() {
		let poi = poi_with_tags(&[("peaceful", 1.0)]);
		assert_eq!(ecs(&poi, &[]), 0.0);
	}

	#[test]
	fn takes_max_across_moods() {
		let poi = poi_with_tags(&[("peaceful", 1.0), ("festive", 1.0)]);
		let moods = vec!["Yên tĩnh & Thư giãn".to_string(), "Lễ hội & Sôi động".to_string()];
		// peaceful mood: 1.0*1.0 (peaceful) + 1.0*(-0.8) (festive) = 0.2
		// festive mood: 1.0*1.0 (festive) + 1.0*(-1.0) (peaceful) = 0.0
		assert_eq!(ecs(&poi, &moods), 0.2);
	}

	#[test]
	fn missing_tag_contributes_zero() {
		let poi = poi_with_tags(&[]);
		let moods = vec!["Yên tĩnh & Thư giãn".to_string()];
		assert_eq!(ecs(&poi, &moods), 0.0);
	}
}
