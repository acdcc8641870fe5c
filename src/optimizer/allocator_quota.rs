/*
 * src/optimizer/allocator_quota.rs
 *
 * File for the function-quota day allocator (endpoint A)
 *
 * Purpose:
 *   Partitions the filtered POI pool across days using per-function
 *   quotas that scale with trip length, geographic clustering of core
 *   attractions, and soft time-window preferences. Produces an
 *   earmark per day; the shared sequencer (optimizer::sequencer) turns
 *   each earmark into an ordered, timed schedule.
 */

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::function::Function;
use crate::models::poi::{GeoPoint, Poi};
use crate::optimizer::filter::ScoredPoi;
use crate::optimizer::geo::{centroid, haversine_km};
use crate::optimizer::hours::is_open;
use crate::optimizer::kmeans::cluster;

struct Quotas {
	core_min: usize,
	core_max: usize,
	activity_max: usize,
	resort_max: usize,
	fb_max: usize,
}

fn quotas_for(duration_days: u32) -> Quotas {
	match duration_days {
		1 => Quotas { core_min: 2, core_max: 3, activity_max: 1, resort_max: 1, fb_max: 1 },
		2 | 3 => Quotas { core_min: 2, core_max: 3, activity_max: 2, resort_max: 1, fb_max: 1 },
		_ => Quotas { core_min: 2, core_max: 2, activity_max: 1, resort_max: 1, fb_max: 1 },
	}
}

#[derive(Default)]
struct DayBucket<'a> {
	core: Vec<&'a Poi>,
	activity: Vec<&'a Poi>,
	resort: Vec<&'a Poi>,
	food: Vec<&'a Poi>,
	other: Vec<&'a Poi>,
}

impl<'a> DayBucket<'a> {
	fn total(&self) -> usize {
		self.core.len() + self.activity.len() + self.resort.len() + self.food.len() + self.other.len()
	}

	fn into_pois(self) -> Vec<&'a Poi> {
		let mut all = self.core;
		all.extend(self.activity);
		all.extend(self.resort);
		all.extend(self.food);
		all.extend(self.other);
		all
	}
}

fn day_date(start: NaiveDate, day_index: u32) -> NaiveDate {
	start + chrono::Duration::days(day_index as i64)
}

fn admits_landmark_hours(poi: &Poi, date: NaiveDate) -> bool {
	[8, 12, 16].iter().any(|h| {
		date.and_hms_opt(*h, 0, 0)
			.map(|dt| is_open(poi, dt, false))
			.unwrap_or(false)
	})
}

fn admits_meal_hours(poi: &Poi, date: NaiveDate) -> bool {
	(11..14).chain(17..21).any(|h| {
		date.and_hms_opt(h, 0, 0)
			.map(|dt| is_open(poi, dt, false))
			.unwrap_or(false)
	})
}

fn ecs_for_mood(scored: &ScoredPoi, moods: &[String], mood_idx: usize) -> f64 {
	if moods.is_empty() {
		return scored.ecs;
	}
	crate::optimizer::scoring::ecs(scored.poi, std::slice::from_ref(&moods[mood_idx % moods.len()]))
}

/// Partitions `scored` across `duration_days` days. `start` anchors day
/// 0's calendar date for time-window probes. Returns one POI list per
/// day, in earmark order (the sequencer re-orders within a day).
pub fn allocate<'a>(
	scored: &[ScoredPoi<'a>],
	duration_days: u32,
	moods: &[String],
	start: NaiveDateTime,
) -> Vec<Vec<&'a Poi>> {
	let duration_days = duration_days.max(1);
	let quotas = quotas_for(duration_days);
	let start_date = start.date();

	let mut buckets: Vec<DayBucket<'a>> = (0..duration_days).map(|_| DayBucket::default()).collect();

	let core: Vec<&ScoredPoi> = scored.iter().filter(|s| s.poi.function == Some(Function::CoreAttraction)).collect();
	let activity: Vec<&ScoredPoi> = scored.iter().filter(|s| s.poi.function == Some(Function::Activity)).collect();
	let resort: Vec<&ScoredPoi> = scored.iter().filter(|s| s.poi.function == Some(Function::Resort)).collect();
	let food: Vec<&ScoredPoi> = scored.iter().filter(|s| s.poi.function.map(Function::is_food).unwrap_or(false)).collect();
	let other: Vec<&ScoredPoi> = scored
		.iter()
		.filter(|s| {
			!matches!(
				s.poi.function,
				Some(Function::CoreAttraction) | Some(Function::Activity) | Some(Function::Resort)
			) && !s.poi.function.map(Function::is_food).unwrap_or(false)
		})
		.collect();

	// Step 1-2: cluster CORE_ATTRACTION, earmark one cluster per day.
	let core_points: Vec<GeoPoint> = core.iter().filter_map(|s| s.poi.location).collect();
	let located_core: Vec<&ScoredPoi> = core.iter().filter(|s| s.poi.location.is_some()).copied().collect();
	let unlocated_core: Vec<&ScoredPoi> = core.iter().filter(|s| s.poi.location.is_none()).copied().collect();

	let k = (duration_days as usize).min(located_core.len()).max(if located_core.is_empty() { 0 } else { 1 });
	let mut clusters: Vec<Vec<&ScoredPoi>> = vec![Vec::new(); k.max(1)];
	if k > 0 {
		let assignment = cluster(&core_points, k);
		for (scored_poi, cluster_idx) in located_core.iter().zip(assignment) {
			clusters[cluster_idx].push(scored_poi);
		}
	}

	let mut leftover_core: Vec<&ScoredPoi> = Vec::new();
	for day in 0..duration_days as usize {
		if k == 0 {
			break;
		}
		let date = day_date(start_date, day as u32);
		let mood_idx = if moods.is_empty() { 0 } else { day % moods.len() };
		let mut pool = clusters[day % k].clone();
		pool.sort_by(|a, b| ecs_for_mood(b, moods, mood_idx).total_cmp(&ecs_for_mood(a, moods, mood_idx)).then(a.poi.id.cmp(&b.poi.id)));

		let (feasible, relaxed): (Vec<&ScoredPoi>, Vec<&ScoredPoi>) =
			pool.into_iter().partition(|s| admits_landmark_hours(s.poi, date));
		let feasible_count = feasible.len();

		let mut chosen: Vec<&ScoredPoi> = Vec::new();
		for candidate in feasible {
			if chosen.len() >= quotas.core_max {
				leftover_core.push(candidate);
				continue;
			}
			chosen.push(candidate);
		}
		// Only relax the time-window constraint when the feasible pass alone
		// did not reach core_min; otherwise leave the relaxed candidates for
		// other days rather than padding this one with infeasible POIs.
		if feasible_count < quotas.core_min {
			for candidate in relaxed {
				if chosen.len() >= quotas.core_max {
					leftover_core.push(candidate);
					continue;
				}
				chosen.push(candidate);
			}
		} else {
			leftover_core.extend(relaxed);
		}
		buckets[day].core = chosen.into_iter().map(|s| s.poi).collect();
	}
	leftover_core.extend(unlocated_core);

	// Step 3: remaining CORE via min-heap keyed by per-day CORE count.
	let mut heap: BinaryHeap<Reverse<(usize, usize)>> =
		(0..duration_days as usize).map(|d| Reverse((buckets[d].core.len(), d))).collect();
	leftover_core.sort_by(|a, b| b.ecs.total_cmp(&a.ecs).then(a.poi.id.cmp(&b.poi.id)));
	for candidate in leftover_core {
		let Some(Reverse((count, day))) = heap.pop() else { break };
		if count >= quotas.core_max + 1 {
			continue;
		}
		buckets[day].core.push(candidate.poi);
		heap.push(Reverse((count + 1, day)));
	}

	// Step 4: RESORT via min-heap keyed by per-day total count, <=1/day.
	let mut resort_sorted = resort;
	resort_sorted.sort_by(|a, b| b.ecs.total_cmp(&a.ecs).then(a.poi.id.cmp(&b.poi.id)));
	let mut heap: BinaryHeap<Reverse<(usize, usize)>> =
		(0..duration_days as usize).map(|d| Reverse((buckets[d].total(), d))).collect();
	for candidate in resort_sorted {
		let Some(Reverse((count, day))) = heap.pop() else { break };
		if buckets[day].resort.len() >= quotas.resort_max {
			heap.push(Reverse((count, day)));
			continue;
		}
		buckets[day].resort.push(candidate.poi);
		heap.push(Reverse((buckets[day].total(), day)));
	}

	// Step 5: ACTIVITY sorted by distance-to-centroid minus ECS bonus.
	for day in 0..duration_days as usize {
		let date = day_date(start_date, day as u32);
		let current_locations: Vec<GeoPoint> = buckets[day]
			.core
			.iter()
			.chain(buckets[day].resort.iter())
			.filter_map(|p| p.location)
			.collect();
		let center = centroid(&current_locations);

		let mut pool: Vec<&ScoredPoi> = activity
			.iter()
			.filter(|s| !buckets.iter().any(|b| b.activity.iter().any(|p| p.id == s.poi.id)))
			.copied()
			.collect();

		pool.sort_by(|a, b| activity_key(a, center).total_cmp(&activity_key(b, center)).then(a.poi.id.cmp(&b.poi.id)));

		let (feasible, relaxed): (Vec<&ScoredPoi>, Vec<&ScoredPoi>) =
			pool.into_iter().partition(|s| admits_landmark_hours(s.poi, date));

		for candidate in feasible.into_iter().chain(relaxed.into_iter()) {
			if buckets[day].activity.len() >= quotas.activity_max {
				break;
			}
			buckets[day].activity.push(candidate.poi);
		}
	}

	// Step 6: F&B / DINING, nearest to centroid, meal-hour preferred, <=1/day.
	let mut used_food: Vec<&str> = Vec::new();
	for day in 0..duration_days as usize {
		if quotas.fb_max == 0 {
			break;
		}
		let date = day_date(start_date, day as u32);
		let current_locations: Vec<GeoPoint> = buckets[day].into_pois_ref().iter().filter_map(|p| p.location).collect();
		let center = centroid(&current_locations);

		let mut pool: Vec<&ScoredPoi> = food.iter().filter(|s| !used_food.contains(&s.poi.id.as_str())).copied().collect();
		pool.sort_by(|a, b| food_key(a, center).total_cmp(&food_key(b, center)).then(a.poi.id.cmp(&b.poi.id)));

		let pick = pool
			.iter()
			.find(|s| admits_meal_hours(s.poi, date))
			.or_else(|| pool.first())
			.copied();

		if let Some(chosen) = pick {
			buckets[day].food.push(chosen.poi);
			used_food.push(chosen.poi.id.as_str());
		}
	}

	// Step 7: OTHER, fill toward a per-day target via min-heap.
	let total_pois = scored.len();
	let target = (total_pois / duration_days as usize).clamp(3, 6);
	let mut other_sorted = other;
	other_sorted.sort_by(|a, b| b.ecs.total_cmp(&a.ecs).then(a.poi.id.cmp(&b.poi.id)));
	let mut heap: BinaryHeap<Reverse<(usize, usize)>> =
		(0..duration_days as usize).map(|d| Reverse((buckets[d].other.len(), d))).collect();
	for candidate in other_sorted {
		let Some(Reverse((count, day))) = heap.pop() else { break };
		if count >= target {
			continue;
		}
		if buckets[day].food.len() > quotas.fb_max
			|| buckets[day].resort.len() > quotas.resort_max
			|| buckets[day].activity.len() > quotas.activity_max
		{
			continue;
		}
		buckets[day].other.push(candidate.poi);
		heap.push(Reverse((count + 1, day)));
	}

	buckets.into_iter().map(DayBucket::into_pois).collect()
}

fn activity_key(scored: &ScoredPoi, center: Option<GeoPoint>) -> f64 {
	match (center, scored.poi.location) {
		(Some(c), Some(p)) => haversine_km(c, p) - 5.0 * scored.ecs,
		_ => f64::INFINITY,
	}
}

fn food_key(scored: &ScoredPoi, center: Option<GeoPoint>) -> f64 {
	match (center, scored.poi.location) {
		(Some(c), Some(p)) => haversine_km(c, p),
		_ => f64::INFINITY,
	}
}

impl<'a> DayBucket<'a> {
	fn into_pois_ref(&self) -> Vec<&Poi> {
		self.core
			.iter()
			.chain(self.activity.iter())
			.chain(self.resort.iter())
			.chain(self.food.iter())
			.chain(self.other.iter())
			.copied()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::opening_hours::OpeningHours;
	use std::collections::HashMap;

	fn poi(id: &str, function: Function, lat: f64, lng: f64) -> Poi {
		Poi {
			id: id.to_string(),
			name: id.to_string(),
			location: Some(GeoPoint { lat, lng }),
			emotional_tags: HashMap::new(),
			function: Some(function),
			include_in_daily_route: Some(true),
			types: vec![],
			opening_hours: OpeningHours::Absent,
			visit_duration_minutes: Some(60),
			estimated_visit_minutes: None,
		}
	}

	fn start() -> NaiveDateTime {
		chrono::NaiveDate::from_ymd_opt(2026, 8, 3).unwrap().and_hms_opt(9, 0, 0).unwrap()
	}

	#[test]
	fn every_poi_allocated_at_most_once() {
		let pois: Vec<Poi> = (0..20)
			.map(|i| poi(&format!("core{i}"), Function::CoreAttraction, 10.0 + i as f64 * 0.01, 106.0))
			.chain((0..10).map(|i| poi(&format!("act{i}"), Function::Activity, 10.0 + i as f64 * 0.01, 106.0)))
			.chain((0..6).map(|i| poi(&format!("resort{i}"), Function::Resort, 10.0 + i as f64 * 0.01, 106.0)))
			.chain((0..10).map(|i| poi(&format!("food{i}"), Function::FoodBeverage, 10.0 + i as f64 * 0.01, 106.0)))
			.collect();
		let scored: Vec<ScoredPoi> = pois.iter().map(|p| ScoredPoi { poi: p, ecs: 0.5 }).collect();

		let days = allocate(&scored, 3, &[], start());

		let mut seen = std::collections::HashSet::new();
		for day in &days {
			for p in day {
				assert!(seen.insert(p.id.clone()), "poi {} allocated twice", p.id);
			}
		}
	}

	#[test]
	fn quota_enforced_within_tolerance() {
		let pois: Vec<Poi> = (0..20)
			.map(|i| poi(&format!("core{i}"), Function::CoreAttraction, 10.0 + i as f64 * 0.01, 106.0))
			.collect();
		let scored: Vec<ScoredPoi> = pois.iter().map(|p| ScoredPoi { poi: p, ecs: 0.5 }).collect();
		let days = allocate(&scored, 3, &[], start());
		let quotas = quotas_for(3);
		for day in &days {
			let core_count = day.iter().filter(|p| p.function == Some(Function::CoreAttraction)).count();
			assert!(core_count <= quotas.core_max + 1, "day had {core_count} core POIs");
		}
	}

	#[test]
	fn single_day_trip_respects_k_equals_one_clustering() {
		let pois: Vec<Poi> = vec![
			poi("c1", Function::CoreAttraction, 10.0, 106.0),
			poi("c2", Function::CoreAttraction, 10.01, 106.01),
		];
		let scored: Vec<ScoredPoi> = pois.iter().map(|p| ScoredPoi { poi: p, ecs: 0.5 }).collect();
		let days = allocate(&scored, 1, &[], start());
		assert_eq!(days.len(), 1);
	}
}
