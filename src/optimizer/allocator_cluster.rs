/*
 * src/optimizer/allocator_cluster.rs
 *
 * File for the clustering day allocator (endpoint B)
 *
 * Purpose:
 *   Higher-quality preview allocator: pre-filters to the starting
 *   point's neighborhood, clusters geographically, then round-robins
 *   across clusters and moods to fill each day's slots. Produces an
 *   earmark per day; the shared sequencer orders and times each day.
 */

use chrono::NaiveDateTime;

use crate::models::poi::{GeoPoint, Poi};
use crate::optimizer::filter::ScoredPoi;
use crate::optimizer::geo::haversine_km;
use crate::optimizer::kmeans::cluster;
use crate::optimizer::scoring::ecs;

const PRE_FILTER_RADIUS_KM: f64 = 15.0;

/// Partitions `scored` across `duration_days` days, filling
/// `pois_per_day` slots per day. Only POIs within `PRE_FILTER_RADIUS_KM`
/// of `origin` are eligible.
pub fn allocate<'a>(
	scored: &[ScoredPoi<'a>],
	duration_days: u32,
	moods: &[String],
	origin: GeoPoint,
	pois_per_day: usize,
	_start: NaiveDateTime,
) -> Vec<Vec<&'a Poi>> {
	let duration_days = duration_days.max(1) as usize;
	let pois_per_day = pois_per_day.max(1);

	let nearby: Vec<&ScoredPoi> = scored
		.iter()
		.filter(|s| s.poi.location.map(|p| haversine_km(origin, p) <= PRE_FILTER_RADIUS_KM).unwrap_or(false))
		.collect();

	if nearby.is_empty() {
		return vec![Vec::new(); duration_days];
	}

	let coords: Vec<GeoPoint> = nearby.iter().filter_map(|s| s.poi.location).collect();
	let k = duration_days.min(coords.len()).max(1);
	let assignment = cluster(&coords, k);

	let mut clusters: Vec<Vec<&ScoredPoi>> = vec![Vec::new(); k];
	for (scored_poi, cluster_idx) in nearby.iter().zip(assignment) {
		clusters[cluster_idx].push(scored_poi);
	}
	clusters.sort_by_key(|c| std::cmp::Reverse(c.len()));

	let mood_list: Vec<String> = if moods.is_empty() { vec![String::new()] } else { moods.to_vec() };

	// Per cluster, per mood: POIs ranked best-first.
	let mood_rankings: Vec<Vec<Vec<&ScoredPoi>>> = clusters
		.iter()
		.map(|cluster_pois| {
			mood_list
				.iter()
				.map(|mood| {
					let mut ranked: Vec<&ScoredPoi> = cluster_pois.clone();
					ranked.sort_by(|a, b| {
						ecs(a.poi, std::slice::from_ref(mood))
							.total_cmp(&ecs(b.poi, std::slice::from_ref(mood)))
							.reverse()
							.then(a.poi.id.cmp(&b.poi.id))
					});
					ranked
				})
				.collect()
		})
		.collect();

	let cluster_ecs_sorted: Vec<Vec<&ScoredPoi>> = clusters
		.iter()
		.map(|cluster_pois| {
			let mut ranked = cluster_pois.clone();
			ranked.sort_by(|a, b| b.ecs.total_cmp(&a.ecs).then(a.poi.id.cmp(&b.poi.id)));
			ranked
		})
		.collect();

	let global_by_mood: Vec<Vec<&ScoredPoi>> = mood_list
		.iter()
		.map(|mood| {
			let mut ranked: Vec<&ScoredPoi> = nearby.clone();
			ranked.sort_by(|a, b| {
				ecs(a.poi, std::slice::from_ref(mood))
					.total_cmp(&ecs(b.poi, std::slice::from_ref(mood)))
					.reverse()
					.then(a.poi.id.cmp(&b.poi.id))
			});
			ranked
		})
		.collect();

	let mut ranking_cursors: Vec<Vec<usize>> = mood_rankings.iter().map(|per_mood| vec![0; per_mood.len()]).collect();
	let mut cluster_cursors: Vec<usize> = vec![0; k];
	let mut global_cursors: Vec<usize> = vec![0; mood_list.len()];
	let mut used: std::collections::HashSet<&str> = std::collections::HashSet::new();

	let mut days: Vec<Vec<&'a Poi>> = vec![Vec::new(); duration_days];

	for day in 0..duration_days {
		for slot in 0..pois_per_day {
			let mood_idx = slot % mood_list.len();
			let cluster_idx = (day + slot) % k;

			let mut picked: Option<&Poi> = None;

			while ranking_cursors[cluster_idx][mood_idx] < mood_rankings[cluster_idx][mood_idx].len() {
				let candidate = mood_rankings[cluster_idx][mood_idx][ranking_cursors[cluster_idx][mood_idx]];
				ranking_cursors[cluster_idx][mood_idx] += 1;
				if used.insert(candidate.poi.id.as_str()) {
					picked = Some(candidate.poi);
					break;
				}
			}

			if picked.is_none() {
				while cluster_cursors[cluster_idx] < cluster_ecs_sorted[cluster_idx].len() {
					let candidate = cluster_ecs_sorted[cluster_idx][cluster_cursors[cluster_idx]];
					cluster_cursors[cluster_idx] += 1;
					if used.insert(candidate.poi.id.as_str()) {
						picked = Some(candidate.poi);
						break;
					}
				}
			}

			if picked.is_none() {
				while global_cursors[mood_idx] < global_by_mood[mood_idx].len() {
					let candidate = global_by_mood[mood_idx][global_cursors[mood_idx]];
					global_cursors[mood_idx] += 1;
					if used.insert(candidate.poi.id.as_str()) {
						picked = Some(candidate.poi);
						break;
					}
				}
			}

			match picked {
				Some(poi) => days[day].push(poi),
				None => break,
			}
		}
	}

	days
}
