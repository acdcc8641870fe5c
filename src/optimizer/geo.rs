/*
 * src/optimizer/geo.rs
 *
 * File for geographic distance helpers
 *
 * Purpose:
 *   Great-circle distance between two points, used by the travel-time
 *   fallback (optimizer::travel_time), the clustering pre-filter
 *   (optimizer::allocator_cluster), and the activity-to-centroid scoring
 *   in optimizer::allocator_quota.
 */

use crate::models::poi::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
	let lat1 = a.lat.to_radians();
	let lat2 = b.lat.to_radians();
	let dlat = (b.lat - a.lat).to_radians();
	let dlng = (b.lng - a.lng).to_radians();

	let sin_dlat = (dlat / 2.0).sin();
	let sin_dlng = (dlng / 2.0).sin();
	let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
	let c = 2.0 * h.sqrt().asin();
	EARTH_RADIUS_KM * c
}

pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
	if points.is_empty() {
		return None;
	}
	let n = points.len() as f64;
	let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
	let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
	Some(GeoPoint { lat, lng })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_point_has_zero_distance() {
		let p = GeoPoint { lat: 10.0, lng: 106.0 };
		assert!(haversine_km(p, p) < 1e-9);
	}

	#[test]
	fn known_distance_is_approximately_correct() {
		// Hanoi to Ho Chi Minh City, roughly 1140-1160 km as the crow flies.
		let hanoi = GeoPoint { lat: 21.0285, lng: 105.8542 };
		let hcmc = GeoPoint { lat: 10.8231, lng: 106.6297 };
		let d = haversine_km(hanoi, hcmc);
		assert!(d > 1100.0 && d < 1200.0, "distance was {d}");
	}

	#[test]
	fn centroid_of_empty_is_none() {
		assert!(centroid(&[]).is_none());
	}
}
