/*
 * src/models/poi.rs
 *
 * File for the core point-of-interest domain model
 *
 * Purpose:
 *   The optimizer's internal POI representation, decoded once from the
 *   wire-level DTO (`http_models::optimize::PoiDto`) so every downstream
 *   stage (scoring, filtering, allocation, sequencing) works against one
 *   normalized shape.
 */

use std::collections::HashMap;

use super::function::Function;
use super::opening_hours::OpeningHours;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
	pub lat: f64,
	pub lng: f64,
}

#[derive(Debug, Clone)]
pub struct Poi {
	pub id: String,
	pub name: String,
	pub location: Option<GeoPoint>,
	pub emotional_tags: HashMap<String, f64>,
	pub function: Option<Function>,
	pub include_in_daily_route: Option<bool>,
	pub types: Vec<String>,
	pub opening_hours: OpeningHours,
	pub visit_duration_minutes: Option<u32>,
	pub estimated_visit_minutes: Option<u32>,
}

impl Poi {
	/// Whether this POI's type list contains any of the given lowercase needles.
	pub fn has_any_type(&self, needles: &[&str]) -> bool {
		self.types
			.iter()
			.any(|t| needles.contains(&t.to_ascii_lowercase().as_str()))
	}
}
