/*
 * src/optimizer/ingest.rs
 *
 * File for wire-to-domain POI conversion
 *
 * Purpose:
 *   Converts a `PoiDto` (whatever field-name variant the caller sent)
 *   into the normalized `models::poi::Poi` the rest of the pipeline
 *   works against. Runs once per POI at the start of a request.
 */

use std::collections::HashMap;

use crate::http_models::optimize::{GeoPointDto, OpeningHoursDto, PoiDto};
use crate::models::function::Function;
use crate::models::opening_hours::{OpeningHours, Period};
use crate::models::poi::{GeoPoint, Poi};

static PLACEHOLDER_ID_SEQUENCE: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

fn next_placeholder_id() -> String {
	let n = PLACEHOLDER_ID_SEQUENCE.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
	format!("poi-{n}")
}

/// Converts a wire-level POI into the internal domain model. A POI with
/// no usable id gets a stable placeholder so downstream "seen" tracking
/// (allocators, sequencer) still has something to key on.
pub fn ingest_poi(dto: PoiDto) -> Poi {
	let id = dto.google_place_id.filter(|s| !s.is_empty()).unwrap_or_else(next_placeholder_id);

	let mut types = dto.types.unwrap_or_default();
	if let Some(t) = dto.poi_type {
		if !t.is_empty() && !types.iter().any(|existing| existing.eq_ignore_ascii_case(&t)) {
			types.push(t);
		}
	}

	let function = dto.function.as_deref().and_then(Function::parse);

	let weekday_descriptions = dto
		.weekday_descriptions
		.or_else(|| dto.opening_hours.as_ref().and_then(|oh| oh.weekday_descriptions.clone()));

	let opening_hours = resolve_opening_hours(dto.opening_hours, weekday_descriptions);

	Poi {
		id,
		name: dto.name,
		location: dto.location.map(to_geo_point),
		emotional_tags: dto.emotional_tags,
		function,
		include_in_daily_route: dto.include_in_daily_route,
		types,
		opening_hours,
		visit_duration_minutes: dto.visit_duration_minutes,
		estimated_visit_minutes: dto.estimated_visit_minutes,
	}
}

fn to_geo_point(dto: GeoPointDto) -> GeoPoint {
	GeoPoint { lat: dto.lat, lng: dto.lng }
}

fn resolve_opening_hours(dto: Option<OpeningHoursDto>, weekday_descriptions: Option<Vec<String>>) -> OpeningHours {
	let Some(dto) = dto else {
		return match weekday_descriptions {
			Some(descriptions) if !descriptions.is_empty() => OpeningHours::Descriptions(descriptions),
			_ => OpeningHours::Absent,
		};
	};

	if let Some(periods) = dto.periods {
		let converted: Vec<Period> = periods.iter().filter_map(convert_period).collect();
		if !converted.is_empty() {
			return OpeningHours::Periods(converted);
		}
	}

	if let Some(descriptions) = weekday_descriptions.filter(|d| !d.is_empty()) {
		return OpeningHours::Descriptions(descriptions);
	}

	OpeningHours::Opaque
}

fn convert_period(dto: &crate::http_models::optimize::PeriodDto) -> Option<Period> {
	let open = dto.open.as_ref()?;
	let open_day = open.day? as u8;
	let open_hour = open.hour?;
	let open_minute = open.minute.unwrap_or(0);

	let (close_day, close_hour, close_minute) = match &dto.close {
		Some(close) => (close.day.map(|d| d as u8), close.hour, Some(close.minute.unwrap_or(0))),
		None => (None, None, None),
	};

	Some(Period::from_external_day(open_day, open_hour, open_minute, close_day, close_hour, close_minute))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::http_models::optimize::{OpenPeriodEndpointDto, PeriodDto};

	fn base_dto() -> PoiDto {
		PoiDto {
			google_place_id: Some("abc".to_string()),
			name: "Test POI".to_string(),
			location: Some(GeoPointDto { lat: 10.0, lng: 106.0 }),
			emotional_tags: HashMap::new(),
			function: Some("CORE_ATTRACTION".to_string()),
			include_in_daily_route: Some(true),
			poi_type: None,
			types: None,
			opening_hours: None,
			weekday_descriptions: None,
			visit_duration_minutes: None,
			estimated_visit_minutes: None,
		}
	}

	#[test]
	fn missing_id_gets_stable_placeholder() {
		let mut dto = base_dto();
		dto.google_place_id = None;
		let poi = ingest_poi(dto);
		assert!(poi.id.starts_with("poi-"));
	}

	#[test]
	fn poi_type_merged_into_types_list() {
		let mut dto = base_dto();
		dto.poi_type = Some("museum".to_string());
		dto.types = Some(vec!["landmark".to_string()]);
		let poi = ingest_poi(dto);
		assert!(poi.types.contains(&"museum".to_string()));
        assert!(poi.types.contains(&"landmark".to_string()));
	}

	#[test]
	fn structured_periods_converted_with_weekday_flip() {
		let mut dto = base_dto();
		dto.opening_hours = Some(OpeningHoursDto {
			periods: Some(vec![PeriodDto {
				open: Some(OpenPeriodEndpointDto { day: Some(1), hour: Some(9), minute: Some(0) }),
				close: Some(OpenPeriodEndpointDto { day: Some(1), hour: Some(17), minute: Some(0) }),
			}]),
			weekday_descriptions: None,
		});
		let poi = ingest_poi(dto);
		match poi.opening_hours {
			OpeningHours::Periods(periods) => {
				// external day 1 (Monday) -> internal day 0.
				assert_eq!(periods[0].open_day, 0);
			}
			other => panic!("expected periods, got {other:?}"),
		}
	}

	#[test]
	fn opaque_when_structured_data_present_but_empty() {
		let mut dto = base_dto();
		dto.opening_hours = Some(OpeningHoursDto { periods: None, weekday_descriptions: None });
		let poi = ingest_poi(dto);
		assert!(matches!(poi.opening_hours, OpeningHours::Opaque));
	}

	#[test]
	fn unrecognized_function_text_has_no_function() {
		let mut dto = base_dto();
		dto.function = Some("spa".to_string());
		let poi = ingest_poi(dto);
		assert!(poi.function.is_none());
	}
}
