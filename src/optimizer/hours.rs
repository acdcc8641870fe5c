/*
 * src/optimizer/hours.rs
 *
 * File for the opening-hours evaluator
 *
 * Purpose:
 *   Decide whether a POI is open at a given instant, and when it next
 *   opens after a given instant. Structured periods are tried first,
 *   then free-text weekday descriptions, then a reasonable-hours guard
 *   for POIs with no usable schedule data at all.
 *
 * Include:
 *   is_open                 - open/closed decision at an instant
 *   earliest_opening_after  - next instant the POI is known (or assumed) open
 */

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::models::opening_hours::{OpeningHours, Period};
use crate::models::poi::Poi;

fn internal_weekday(dt: NaiveDateTime) -> u8 {
	dt.weekday().num_days_from_monday() as u8
}

fn minutes_of_day(dt: NaiveDateTime) -> u32 {
	dt.hour() * 60 + dt.minute()
}

fn reasonable_hours(dt: NaiveDateTime) -> bool {
	let hour = dt.hour();
	(6..22).contains(&hour)
}

fn period_matches(period: &Period, arrival_day: u8, arrival_minutes: u32) -> bool {
	let open_day = period.open_day;
	let close_day = period.close_day.unwrap_or(open_day);
	let open_minutes = period.open_minutes_of_day();
	let close_minutes = period.close_minutes_of_day();

	if close_day == open_day {
		return arrival_day == open_day && open_minutes <= arrival_minutes && arrival_minutes < close_minutes;
	}

	if arrival_day == open_day && arrival_minutes >= open_minutes {
		return true;
	}
	if arrival_day == close_day && arrival_minutes < close_minutes {
		return true;
	}
	let span = (close_day as i32 - open_day as i32).rem_euclid(7);
	let diff = (arrival_day as i32 - open_day as i32).rem_euclid(7);
	span > 1 && diff < span
}

const EN_DAYS: [&str; 7] = [
	"monday",
	"tuesday",
	"wednesday",
	"thursday",
	"friday",
	"saturday",
	"sunday",
];
const VI_DAYS: [&str; 7] = [
	"thứ hai",
	"thứ ba",
	"thứ tư",
	"thứ năm",
	"thứ sáu",
	"thứ bảy",
	"chủ nhật",
];

/// Parses a clock time like "8:00 AM", "8 AM", "20:00", or "20.00" into
/// minutes since midnight. Returns `None` if nothing matches.
fn parse_time_string(raw: &str) -> Option<u32> {
	let normalized = raw
		.trim()
		.replace('–', "-")
		.replace('—', "-")
		.trim()
		.to_string();

	if let Some((h, rest)) = split_am_pm(&normalized) {
		let (hour_str, minute_str) = match rest.split_once(':') {
			Some((h2, m2)) => (h2, Some(m2)),
			None => (rest.as_str(), None),
		};
		let mut hour: u32 = hour_str.trim().parse().ok()?;
		let minute: u32 = match minute_str {
			Some(m) => m.trim().parse().ok()?,
			None => 0,
		};
		if hour == 12 {
			hour = 0;
		}
		let hour = if h { hour + 12 } else { hour };
		if hour < 24 && minute < 60 {
			return Some(hour * 60 + minute);
		}
		return None;
	}

	for sep in [':', '.'] {
		if let Some((h, m)) = normalized.split_once(sep) {
			if let (Ok(hour), Ok(minute)) = (h.trim().parse::<u32>(), m.trim().parse::<u32>()) {
				if hour < 24 && minute < 60 {
					return Some(hour * 60 + minute);
				}
			}
		}
	}
	None
}

/// Detects a trailing AM/PM marker and strips it; returns (is_pm, remainder).
fn split_am_pm(s: &str) -> Option<(bool, String)> {
	let lower = s.to_ascii_lowercase();
	if let Some(prefix) = lower.strip_suffix("am") {
		return Some((false, prefix.trim().to_string()));
	}
	if let Some(prefix) = lower.strip_suffix("pm") {
		return Some((true, prefix.trim().to_string()));
	}
	None
}

fn weekday_description_result(descriptions: &[String], arrival: NaiveDateTime) -> Option<bool> {
	let idx = internal_weekday(arrival) as usize;
	let en = EN_DAYS[idx];
	let vi = VI_DAYS[idx];
	let arrival_minutes = minutes_of_day(arrival);

	for desc in descriptions {
		let Some((day_part, hours_part)) = desc.split_once(':') else {
			continue;
		};
		let day_part = day_part.trim().to_ascii_lowercase();
		if day_part != en && day_part != vi {
			continue;
		}

		let hours_part = hours_part.trim();
		if hours_part.is_empty() || hours_part.eq_ignore_ascii_case("closed") {
			return Some(false);
		}
		let lower = hours_part.to_ascii_lowercase();
		if lower.contains("open 24 hours") || lower.contains("24 hours") {
			return Some(true);
		}

		let normalized = hours_part.replace('–', "-").replace('—', "-").replace('−', "-");
		for interval in normalized.split(',').map(str::trim).filter(|s| !s.is_empty()) {
			let Some((start_str, end_str)) = interval.split_once('-') else {
				continue;
			};
			let (Some(start), Some(end)) =
				(parse_time_string(start_str.trim()), parse_time_string(end_str.trim()))
			else {
				continue;
			};
			if end <= start {
				if arrival_minutes >= start || arrival_minutes < end {
					return Some(true);
				}
			} else if start <= arrival_minutes && arrival_minutes < end {
				return Some(true);
			}
		}
		return Some(false);
	}
	None
}

/// Whether `poi` is open at `arrival`. `strict` applies the reasonable-hours
/// guard (06:00-22:00) whenever the POI carries no usable schedule data.
pub fn is_open(poi: &Poi, arrival: NaiveDateTime, strict: bool) -> bool {
	match &poi.opening_hours {
		OpeningHours::Periods(periods) => {
			let arrival_day = internal_weekday(arrival);
			let arrival_minutes = minutes_of_day(arrival);
			periods.iter().any(|p| period_matches(p, arrival_day, arrival_minutes))
		}
		OpeningHours::Descriptions(descriptions) => {
			match weekday_description_result(descriptions, arrival) {
				Some(open) => open,
				// Data was present but had nothing for this weekday: apply
				// the reasonable-hours guard unconditionally, same as Opaque.
				None => reasonable_hours(arrival),
			}
		}
		// Schedule data was present but unusable: guard applies regardless of strict.
		OpeningHours::Opaque => reasonable_hours(arrival),
		// No schedule data at all: guard applies only when strict.
		OpeningHours::Absent => !strict || reasonable_hours(arrival),
	}
}

/// The earliest instant at or after `after` that `poi` is known (or
/// assumed) to be open. Always returns a concrete instant: when nothing
/// is parseable this falls back to 06:00 the following day.
pub fn earliest_opening_after(poi: &Poi, after: NaiveDateTime) -> NaiveDateTime {
	match &poi.opening_hours {
		OpeningHours::Periods(periods) if !periods.is_empty() => {
			let after_day = internal_weekday(after);
			periods
				.iter()
				.map(|p| next_occurrence(p, after, after_day))
				.min()
				.unwrap_or_else(|| conservative_default(after))
		}
		OpeningHours::Descriptions(descriptions) => {
			descriptions
				.iter()
				.filter_map(|desc| first_opening_token(desc, after))
				.min()
				.unwrap_or_else(|| conservative_default(after))
		}
		_ => conservative_default(after),
	}
}

fn conservative_default(after: NaiveDateTime) -> NaiveDateTime {
	(after.date() + Duration::days(1))
		.and_hms_opt(6, 0, 0)
		.expect("valid time")
}

fn next_occurrence(period: &Period, after: NaiveDateTime, after_day: u8) -> NaiveDateTime {
	let days_until = (period.open_day as i32 - after_day as i32).rem_euclid(7);
	let candidate_date = after.date() + Duration::days(days_until as i64);
	let candidate = candidate_date
		.and_hms_opt(period.open_hour as u32, period.open_minute as u32, 0)
		.expect("valid time");
	if candidate > after {
		candidate
	} else {
		candidate + Duration::days(7)
	}
}

fn first_opening_token(desc: &str, after: NaiveDateTime) -> Option<NaiveDateTime> {
	let (day_part, hours_part) = desc.split_once(':')?;
	let day_part = day_part.trim().to_ascii_lowercase();
	let day_idx = EN_DAYS
		.iter()
		.position(|d| *d == day_part)
		.or_else(|| VI_DAYS.iter().position(|d| *d == day_part))?;

	let hours_part = hours_part.trim();
	if hours_part.is_empty() || hours_part.eq_ignore_ascii_case("closed") {
		return None;
	}
	let normalized = hours_part.replace('–', "-").replace('—', "-");
	let first_interval = normalized.split(',').next()?.trim();
	let (start_str, _) = first_interval.split_once('-')?;
	let start_minutes = parse_time_string(start_str.trim())?;

	let after_day = internal_weekday(after) as usize;
	let days_until = (day_idx as i32 - after_day as i32).rem_euclid(7) as i64;
	let candidate_date = after.date() + Duration::days(days_until);
	let candidate = candidate_date
		.and_hms_opt(start_minutes / 60, start_minutes % 60, 0)
		.expect("valid time");
	Some(if candidate > after { candidate } else { candidate + Duration::days(7) })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::function::Function;
	use chrono::NaiveDate;
	use std::collections::HashMap;

	fn poi_with(opening_hours: OpeningHours) -> Poi {
		Poi {
			id: "p1".into(),
			name: "Test".into(),
			location: None,
			emotional_tags: HashMap::new(),
			function: Some(Function::CoreAttraction),
			include_in_daily_route: Some(true),
			types: vec![],
			opening_hours,
			visit_duration_minutes: None,
			estimated_visit_minutes: None,
		}
	}

	fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
	}

	#[test]
	fn same_day_period_open_and_closed() {
		// 2026-08-03 is a Monday.
		let period = Period {
			open_day: 0,
			open_hour: 9,
			open_minute: 0,
			close_day: None,
			close_hour: Some(17),
			close_minute: Some(0),
		};
		let poi = poi_with(OpeningHours::Periods(vec![period]));
		assert!(is_open(&poi, dt(2026, 8, 3, 10, 0), false));
		assert!(!is_open(&poi, dt(2026, 8, 3, 18, 0), false));
	}

	#[test]
	fn overnight_period_spans_midnight() {
		// Friday 22:00 to Saturday 02:00.
		let period = Period {
			open_day: 4,
			open_hour: 22,
			open_minute: 0,
			close_day: Some(5),
			close_hour: Some(2),
			close_minute: Some(0),
		};
		let poi = poi_with(OpeningHours::Periods(vec![period]));
		// 2026-08-07 is a Friday.
		assert!(is_open(&poi, dt(2026, 8, 7, 23, 30), false));
		assert!(is_open(&poi, dt(2026, 8, 8, 1, 0), false));
		assert!(!is_open(&poi, dt(2026, 8, 8, 3, 0), false));
	}

	#[test]
	fn weekday_description_split_interval() {
		let poi = poi_with(OpeningHours::Descriptions(vec![
			"Monday: 8:00 AM – 5:00 PM, 6:00 PM – 10:00 PM".to_string(),
		]));
		assert!(!is_open(&poi, dt(2026, 8, 3, 17, 30), false));
		assert!(is_open(&poi, dt(2026, 8, 3, 18, 30), false));
	}

	#[test]
	fn absent_schedule_uses_reasonable_hours_guard_only_when_strict() {
		let poi = poi_with(OpeningHours::Absent);
		assert!(is_open(&poi, dt(2026, 8, 3, 3, 0), false));
		assert!(!is_open(&poi, dt(2026, 8, 3, 3, 0), true));
		assert!(is_open(&poi, dt(2026, 8, 3, 10, 0), true));
	}

	#[test]
	fn earliest_opening_after_falls_back_to_next_day_six_am() {
		let poi = poi_with(OpeningHours::Opaque);
		let next = earliest_opening_after(&poi, dt(2026, 8, 3, 10, 0));
		assert_eq!(next, dt(2026, 8, 4, 6, 0));
	}
}
