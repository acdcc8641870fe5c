/*
 * src/models/opening_hours.rs
 *
 * File for POI opening-schedule models
 *
 * Purpose:
 *   A POI's schedule arrives in one of three shapes - structured periods,
 *   free-text weekday descriptions, or an opaque/absent blob - and is
 *   decoded once into a tagged `OpeningHours` so the evaluator in
 *   `optimizer::hours` branches on shape exactly once per POI.
 *
 * Include:
 *   Period        - one open/close window, internal Mon=0..Sun=6 weekdays
 *   OpeningHours  - tagged alternative over the three schedule shapes
 */

use serde::{Deserialize, Serialize};

/// A single open/close window. Weekdays are stored in the internal
/// Mon=0..Sun=6 convention; callers constructing one from the external
/// (Google-style) Sun=0..Sat=6 convention must go through
/// [`Period::from_external_day`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Period {
	pub open_day: u8,
	pub open_hour: u8,
	pub open_minute: u8,
	pub close_day: Option<u8>,
	pub close_hour: Option<u8>,
	pub close_minute: Option<u8>,
}

/// Converts an external (Sun=0..Sat=6) weekday index to the internal
/// (Mon=0..Sun=6) convention used throughout the evaluator.
pub fn external_weekday_to_internal(external: u8) -> u8 {
	// external Sun=0 -> internal 6; external Mon=1 -> internal 0; etc.
	((external + 6) % 7) as u8
}

impl Period {
	pub fn from_external_day(
		open_day_external: u8,
		open_hour: u8,
		open_minute: u8,
		close_day_external: Option<u8>,
		close_hour: Option<u8>,
		close_minute: Option<u8>,
	) -> Period {
		Period {
			open_day: external_weekday_to_internal(open_day_external),
			open_hour,
			open_minute,
			close_day: close_day_external.map(external_weekday_to_internal),
			close_hour,
			close_minute,
		}
	}

	pub fn open_minutes_of_day(&self) -> u32 {
		self.open_hour as u32 * 60 + self.open_minute as u32
	}

	/// Close time in minutes-of-day, treating an absent close hour as
	/// midnight (24:00) per the evaluator's same-day convention.
	pub fn close_minutes_of_day(&self) -> u32 {
		match self.close_hour {
			Some(h) => h as u32 * 60 + self.close_minute.unwrap_or(0) as u32,
			None => 24 * 60,
		}
	}
}

/// A POI's opening schedule, decoded once into one of three shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OpeningHours {
	/// Structured open/close periods.
	Periods(Vec<Period>),
	/// Free-text per-weekday descriptions (e.g. "Monday: 8:00 AM - 5:00 PM").
	Descriptions(Vec<String>),
	/// Present but neither periods nor descriptions were parseable.
	Opaque,
	/// No schedule data at all.
	Absent,
}

impl Default for OpeningHours {
	fn default() -> Self {
		OpeningHours::Absent
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn external_sunday_maps_to_internal_six() {
		assert_eq!(external_weekday_to_internal(0), 6);
	}

	#[test]
	fn external_monday_maps_to_internal_zero() {
		assert_eq!(external_weekday_to_internal(1), 0);
	}

	#[test]
	fn absent_close_hour_means_midnight() {
		let p = Period::from_external_day(1, 9, 0, None, None, None);
		assert_eq!(p.close_minutes_of_day(), 24 * 60);
	}
}
