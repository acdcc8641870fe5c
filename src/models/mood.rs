/*
 * src/models/mood.rs
 *
 * File for mood labels and the fixed mood-weight table
 *
 * Purpose:
 *   Models for the twelve user-facing mood labels and the emotional-tag
 *   weights each one carries. This table is a process-global constant;
 *   no request mutates it.
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the twelve fixed mood labels a caller can pass in `user_mood`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mood(pub String);

impl From<&str> for Mood {
	fn from(value: &str) -> Self {
		Mood(value.to_string())
	}
}

/// Weighted emotional tags for one mood. Positive weights favor a tag,
/// negative weights penalize it. Missing tags on a POI contribute 0.
pub type MoodWeights = HashMap<&'static str, f64>;

/// The fixed mood -> tag-weight table. An unknown mood (including the
/// empty-string mood used when a caller sends an empty `user_mood` list)
/// resolves to an empty weight map, so every POI scores 0 under it.
pub static MOOD_WEIGHTS: Lazy<HashMap<&'static str, MoodWeights>> = Lazy::new(|| {
	let mut table = HashMap::new();

	table.insert(
		"Yên tĩnh & Thư giãn",
		HashMap::from([
			("peaceful", 1.0),
			("scenic", 0.8),
			("seaside", 0.7),
			("lively", -0.9),
			("festive", -0.8),
			("touristy", -0.7),
		]),
	);
	table.insert(
		"Náo nhiệt & Xã hội",
		HashMap::from([
			("lively", 1.0),
			("festive", 0.9),
			("touristy", 0.7),
			("peaceful", -0.9),
			("spiritual", -0.6),
		]),
	);
	table.insert(
		"Lãng mạn & Riêng tư",
		HashMap::from([
			("romantic", 1.0),
			("scenic", 0.8),
			("peaceful", 0.7),
			("lively", -0.9),
			("festive", -0.8),
			("touristy", -0.7),
		]),
	);
	table.insert(
		"Điểm thu hút khách du lịch",
		HashMap::from([
			("touristy", 1.0),
			("lively", 0.8),
			("festive", 0.7),
			("local_gem", -0.8),
			("spiritual", -0.6),
		]),
	);
	table.insert(
		"Mạo hiểm & Thú vị",
		HashMap::from([
			("adventurous", 1.0),
			("scenic", 0.8),
			("seaside", 0.7),
			("peaceful", -0.9),
			("spiritual", -0.7),
		]),
	);
	table.insert(
		"Gia đình & Thoải mái",
		HashMap::from([
			("family-friendly", 1.0),
			("scenic", 0.8),
			("peaceful", 0.7),
			("adventurous", -0.8),
			("festive", -0.6),
		]),
	);
	table.insert(
		"Hiện đại & Sáng tạo",
		HashMap::from([
			("modern", 1.0),
			("lively", 0.7),
			("adventurous", 0.5),
			("historical", -1.0),
			("spiritual", -0.8),
			("local_gem", -0.7),
		]),
	);
	table.insert(
		"Tâm linh & Tôn giáo",
		HashMap::from([
			("spiritual", 1.0),
			("historical", 0.8),
			("peaceful", 0.7),
			("modern", -1.0),
			("adventurous", -0.7),
			("lively", -0.6),
		]),
	);
	table.insert(
		"Địa phương & Đích thực",
		HashMap::from([
			("local_gem", 1.0),
			("historical", 0.8),
			("peaceful", 0.7),
			("touristy", -1.0),
			("modern", -0.8),
			("lively", -0.7),
		]),
	);
	table.insert(
		"Cảnh quan thiên nhiên",
		HashMap::from([
			("scenic", 1.0),
			("peaceful", 0.9),
			("seaside", 0.8),
			("lively", -0.7),
			("festive", -0.6),
			("touristy", -0.5),
		]),
	);
	table.insert(
		"Lễ hội & Sôi động",
		HashMap::from([
			("festive", 1.0),
			("lively", 0.9),
			("touristy", 0.7),
			("peaceful", -1.0),
			("scenic", -0.8),
			("spiritual", -0.6),
		]),
	);
	table.insert(
		"Ven biển & Nghỉ dưỡng",
		HashMap::from([
			("seaside", 1.0),
			("scenic", 0.9),
			("peaceful", 0.8),
			("historical", -0.6),
			("spiritual", -0.5),
		]),
	);

	table
});

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_mood_resolves_weights() {
		let weights = MOOD_WEIGHTS.get("Yên tĩnh & Thư giãn").unwrap();
		assert_eq!(weights.get("peaceful"), Some(&1.0));
		assert_eq!(weights.get("lively"), Some(&-0.9));
	}

	#[test]
	fn unknown_mood_has_no_weights() {
		assert!(MOOD_WEIGHTS.get("").is_none());
	}

	#[test]
	fn all_twelve_moods_present() {
		assert_eq!(MOOD_WEIGHTS.len(), 12);
	}
}
