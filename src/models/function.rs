/*
 * src/models/function.rs
 *
 * File for the POI function classification
 *
 * Purpose:
 *   Coarse category used by the day allocators for quota bookkeeping.
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
	CoreAttraction,
	Activity,
	Resort,
	FoodBeverage,
	Dining,
	Accommodation,
	Other,
}

impl Function {
	/// Parses the free-text function tag a POI carries. Unrecognized or
	/// empty text has no `Function` - the filter pipeline drops such POIs.
	pub fn parse(raw: &str) -> Option<Function> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"CORE_ATTRACTION" | "CORE" => Some(Function::CoreAttraction),
			"ACTIVITY" => Some(Function::Activity),
			"RESORT" => Some(Function::Resort),
			"FOOD_BEVERAGE" | "FOOD_AND_BEVERAGE" | "F&B" => Some(Function::FoodBeverage),
			"DINING" | "RESTAURANT" => Some(Function::Dining),
			"ACCOMMODATION" | "LODGING" => Some(Function::Accommodation),
			"OTHER" => Some(Function::Other),
			_ => None,
		}
	}

	pub fn is_food(self) -> bool {
		matches!(self, Function::FoodBeverage | Function::Dining)
	}

	/// The canonical wire-format tag for this function, as round-tripped
	/// back into a `PoiDto` for the response body.
	pub fn as_wire_str(self) -> &'static str {
		match self {
			Function::CoreAttraction => "CORE_ATTRACTION",
			Function::Activity => "ACTIVITY",
			Function::Resort => "RESORT",
			Function::FoodBeverage => "FOOD_BEVERAGE",
			Function::Dining => "DINING",
			Function::Accommodation => "ACCOMMODATION",
			Function::Other => "OTHER",
		}
	}
}
