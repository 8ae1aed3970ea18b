use serde::{Deserialize, Serialize};

use crate::coords::{WorldPos, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
	Red,
	Purple,
	Blue,
	Cyan,
	Green,
	Yellow,
	Orange,
	Brown,
	Grey,
	White,
}

/// Two-color signature identifying the kind of task a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
	pub primary: MarkerColor,
	pub secondary: MarkerColor,
}

impl ColorPair {
	pub const fn new(primary: MarkerColor, secondary: MarkerColor) -> Self {
		Self { primary, secondary }
	}
}

/// Signature of remote retrieval markers.
pub const REMOTE_RETRIEVAL_COLORS: ColorPair = ColorPair::new(MarkerColor::Yellow, MarkerColor::Blue);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
	pub name: String,
	pub colors: ColorPair,
	pub pos: WorldPos,
}

impl Marker {
	pub fn zone(&self) -> &ZoneId {
		&self.pos.zone
	}
}

/// Anything that can enumerate placed markers by signature.
pub trait MarkerSource {
	/// Every marker whose primary and secondary colors match `colors`,
	/// including markers in zones that are not currently observable.
	fn list_markers(&self, colors: ColorPair) -> Vec<Marker>;

	/// Whether `list_markers` covers zones that are not currently observable.
	/// When false, a missing marker in such a zone may just be out of sight,
	/// and demand there falls back to the last fresh value.
	fn lists_unobservable(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn marker_zone_comes_from_position() {
		let m = Marker {
			name: "r1".into(),
			colors: REMOTE_RETRIEVAL_COLORS,
			pos: WorldPos::new("W5", 20, 20),
		};
		assert_eq!(m.zone(), &ZoneId::new("W5"));
	}

	#[test]
	fn signature_is_ordered() {
		let swapped = ColorPair::new(MarkerColor::Blue, MarkerColor::Yellow);
		assert_ne!(swapped, REMOTE_RETRIEVAL_COLORS);
	}
}
