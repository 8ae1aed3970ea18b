use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
	Container,
	Storage,
	Link,
	Spawn,
	Extension,
	Tower,
	Terminal,
}

impl FacilityKind {
	/// Facilities that hold a general stock workers can withdraw from or
	/// deposit into, as opposed to structures that only consume energy.
	pub fn is_store(self) -> bool {
		matches!(self, FacilityKind::Container | FacilityKind::Storage | FacilityKind::Terminal)
	}

	pub fn is_powered(self) -> bool {
		matches!(self, FacilityKind::Spawn | FacilityKind::Extension | FacilityKind::Tower)
	}
}

/// Withdraw order when collecting at the source zone.
pub const RELOAD_PRIORITY: [FacilityKind; 7] = [
	FacilityKind::Container,
	FacilityKind::Storage,
	FacilityKind::Link,
	FacilityKind::Spawn,
	FacilityKind::Extension,
	FacilityKind::Tower,
	FacilityKind::Terminal,
];

/// Direct load fallback when no reload target yields anything.
pub const LOAD_PRIORITY: [FacilityKind; 3] = [
	FacilityKind::Storage,
	FacilityKind::Container,
	FacilityKind::Terminal,
];

/// Powered structures accepting a delivery once stores are exhausted.
pub const DEPOSIT_STRUCTURES: [FacilityKind; 3] = [
	FacilityKind::Extension,
	FacilityKind::Spawn,
	FacilityKind::Tower,
];
