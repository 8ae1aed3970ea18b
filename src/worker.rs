use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::ZoneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "worker#{}", self.0)
	}
}

/// Where a worker is in its collect-and-deliver cycle, as of its last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
	#[default]
	Uninitialized,
	Assigned,
	EnRouteOut,
	AtSource,
	ReturnPending,
	EnRouteBack,
	AtReturn,
}

/// Per-worker record persisted by the host between ticks.
///
/// The host creates it with only `birth_zone`; everything else is filled in
/// by the lifecycle, and `target_zone` never changes once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
	pub(crate) id: WorkerId,
	pub(crate) birth_zone: ZoneId,
	#[serde(default)]
	pub(crate) target_zone: Option<ZoneId>,
	#[serde(default)]
	pub(crate) return_zone: Option<ZoneId>,
	#[serde(default)]
	pub(crate) needs_return_zone: bool,
	#[serde(default)]
	pub(crate) initialized: bool,
	#[serde(default)]
	pub(crate) multi_zone: bool,
	/// Collect/deliver mode; flips on empty and full cargo.
	#[serde(default)]
	pub(crate) delivering: bool,
	/// Set when a replacement took over this worker's slot.
	#[serde(default)]
	pub(crate) relieved: bool,
	#[serde(default)]
	pub(crate) phase: Phase,
	/// Last tick's retreat outcome; not part of the persisted record.
	#[serde(skip)]
	pub(crate) retreating: bool,
}

impl Worker {
	pub fn new(id: WorkerId, birth_zone: impl Into<ZoneId>) -> Self {
		Self {
			id,
			birth_zone: birth_zone.into(),
			target_zone: None,
			return_zone: None,
			needs_return_zone: false,
			initialized: false,
			multi_zone: false,
			delivering: false,
			relieved: false,
			phase: Phase::Uninitialized,
			retreating: false,
		}
	}

	pub fn id(&self) -> WorkerId {
		self.id
	}
	pub fn birth_zone(&self) -> &ZoneId {
		&self.birth_zone
	}
	pub fn target_zone(&self) -> Option<&ZoneId> {
		self.target_zone.as_ref()
	}
	pub fn return_zone(&self) -> Option<&ZoneId> {
		self.return_zone.as_ref()
	}
	pub fn needs_return_zone(&self) -> bool {
		self.needs_return_zone
	}
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}
	pub fn is_multi_zone(&self) -> bool {
		self.multi_zone
	}
	pub fn is_delivering(&self) -> bool {
		self.delivering
	}
	pub fn is_relieved(&self) -> bool {
		self.relieved
	}
	pub fn phase(&self) -> Phase {
		self.phase
	}
	pub fn is_retreating(&self) -> bool {
		self.retreating
	}

	/// Marks this worker's slot as taken over by a fresh worker.
	pub fn relieve(&mut self) {
		self.relieved = true;
	}

	/// A resolved return zone is never missing.
	pub fn return_zone_consistent(&self) -> bool {
		!self.initialized || self.needs_return_zone || self.return_zone.is_some()
	}
}
