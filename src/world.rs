//! Collaborator contracts the retrieval logic calls into.
//!
//! Path-finding, threat detection, facility interaction and zone distance
//! queries live outside this crate. Hosts implement these traits over their
//! live world; [`crate::sim::SimWorld`] implements them in memory.

use serde::{Deserialize, Serialize};

use crate::cargo::Cargo;
use crate::coords::ZoneId;
use crate::facility::FacilityKind;
use crate::markers::MarkerSource;
use crate::worker::WorkerId;

/// Who controls a zone, as far as we can currently tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneControl {
    /// No presence in the zone this tick.
    Unobservable,
    /// Observable, with no controller or an unclaimed one.
    Uncontrolled,
    OwnedBySelf,
    /// Claimed by another authority. `established` is false while the
    /// claim is still being built up.
    Hostile { established: bool },
}

impl ZoneControl {
    pub fn is_observable(self) -> bool {
        !matches!(self, ZoneControl::Unobservable)
    }

    /// Whether remote retrieval should leave this zone alone.
    pub fn excludes_retrieval(self) -> bool {
        matches!(
            self,
            ZoneControl::OwnedBySelf | ZoneControl::Hostile { established: true }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Blocked,
}

/// Outcome of a reload, load or delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Done,
    NoTarget,
}

impl ActionResult {
    pub fn done(self) -> bool {
        self == ActionResult::Done
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// No threat; run normal behavior.
    NotTriggered,
    /// The worker moved away from a threat. Nothing else runs this tick.
    Retreated,
    /// A threat is present but the worker is clear of it; the caller runs
    /// its delivery action instead of normal behavior.
    SafeToAct,
}

pub trait ZoneIntel {
    fn zone_control(&self, zone: &ZoneId) -> ZoneControl;

    /// Closest zone to `from` holding a facility of `kind`.
    fn nearest_zone(&self, from: &ZoneId, kind: FacilityKind) -> Option<ZoneId>;

    /// Energy available for spawning a worker body in `zone`.
    fn energy_capacity(&self, zone: &ZoneId) -> u32;
}

pub trait WorkerActions {
    /// Zone the worker currently stands in, or `None` once it no longer exists.
    fn worker_zone(&self, worker: WorkerId) -> Option<ZoneId>;
    fn is_spawning(&self, worker: WorkerId) -> bool;
    fn ticks_to_live(&self, worker: WorkerId) -> Option<u32>;
    fn cargo(&self, worker: WorkerId) -> Option<Cargo>;

    /// Cross-zone move with local threat avoidance.
    fn move_toward_zone(&mut self, worker: WorkerId, zone: &ZoneId) -> MoveResult;

    /// Withdraw from the first facility in `kinds` order that has energy.
    fn reload(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult;
    /// Pick up from a store of one of `kinds`.
    fn load(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult;
    /// Transfer into a store of one of `kinds`.
    fn deliver_to_store(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult;
    /// Transfer into a powered structure of one of `kinds` that needs energy.
    fn deliver_to_structure(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult;

    fn retreat_if_threatened(&mut self, worker: WorkerId, home_zone: &ZoneId) -> Retreat;
}

/// Everything the retrieval logic needs from its host.
pub trait World: MarkerSource + ZoneIntel + WorkerActions {}

impl<T: MarkerSource + ZoneIntel + WorkerActions> World for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_rules() {
        assert!(ZoneControl::OwnedBySelf.excludes_retrieval());
        assert!(ZoneControl::Hostile { established: true }.excludes_retrieval());
        assert!(!ZoneControl::Hostile { established: false }.excludes_retrieval());
        assert!(!ZoneControl::Uncontrolled.excludes_retrieval());
        assert!(!ZoneControl::Unobservable.excludes_retrieval());
    }

    #[test]
    fn observability() {
        assert!(!ZoneControl::Unobservable.is_observable());
        assert!(ZoneControl::OwnedBySelf.is_observable());
    }
}
