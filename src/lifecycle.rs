//! Per-worker collect-and-deliver cycle.
//!
//! Each tick a worker is initialized once, resolves its return zone the first
//! time it stands in its target zone, yields to threat retreat, and then
//! either collects at the target zone or delivers at the return zone.

use crate::assignment::{PoolEntry, assign_zone};
use crate::coords::ZoneId;
use crate::error::{Result, RetrievalError};
use crate::facility::FacilityKind;
use crate::retrieval::Retrieval;
use crate::world::{MoveResult, Retreat, World, ZoneIntel};
use crate::worker::{Phase, Worker, WorkerId};

/// What happened to a worker during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub phase: Phase,
    /// Threat retreat replaced normal behavior this tick.
    pub retreated: bool,
    /// No move or facility action took effect.
    pub idle: bool,
    /// Worker whose slot this worker took over during initialization.
    pub relieved: Option<WorkerId>,
}

impl TickReport {
    fn new(phase: Phase) -> Self {
        Self { phase, retreated: false, idle: true, relieved: None }
    }
}

impl Retrieval {
    /// Drives one lifecycle tick for `worker`.
    ///
    /// `pool` describes the other retrieval workers and is only consulted the
    /// first time the worker runs. Never fails: problems are logged and leave
    /// the worker idle for the tick.
    pub fn run<W: World>(&mut self, world: &mut W, worker: &mut Worker, pool: &[PoolEntry]) -> TickReport {
        let id = worker.id;
        if world.is_spawning(id) {
            return TickReport::new(worker.phase);
        }
        let Some(here) = world.worker_zone(id) else {
            tracing::warn!(error = %RetrievalError::UnknownWorker(id), "skipping retrieval tick");
            return TickReport::new(worker.phase);
        };

        let relieved = self.initialize(&*world, worker, pool);
        let mut report = self.step(world, worker, &here);
        report.relieved = relieved;
        report
    }

    /// One-time assignment. Returns the worker whose slot was taken over.
    fn initialize<W: World>(&mut self, world: &W, worker: &mut Worker, pool: &[PoolEntry]) -> Option<WorkerId> {
        if worker.initialized {
            return None;
        }
        let tasks = self.discover_tasks(world);
        let assignment = assign_zone(&tasks, |zone| self.demand(world, zone), pool);

        let (target, relieves) = match assignment {
            Some(a) => (a.zone, a.relieves),
            None => {
                tracing::warn!(
                    worker = %worker.id,
                    birth_zone = %worker.birth_zone,
                    "no remote retrieval zone available, falling back to birth zone"
                );
                (worker.birth_zone.clone(), None)
            }
        };
        if let Some(old) = relieves {
            tracing::info!(worker = %worker.id, relieved = %old, zone = %target, "taking over retrieval slot");
        }
        tracing::debug!(worker = %worker.id, zone = %target, "retrieval worker assigned");

        worker.target_zone = Some(target);
        worker.return_zone = Some(worker.birth_zone.clone());
        worker.needs_return_zone = true;
        worker.multi_zone = true;
        worker.initialized = true;
        worker.phase = Phase::Assigned;
        relieves
    }

    fn step<W: World>(&self, world: &mut W, worker: &mut Worker, here: &ZoneId) -> TickReport {
        let Some(target) = worker.target_zone.clone() else {
            return TickReport::new(worker.phase);
        };

        if worker.needs_return_zone && *here == target {
            if let Err(e) = resolve_return_zone(&*world, worker, here) {
                tracing::error!(error = %e, "return zone unresolved, retrying next tick");
            }
        }

        match world.retreat_if_threatened(worker.id, &target) {
            Retreat::Retreated => {
                worker.retreating = true;
                let mut report = TickReport::new(worker.phase);
                report.retreated = true;
                report.idle = false;
                return report;
            }
            Retreat::SafeToAct => {
                worker.retreating = true;
                let mut report = self.deliver(world, worker, here);
                report.retreated = true;
                return report;
            }
            Retreat::NotTriggered => worker.retreating = false,
        }

        if let Some(cargo) = world.cargo(worker.id) {
            if cargo.is_empty() {
                worker.delivering = false;
            } else if cargo.is_full() {
                worker.delivering = true;
            }
        }

        if worker.delivering {
            self.deliver(world, worker, here)
        } else {
            self.collect(world, worker, here, &target)
        }
    }

    fn collect<W: World>(&self, world: &mut W, worker: &mut Worker, here: &ZoneId, target: &ZoneId) -> TickReport {
        let id = worker.id;
        if here != target {
            worker.phase = Phase::EnRouteOut;
            let mut report = TickReport::new(worker.phase);
            report.idle = world.move_toward_zone(id, target) == MoveResult::Blocked;
            return report;
        }

        worker.phase = if worker.needs_return_zone { Phase::ReturnPending } else { Phase::AtSource };
        let mut report = TickReport::new(worker.phase);
        report.idle = !(world.reload(id, &self.config.reload_priority).done()
            || world.load(id, &self.config.load_priority).done());
        report
    }

    fn deliver<W: World>(&self, world: &mut W, worker: &mut Worker, here: &ZoneId) -> TickReport {
        let id = worker.id;
        let return_zone = match worker.return_zone.clone() {
            Some(zone) => zone,
            None => {
                tracing::error!(worker = %id, "return zone missing at delivery time, recomputing");
                match resolve_return_zone(&*world, worker, here) {
                    Ok(zone) => zone,
                    Err(e) => {
                        tracing::error!(error = %e, "return zone recovery failed");
                        return TickReport::new(worker.phase);
                    }
                }
            }
        };

        if *here != return_zone {
            worker.phase = Phase::EnRouteBack;
            let mut report = TickReport::new(worker.phase);
            report.idle = world.move_toward_zone(id, &return_zone) == MoveResult::Blocked;
            return report;
        }

        worker.phase = Phase::AtReturn;
        let mut report = TickReport::new(worker.phase);
        report.idle = !(world.deliver_to_store(id, &[FacilityKind::Storage]).done()
            || world.deliver_to_store(id, &[FacilityKind::Container]).done()
            || world.deliver_to_structure(id, &self.config.deposit_structures).done());
        report
    }
}

/// Nearest zone with storage from `here`, else nearest with a spawn.
/// Idempotent: on success the worker's return zone is set and the pending
/// flag cleared; on failure the record is left as it was.
fn resolve_return_zone<Z: ZoneIntel>(world: &Z, worker: &mut Worker, here: &ZoneId) -> Result<ZoneId> {
    let zone = world
        .nearest_zone(here, FacilityKind::Storage)
        .or_else(|| world.nearest_zone(here, FacilityKind::Spawn))
        .ok_or_else(|| RetrievalError::NoReturnZone { worker: worker.id, zone: here.clone() })?;

    tracing::info!(worker = %worker.id, from = %here, to = %zone, "return zone chosen");
    worker.return_zone = Some(zone.clone());
    worker.needs_return_zone = false;
    Ok(zone)
}
