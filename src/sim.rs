//! In-memory world implementing every collaborator trait.
//!
//! Zones form an undirected graph; movement steps one zone per tick along a
//! shortest path and distance queries are breadth-first over the same graph.

use std::cell::Cell;
use std::collections::{BTreeMap, HashSet, VecDeque};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::cargo::Cargo;
use crate::coords::{WorldPos, ZoneId};
use crate::facility::FacilityKind;
use crate::markers::{ColorPair, Marker, MarkerSource, REMOTE_RETRIEVAL_COLORS};
use crate::world::{ActionResult, MoveResult, Retreat, WorkerActions, ZoneControl, ZoneIntel};
use crate::worker::WorkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facility {
    pub kind: FacilityKind,
    pub energy: u32,
    pub capacity: u32,
}

impl Facility {
    pub fn new(kind: FacilityKind, energy: u32, capacity: u32) -> Self {
        Self { kind, energy, capacity }
    }

    fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.energy)
    }
}

#[derive(Debug, Clone)]
struct SimZone {
    control: ZoneControl,
    facilities: Vec<Facility>,
    energy_capacity: u32,
    hostile: bool,
    exits: Vec<ZoneId>,
}

impl SimZone {
    fn new(control: ZoneControl) -> Self {
        Self {
            control,
            facilities: Vec::new(),
            energy_capacity: 0,
            hostile: false,
            exits: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct SimWorker {
    zone: ZoneId,
    cargo: Cargo,
    ticks_to_live: u32,
    spawning: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    zones: BTreeMap<ZoneId, SimZone>,
    markers: Vec<Marker>,
    workers: BTreeMap<WorkerId, SimWorker>,
    marker_scans: Cell<u32>,
    hide_unobservable_markers: bool,
    moves: u32,
    retreats: u32,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a zone, or updates the control of one created by [`Self::connect`].
    pub fn add_zone(&mut self, name: &str, control: ZoneControl) {
        self.zones
            .entry(ZoneId::new(name))
            .and_modify(|z| z.control = control)
            .or_insert_with(|| SimZone::new(control));
    }

    /// Links two zones both ways. Unknown zones are created unobservable.
    pub fn connect(&mut self, a: &str, b: &str) {
        let (a, b) = (ZoneId::new(a), ZoneId::new(b));
        self.zone_mut(&a).exits.push(b.clone());
        self.zone_mut(&b).exits.push(a);
    }

    fn zone_mut(&mut self, zone: &ZoneId) -> &mut SimZone {
        self.zones
            .entry(zone.clone())
            .or_insert_with(|| SimZone::new(ZoneControl::Unobservable))
    }

    pub fn add_facility(&mut self, zone: &str, facility: Facility) {
        self.zone_mut(&ZoneId::new(zone)).facilities.push(facility);
    }

    pub fn set_energy_capacity(&mut self, zone: &str, capacity: u32) {
        self.zone_mut(&ZoneId::new(zone)).energy_capacity = capacity;
    }

    pub fn set_hostile(&mut self, zone: &str, hostile: bool) {
        self.zone_mut(&ZoneId::new(zone)).hostile = hostile;
    }

    pub fn drain_facilities(&mut self, zone: &str) {
        for f in &mut self.zone_mut(&ZoneId::new(zone)).facilities {
            f.energy = 0;
        }
    }

    pub fn facility_energy(&self, zone: &str, kind: FacilityKind) -> Option<u32> {
        self.zones
            .get(&ZoneId::new(zone))?
            .facilities
            .iter()
            .find(|f| f.kind == kind)
            .map(|f| f.energy)
    }

    pub fn place_marker(&mut self, name: &str, zone: &str, x: i32, y: i32) {
        self.place_marker_with(name, zone, x, y, REMOTE_RETRIEVAL_COLORS);
    }

    pub fn place_marker_with(&mut self, name: &str, zone: &str, x: i32, y: i32, colors: ColorPair) {
        self.markers.push(Marker {
            name: name.to_string(),
            colors,
            pos: WorldPos::new(zone, x, y),
        });
    }

    /// With `false`, markers in unobservable zones are left out of scans.
    pub fn set_lists_unobservable(&mut self, lists: bool) {
        self.hide_unobservable_markers = !lists;
    }

    pub fn remove_marker(&mut self, name: &str) {
        self.markers.retain(|m| m.name != name);
    }

    /// Places `count` retrieval markers at random spots in `zones`.
    pub fn scatter_markers(&mut self, zones: &[&str], count: usize, seed: u64) {
        if zones.is_empty() {
            return;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        for i in 0..count {
            let zone = zones[rng.gen_range(0..zones.len())];
            let (x, y) = (rng.gen_range(0..50), rng.gen_range(0..50));
            self.place_marker(&format!("scatter{i}"), zone, x, y);
        }
    }

    pub fn spawn_worker(&mut self, id: WorkerId, zone: &str, capacity: u32, ticks_to_live: u32) {
        self.workers.insert(
            id,
            SimWorker {
                zone: ZoneId::new(zone),
                cargo: Cargo::new(capacity),
                ticks_to_live,
                spawning: false,
            },
        );
    }

    pub fn set_spawning(&mut self, id: WorkerId, spawning: bool) {
        if let Some(w) = self.workers.get_mut(&id) {
            w.spawning = spawning;
        }
    }

    pub fn fill_cargo(&mut self, id: WorkerId) {
        if let Some(w) = self.workers.get_mut(&id) {
            w.cargo.amount = w.cargo.capacity;
        }
    }

    pub fn worker_zone_of(&self, id: WorkerId) -> Option<ZoneId> {
        self.workers.get(&id).map(|w| w.zone.clone())
    }

    pub fn cargo_of(&self, id: WorkerId) -> Cargo {
        self.workers.get(&id).map(|w| w.cargo).unwrap_or_default()
    }

    /// Ages every worker by one tick and removes the expired ones.
    pub fn advance(&mut self) {
        for w in self.workers.values_mut() {
            w.ticks_to_live = w.ticks_to_live.saturating_sub(1);
        }
        self.workers.retain(|_, w| w.ticks_to_live > 0);
    }

    pub fn marker_scans(&self) -> u32 {
        self.marker_scans.get()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn retreats(&self) -> u32 {
        self.retreats
    }

    /// Breadth-first walk from `from`; returns the first zone satisfying
    /// `pred` together with the first hop toward it.
    fn search<P: Fn(&ZoneId) -> bool>(&self, from: &ZoneId, pred: P) -> Option<(ZoneId, Option<ZoneId>)> {
        let mut seen = HashSet::from([from.clone()]);
        let mut queue = VecDeque::from([(from.clone(), None::<ZoneId>)]);
        while let Some((zone, first_hop)) = queue.pop_front() {
            if pred(&zone) {
                return Some((zone, first_hop));
            }
            let Some(z) = self.zones.get(&zone) else { continue };
            for next in &z.exits {
                if seen.insert(next.clone()) {
                    let hop = first_hop.clone().or_else(|| Some(next.clone()));
                    queue.push_back((next.clone(), hop));
                }
            }
        }
        None
    }

    fn local_facilities(&mut self, worker: WorkerId) -> Option<(&mut Cargo, &mut Vec<Facility>)> {
        let w = self.workers.get_mut(&worker)?;
        let zone = self.zones.get_mut(&w.zone)?;
        Some((&mut w.cargo, &mut zone.facilities))
    }

    fn withdraw(&mut self, worker: WorkerId, kinds: &[FacilityKind], stores_only: bool) -> ActionResult {
        let Some((cargo, facilities)) = self.local_facilities(worker) else {
            return ActionResult::NoTarget;
        };
        if cargo.is_full() {
            return ActionResult::NoTarget;
        }
        for kind in kinds.iter().filter(|k| !stores_only || k.is_store()) {
            if let Some(f) = facilities.iter_mut().find(|f| f.kind == *kind && f.energy > 0) {
                let taken = cargo.load(f.energy);
                f.energy -= taken;
                return ActionResult::Done;
            }
        }
        ActionResult::NoTarget
    }

    fn deposit<P: Fn(FacilityKind) -> bool>(&mut self, worker: WorkerId, kinds: &[FacilityKind], accepts: P) -> ActionResult {
        let Some((cargo, facilities)) = self.local_facilities(worker) else {
            return ActionResult::NoTarget;
        };
        if cargo.is_empty() {
            return ActionResult::NoTarget;
        }
        for kind in kinds.iter().filter(|k| accepts(**k)) {
            if let Some(f) = facilities.iter_mut().find(|f| f.kind == *kind && f.free() > 0) {
                let given = cargo.unload(f.free());
                f.energy += given;
                return ActionResult::Done;
            }
        }
        ActionResult::NoTarget
    }
}

impl MarkerSource for SimWorld {
    fn list_markers(&self, colors: ColorPair) -> Vec<Marker> {
        self.marker_scans.set(self.marker_scans.get() + 1);
        self.markers
            .iter()
            .filter(|m| m.colors == colors)
            .filter(|m| !self.hide_unobservable_markers || self.zone_control(m.zone()).is_observable())
            .cloned()
            .collect()
    }

    fn lists_unobservable(&self) -> bool {
        !self.hide_unobservable_markers
    }
}

impl ZoneIntel for SimWorld {
    fn zone_control(&self, zone: &ZoneId) -> ZoneControl {
        self.zones.get(zone).map_or(ZoneControl::Unobservable, |z| z.control)
    }

    fn nearest_zone(&self, from: &ZoneId, kind: FacilityKind) -> Option<ZoneId> {
        self.search(from, |zone| {
            self.zones
                .get(zone)
                .is_some_and(|z| z.facilities.iter().any(|f| f.kind == kind))
        })
        .map(|(zone, _)| zone)
    }

    fn energy_capacity(&self, zone: &ZoneId) -> u32 {
        self.zones.get(zone).map_or(0, |z| z.energy_capacity)
    }
}

impl WorkerActions for SimWorld {
    fn worker_zone(&self, worker: WorkerId) -> Option<ZoneId> {
        self.worker_zone_of(worker)
    }

    fn is_spawning(&self, worker: WorkerId) -> bool {
        self.workers.get(&worker).is_some_and(|w| w.spawning)
    }

    fn ticks_to_live(&self, worker: WorkerId) -> Option<u32> {
        self.workers.get(&worker).map(|w| w.ticks_to_live)
    }

    fn cargo(&self, worker: WorkerId) -> Option<Cargo> {
        self.workers.get(&worker).map(|w| w.cargo)
    }

    fn move_toward_zone(&mut self, worker: WorkerId, zone: &ZoneId) -> MoveResult {
        let Some(here) = self.worker_zone_of(worker) else {
            return MoveResult::Blocked;
        };
        let Some((_, Some(hop))) = self.search(&here, |z| z == zone) else {
            return MoveResult::Blocked;
        };
        self.moves += 1;
        if let Some(w) = self.workers.get_mut(&worker) {
            w.zone = hop;
        }
        MoveResult::Moved
    }

    fn reload(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult {
        self.withdraw(worker, kinds, false)
    }

    fn load(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult {
        self.withdraw(worker, kinds, true)
    }

    fn deliver_to_store(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult {
        self.deposit(worker, kinds, FacilityKind::is_store)
    }

    fn deliver_to_structure(&mut self, worker: WorkerId, kinds: &[FacilityKind]) -> ActionResult {
        self.deposit(worker, kinds, FacilityKind::is_powered)
    }

    /// Hostiles in `home_zone` chase the worker out of it. A loaded worker
    /// already outside is clear to deliver; an empty one holds position.
    fn retreat_if_threatened(&mut self, worker: WorkerId, home_zone: &ZoneId) -> Retreat {
        if !self.zones.get(home_zone).is_some_and(|z| z.hostile) {
            return Retreat::NotTriggered;
        }
        let Some((inside, loaded)) = self
            .workers
            .get(&worker)
            .map(|w| (w.zone == *home_zone, !w.cargo.is_empty()))
        else {
            return Retreat::NotTriggered;
        };
        if !inside && loaded {
            return Retreat::SafeToAct;
        }
        self.retreats += 1;
        if inside {
            let exit = self.zones.get(home_zone).and_then(|z| z.exits.first().cloned());
            if let (Some(exit), Some(w)) = (exit, self.workers.get_mut(&worker)) {
                w.zone = exit;
            }
        }
        Retreat::Retreated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> SimWorld {
        let mut w = SimWorld::new();
        w.add_zone("A", ZoneControl::OwnedBySelf);
        w.add_zone("B", ZoneControl::Uncontrolled);
        w.connect("A", "B");
        w.connect("B", "C");
        w
    }

    #[test]
    fn connect_creates_unobservable_zones() {
        let w = line();
        assert_eq!(w.zone_control(&ZoneId::new("C")), ZoneControl::Unobservable);
        assert_eq!(w.zone_control(&ZoneId::new("Z")), ZoneControl::Unobservable);
        assert_eq!(w.zone_control(&ZoneId::new("A")), ZoneControl::OwnedBySelf);
    }

    #[test]
    fn movement_steps_one_zone() {
        let mut w = line();
        w.spawn_worker(WorkerId(1), "A", 50, 100);
        assert_eq!(w.move_toward_zone(WorkerId(1), &ZoneId::new("C")), MoveResult::Moved);
        assert_eq!(w.worker_zone_of(WorkerId(1)), Some(ZoneId::new("B")));
        assert_eq!(w.move_toward_zone(WorkerId(1), &ZoneId::new("Q")), MoveResult::Blocked);
    }

    #[test]
    fn nearest_zone_prefers_fewer_hops() {
        let mut w = line();
        w.add_facility("A", Facility::new(FacilityKind::Storage, 0, 100));
        w.add_facility("C", Facility::new(FacilityKind::Storage, 0, 100));
        assert_eq!(w.nearest_zone(&ZoneId::new("C"), FacilityKind::Storage), Some(ZoneId::new("C")));
        assert_eq!(w.nearest_zone(&ZoneId::new("B"), FacilityKind::Storage), Some(ZoneId::new("A")));
        assert_eq!(w.nearest_zone(&ZoneId::new("B"), FacilityKind::Spawn), None);
    }

    #[test]
    fn withdraw_and_deposit() {
        let mut w = line();
        w.add_facility("A", Facility::new(FacilityKind::Container, 80, 100));
        w.add_facility("A", Facility::new(FacilityKind::Storage, 0, 100));
        w.spawn_worker(WorkerId(1), "A", 50, 100);
        assert_eq!(w.reload(WorkerId(1), &[FacilityKind::Container]), ActionResult::Done);
        assert_eq!(w.cargo_of(WorkerId(1)).amount, 50);
        assert_eq!(w.facility_energy("A", FacilityKind::Container), Some(30));
        assert_eq!(w.deliver_to_structure(WorkerId(1), &[FacilityKind::Storage]), ActionResult::NoTarget);
        assert_eq!(w.deliver_to_store(WorkerId(1), &[FacilityKind::Storage]), ActionResult::Done);
        assert_eq!(w.facility_energy("A", FacilityKind::Storage), Some(50));
    }

    #[test]
    fn scatter_is_reproducible() {
        let mut a = SimWorld::new();
        let mut b = SimWorld::new();
        a.scatter_markers(&["W1", "W2"], 10, 7);
        b.scatter_markers(&["W1", "W2"], 10, 7);
        assert_eq!(a.list_markers(REMOTE_RETRIEVAL_COLORS), b.list_markers(REMOTE_RETRIEVAL_COLORS));
        assert_eq!(a.marker_scans(), 1);
    }

    #[test]
    fn advance_expires_workers() {
        let mut w = line();
        w.spawn_worker(WorkerId(1), "A", 50, 1);
        w.spawn_worker(WorkerId(2), "A", 50, 5);
        w.advance();
        assert!(w.worker_zone_of(WorkerId(1)).is_none());
        assert_eq!(w.ticks_to_live(WorkerId(2)), Some(4));
    }
}
