//! Two-tier memoization for task discovery and demand.
//!
//! The tick tier is wiped at every tick boundary and rebuilt lazily. The
//! persistent tier survives ticks and answers for zones we can no longer
//! see; its entries are only ever overwritten by a fresh observation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coords::ZoneId;
use crate::markers::Marker;

#[derive(Debug, Default, Clone)]
pub struct TickCache {
    pub(crate) markers: Option<Vec<Marker>>,
    pub(crate) tasks: Option<Vec<ZoneId>>,
    pub(crate) demand: HashMap<ZoneId, u32>,
    pub(crate) num_desired: Option<u32>,
}

impl TickCache {
    pub fn is_empty(&self) -> bool {
        self.markers.is_none()
            && self.tasks.is_none()
            && self.demand.is_empty()
            && self.num_desired.is_none()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentCache {
    demand: HashMap<ZoneId, u32>,
}

impl PersistentCache {
    pub fn demand(&self, zone: &ZoneId) -> Option<u32> {
        self.demand.get(zone).copied()
    }

    pub fn record_demand(&mut self, zone: ZoneId, demand: u32) {
        self.demand.insert(zone, demand);
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct DemandCache {
    current_tick: Option<u64>,
    pub(crate) tick: TickCache,
    pub(crate) persistent: PersistentCache,
}

impl DemandCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a persistent tier restored by the host.
    pub fn with_persistent(persistent: PersistentCache) -> Self {
        Self { persistent, ..Self::default() }
    }

    /// Clears the tick tier when `tick` differs from the last one seen.
    /// Calling it again within the same tick keeps what was cached.
    pub fn begin_tick(&mut self, tick: u64) {
        if self.current_tick != Some(tick) {
            self.tick = TickCache::default();
            self.current_tick = Some(tick);
        }
    }

    pub fn current_tick(&self) -> Option<u64> {
        self.current_tick
    }

    pub fn tick_cache(&self) -> &TickCache {
        &self.tick
    }

    pub fn persistent(&self) -> &PersistentCache {
        &self.persistent
    }
}
