//! Entry point the per-tick driver holds on to.

use crate::body::{self, PartKind};
use crate::cache::{DemandCache, PersistentCache};
use crate::config::RetrievalConfig;
use crate::coords::ZoneId;
use crate::world::ZoneIntel;

/// Configuration plus both cache tiers. One instance is shared by every
/// retrieval worker processed by the same authority.
#[derive(Debug, Default, Clone)]
pub struct Retrieval {
    pub(crate) config: RetrievalConfig,
    pub(crate) cache: DemandCache,
}

impl Retrieval {
    pub fn new(config: RetrievalConfig) -> Self {
        Self { config, cache: DemandCache::new() }
    }

    pub fn with_persistent(config: RetrievalConfig, persistent: PersistentCache) -> Self {
        Self { config, cache: DemandCache::with_persistent(persistent) }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn cache(&self) -> &DemandCache {
        &self.cache
    }

    /// Must be called once at each tick boundary before any worker runs.
    pub fn begin_tick(&mut self, tick: u64) {
        self.cache.begin_tick(tick);
    }

    /// Body for a new worker spawned from `zone`.
    pub fn plan_body<Z: ZoneIntel>(&self, world: &Z, zone: &ZoneId) -> Vec<PartKind> {
        body::plan_body(&self.config, world.energy_capacity(zone))
    }
}
