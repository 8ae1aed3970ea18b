use std::collections::HashSet;

use crate::coords::ZoneId;
use crate::markers::{Marker, MarkerSource};
use crate::retrieval::Retrieval;
use crate::world::ZoneIntel;

/// A zone flagged for remote retrieval.
pub type Task = ZoneId;

impl Retrieval {
    fn markers<M: MarkerSource>(&mut self, world: &M) -> &[Marker] {
        let colors = self.config.marker_colors;
        self.cache
            .tick
            .markers
            .get_or_insert_with(|| world.list_markers(colors))
    }

    /// Zones carrying a retrieval marker, in first-marker order, without
    /// duplicates. Observable zones held by us or firmly held by someone
    /// else are dropped; unobservable zones are always kept.
    pub fn discover_tasks<W: MarkerSource + ZoneIntel>(&mut self, world: &W) -> Vec<Task> {
        if let Some(tasks) = &self.cache.tick.tasks {
            return tasks.clone();
        }
        let zones: Vec<ZoneId> = self.markers(world).iter().map(|m| m.zone().clone()).collect();
        let mut seen = HashSet::new();
        let mut tasks = Vec::new();
        for zone in zones {
            if !seen.insert(zone.clone()) {
                continue;
            }
            if world.zone_control(&zone).excludes_retrieval() {
                continue;
            }
            tasks.push(zone);
        }
        tracing::debug!(count = tasks.len(), "retrieval tasks recomputed");
        self.cache.tick.tasks = Some(tasks.clone());
        tasks
    }

    /// Workers wanted in `zone` this tick.
    ///
    /// A marker in the zone means `desired_per_marker`; no listed marker means
    /// zero. Only when the marker source cannot list markers in unobservable
    /// zones, and the zone is unobservable, is the last fresh value from the
    /// persistent tier used instead.
    pub fn demand<W: MarkerSource + ZoneIntel>(&mut self, world: &W, zone: &ZoneId) -> u32 {
        if let Some(&d) = self.cache.tick.demand.get(zone) {
            return d;
        }
        let flagged = self.markers(world).iter().any(|m| m.zone() == zone);
        let value = if flagged {
            Some(self.config.desired_per_marker)
        } else if world.lists_unobservable() || world.zone_control(zone).is_observable() {
            Some(0)
        } else {
            None
        };
        let demand = match value {
            Some(fresh) => {
                self.cache.persistent.record_demand(zone.clone(), fresh);
                fresh
            }
            None => {
                let remembered = self.cache.persistent.demand(zone).unwrap_or(0);
                tracing::debug!(%zone, remembered, "demand served from persistent cache");
                remembered
            }
        };
        self.cache.tick.demand.insert(zone.clone(), demand);
        demand
    }

    /// Total demand across every discovered task.
    pub fn num_desired<W: MarkerSource + ZoneIntel>(&mut self, world: &W) -> u32 {
        if let Some(n) = self.cache.tick.num_desired {
            return n;
        }
        let tasks = self.discover_tasks(world);
        let total = tasks
            .iter()
            .map(|zone| self.demand(world, zone))
            .fold(0u32, |acc, d| acc.saturating_add(d));
        self.cache.tick.num_desired = Some(total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrievalConfig;
    use crate::markers::{ColorPair, MarkerColor};
    use crate::sim::SimWorld;
    use crate::world::ZoneControl;

    fn world() -> SimWorld {
        let mut w = SimWorld::new();
        w.add_zone("H1", ZoneControl::OwnedBySelf);
        w.add_zone("W1", ZoneControl::Uncontrolled);
        w.add_zone("W2", ZoneControl::Uncontrolled);
        w
    }

    #[test]
    fn no_markers_no_tasks() {
        let w = world();
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert!(r.discover_tasks(&w).is_empty());
        assert_eq!(r.num_desired(&w), 0);
    }

    #[test]
    fn duplicate_markers_yield_one_task() {
        let mut w = world();
        w.place_marker("a", "W1", 10, 10);
        w.place_marker("b", "W1", 30, 12);
        w.place_marker("c", "W2", 5, 5);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.discover_tasks(&w), vec![ZoneId::new("W1"), ZoneId::new("W2")]);
    }

    #[test]
    fn owned_and_established_hostile_zones_are_excluded() {
        let mut w = world();
        w.add_zone("E1", ZoneControl::Hostile { established: true });
        w.add_zone("E2", ZoneControl::Hostile { established: false });
        w.place_marker("own", "H1", 1, 1);
        w.place_marker("enemy", "E1", 1, 1);
        w.place_marker("contested", "E2", 1, 1);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.discover_tasks(&w), vec![ZoneId::new("E2")]);
    }

    #[test]
    fn unobservable_zone_is_kept() {
        let mut w = world();
        w.place_marker("far", "W9", 20, 20);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.discover_tasks(&w), vec![ZoneId::new("W9")]);
    }

    #[test]
    fn other_signatures_are_ignored() {
        let mut w = world();
        w.place_marker_with("attack", "W1", 1, 1, ColorPair::new(MarkerColor::Red, MarkerColor::Red));
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert!(r.discover_tasks(&w).is_empty());
    }

    #[test]
    fn demand_per_flagged_zone() {
        let mut w = world();
        w.place_marker("a", "W1", 10, 10);
        w.place_marker("b", "W1", 11, 10);
        let mut r = Retrieval::new(RetrievalConfig { desired_per_marker: 2, ..Default::default() });
        r.begin_tick(1);
        assert_eq!(r.demand(&w, &ZoneId::new("W1")), 2);
        assert_eq!(r.demand(&w, &ZoneId::new("W2")), 0);
        assert_eq!(r.num_desired(&w), 2);
    }

    #[test]
    fn demand_is_memoized_within_a_tick() {
        let mut w = world();
        w.place_marker("a", "W1", 10, 10);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        let first = r.demand(&w, &ZoneId::new("W1"));
        let second = r.demand(&w, &ZoneId::new("W1"));
        assert_eq!(first, second);
        assert_eq!(w.marker_scans(), 1);

        r.begin_tick(2);
        r.demand(&w, &ZoneId::new("W1"));
        assert_eq!(w.marker_scans(), 2);
    }

    #[test]
    fn removed_marker_in_unobservable_zone_means_zero_demand() {
        let mut w = world();
        w.place_marker("far", "W9", 20, 20);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.demand(&w, &ZoneId::new("W9")), 1);

        w.remove_marker("far");
        r.begin_tick(2);
        assert_eq!(r.demand(&w, &ZoneId::new("W9")), 0);
        assert!(r.discover_tasks(&w).is_empty());
        assert_eq!(r.cache().persistent().demand(&ZoneId::new("W9")), Some(0));
    }

    #[test]
    fn limited_marker_source_falls_back_to_persistent_demand() {
        let mut w = world();
        w.add_zone("W9", ZoneControl::Uncontrolled);
        w.place_marker("far", "W9", 20, 20);
        w.set_lists_unobservable(false);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.demand(&w, &ZoneId::new("W9")), 1);

        w.add_zone("W9", ZoneControl::Unobservable);
        r.begin_tick(2);
        assert_eq!(r.demand(&w, &ZoneId::new("W9")), 1);
        assert_eq!(r.demand(&w, &ZoneId::new("W7")), 0);
        assert!(!r.cache().persistent().is_empty());
    }

    #[test]
    fn observable_zone_without_markers_refreshes_persistent_demand() {
        let mut w = world();
        w.place_marker("a", "W1", 10, 10);
        let mut r = Retrieval::default();
        r.begin_tick(1);
        assert_eq!(r.demand(&w, &ZoneId::new("W1")), 1);

        w.remove_marker("a");
        r.begin_tick(2);
        assert_eq!(r.demand(&w, &ZoneId::new("W1")), 0);
        assert_eq!(r.cache().persistent().demand(&ZoneId::new("W1")), Some(0));
    }
}
