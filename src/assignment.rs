use serde::{Deserialize, Serialize};

use crate::coords::ZoneId;
use crate::worker::WorkerId;

/// What the assignment step needs to know about an existing worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub worker: WorkerId,
    pub target_zone: Option<ZoneId>,
    pub ticks_to_live: u32,
    /// Already replaced; neither staffs its zone nor can be replaced again.
    pub relieved: bool,
}

impl PoolEntry {
    fn staffs(&self, zone: &ZoneId) -> bool {
        !self.relieved && self.target_zone.as_ref() == Some(zone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub zone: ZoneId,
    /// Worker whose slot the new worker takes over, on the fallback path.
    pub relieves: Option<WorkerId>,
}

/// Picks a task zone for a new worker.
///
/// The first zone in `tasks` order whose demand exceeds its staff wins. When
/// every zone is fully staffed, the slot of the staffing worker with the
/// fewest ticks to live is taken over instead; ties go to the earlier zone,
/// then to the earlier pool entry. `None` when `tasks` is empty or there is
/// no slot to take over.
pub fn assign_zone<F>(tasks: &[ZoneId], mut demand: F, pool: &[PoolEntry]) -> Option<Assignment>
where
    F: FnMut(&ZoneId) -> u32,
{
    let demands: Vec<u32> = tasks.iter().map(|zone| demand(zone)).collect();

    for (zone, &wanted) in tasks.iter().zip(&demands) {
        let staffed = pool.iter().filter(|e| e.staffs(zone)).count();
        if wanted as usize > staffed {
            return Some(Assignment { zone: zone.clone(), relieves: None });
        }
    }

    let mut best: Option<(&ZoneId, &PoolEntry)> = None;
    for (zone, &wanted) in tasks.iter().zip(&demands) {
        if wanted == 0 {
            continue;
        }
        for entry in pool.iter().filter(|e| e.staffs(zone)) {
            if best.is_none_or(|(_, b)| entry.ticks_to_live < b.ticks_to_live) {
                best = Some((zone, entry));
            }
        }
    }
    best.map(|(zone, entry)| Assignment { zone: zone.clone(), relieves: Some(entry.worker) })
}
