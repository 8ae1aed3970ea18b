use crate::assignment::PoolEntry;
use crate::lifecycle::TickReport;
use crate::retrieval::Retrieval;
use crate::worker::Worker;
use crate::world::World;

/// Roster of retrieval workers plus the shared retrieval state.
#[derive(Debug, Default)]
pub struct Engine {
	pub retrieval: Retrieval,
	pub workers: Vec<Worker>,
	tick: u64,
}

impl Engine {
	pub fn new(retrieval: Retrieval, workers: Vec<Worker>) -> Self {
		Self { retrieval, workers, tick: 0 }
	}

	pub fn current_tick(&self) -> u64 {
		self.tick
	}

	// Processes a single tick:
	// - Clear the tick cache before any worker runs
	// - Run every worker once, in roster order
	// - Mark workers whose slot was taken over as relieved
	pub fn tick<W: World>(&mut self, world: &mut W) -> Vec<TickReport> {
		self.tick += 1;
		self.retrieval.begin_tick(self.tick);

		let mut reports = Vec::with_capacity(self.workers.len());
		for idx in 0..self.workers.len() {
			let pool = self.pool(&*world, idx);
			let report = self.retrieval.run(world, &mut self.workers[idx], &pool);
			if let Some(old) = report.relieved {
				if let Some(w) = self.workers.iter_mut().find(|w| w.id() == old) {
					w.relieve();
				}
			}
			reports.push(report);
		}
		reports
	}

	/// Drops records of workers the world no longer knows.
	pub fn prune<W: World>(&mut self, world: &W) {
		self.workers.retain(|w| world.worker_zone(w.id()).is_some());
	}

	fn pool<W: World>(&self, world: &W, skip: usize) -> Vec<PoolEntry> {
		self.workers
			.iter()
			.enumerate()
			.filter(|(i, w)| *i != skip && w.is_initialized())
			.filter_map(|(_, w)| {
				let ticks_to_live = world.ticks_to_live(w.id())?;
				Some(PoolEntry {
					worker: w.id(),
					target_zone: w.target_zone().cloned(),
					ticks_to_live,
					relieved: w.is_relieved(),
				})
			})
			.collect()
	}
}
