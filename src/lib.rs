pub mod assignment;
pub mod body;
pub mod cache;
pub mod cargo;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod facility;
pub mod lifecycle;
pub mod markers;
pub mod retrieval;
pub mod sim;
pub mod tasks;
pub mod worker;
pub mod world;

// Re-exports for convenience in tests and integration users.
pub use assignment::{Assignment, PoolEntry, assign_zone};
pub use body::{PartKind, plan_body};
pub use cache::{DemandCache, PersistentCache};
pub use cargo::Cargo;
pub use config::{NUM_DESIRED_PER_FLAG, RetrievalConfig};
pub use coords::{WorldPos, ZoneId};
pub use engine::Engine;
pub use error::{Result, RetrievalError};
pub use facility::FacilityKind;
pub use lifecycle::TickReport;
pub use markers::{ColorPair, Marker, MarkerColor, MarkerSource, REMOTE_RETRIEVAL_COLORS};
pub use retrieval::Retrieval;
pub use sim::{Facility, SimWorld};
pub use tasks::Task;
pub use worker::{Phase, Worker, WorkerId};
pub use world::{ActionResult, MoveResult, Retreat, WorkerActions, World, ZoneControl, ZoneIntel};
