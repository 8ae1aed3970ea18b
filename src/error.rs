use thiserror::Error;

use crate::coords::ZoneId;
use crate::worker::WorkerId;

#[derive(Debug, Error)]
pub enum RetrievalError {
	#[error("Config parse error: {0}")]
	Config(#[from] serde_json::Error),
	#[error("Invalid config: {0}")]
	InvalidConfig(String),
	#[error("Worker {worker} found no zone with storage or spawn reachable from {zone}")]
	NoReturnZone { worker: WorkerId, zone: ZoneId },
	#[error("Unknown worker: {0}")]
	UnknownWorker(WorkerId),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
