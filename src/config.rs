//! Tunables for remote retrieval.

use serde::Deserialize;

use crate::body::PartKind;
use crate::error::{Result, RetrievalError};
use crate::facility::{DEPOSIT_STRUCTURES, FacilityKind, LOAD_PRIORITY, RELOAD_PRIORITY};
use crate::markers::{ColorPair, REMOTE_RETRIEVAL_COLORS};

/// Workers wanted per zone carrying at least one retrieval marker.
pub const NUM_DESIRED_PER_FLAG: u32 = 1;

/// Largest body a worker can have.
pub const MAX_BODY_PARTS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Demand reported for a zone with at least one active marker.
    pub desired_per_marker: u32,
    pub marker_colors: ColorPair,

    /// Repeating unit of a worker body and its energy price.
    pub body_group: Vec<PartKind>,
    pub group_price: u32,
    pub max_groups: u32,

    pub reload_priority: Vec<FacilityKind>,
    pub load_priority: Vec<FacilityKind>,
    /// Powered structures tried after storage and containers.
    pub deposit_structures: Vec<FacilityKind>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            desired_per_marker: NUM_DESIRED_PER_FLAG,
            marker_colors: REMOTE_RETRIEVAL_COLORS,
            body_group: vec![PartKind::Carry, PartKind::Carry, PartKind::Move],
            group_price: 150,
            max_groups: 16,
            reload_priority: RELOAD_PRIORITY.to_vec(),
            load_priority: LOAD_PRIORITY.to_vec(),
            deposit_structures: DEPOSIT_STRUCTURES.to_vec(),
        }
    }
}

impl RetrievalConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.group_price == 0 {
            return Err(RetrievalError::InvalidConfig("group_price must be positive".into()));
        }
        if self.max_groups == 0 {
            return Err(RetrievalError::InvalidConfig("max_groups must be positive".into()));
        }
        if self.body_group.is_empty() {
            return Err(RetrievalError::InvalidConfig("body_group is empty".into()));
        }
        if (self.max_groups as usize).saturating_mul(self.body_group.len()) > MAX_BODY_PARTS {
            return Err(RetrievalError::InvalidConfig(format!(
                "max_groups {} exceeds {} body parts",
                self.max_groups, MAX_BODY_PARTS
            )));
        }
        Ok(())
    }
}
