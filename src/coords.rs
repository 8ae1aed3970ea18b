use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a zone, e.g. `W1N1`. Coordinates alone identify a zone, so an id
/// is valid whether or not the zone is currently observable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub zone: ZoneId,
    pub x: i32,
    pub y: i32,
}

impl WorldPos {
    pub fn new(zone: impl Into<ZoneId>, x: i32, y: i32) -> Self {
        Self { zone: zone.into(), x, y }
    }
}
