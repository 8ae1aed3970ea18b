use serde::{Deserialize, Serialize};

use crate::config::{MAX_BODY_PARTS, RetrievalConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
	Carry,
	Move,
}

/// Largest body affordable from `energy_capacity`: as many copies of the
/// configured group as fit, capped at `max_groups`. Empty when not even one
/// group is affordable; callers must not spawn in that case. Never longer
/// than `MAX_BODY_PARTS`, even for an unvalidated config.
pub fn plan_body(config: &RetrievalConfig, energy_capacity: u32) -> Vec<PartKind> {
	if config.group_price == 0 || config.body_group.is_empty() {
		return Vec::new();
	}
	let affordable = (energy_capacity / config.group_price).min(config.max_groups) as usize;
	let groups = affordable.min(MAX_BODY_PARTS / config.body_group.len());
	let mut body = Vec::with_capacity(groups * config.body_group.len());
	for _ in 0..groups {
		body.extend_from_slice(&config.body_group);
	}
	body
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn three_groups_at_450() {
		let body = plan_body(&RetrievalConfig::default(), 450);
		assert_eq!(body.len(), 9);
		for chunk in body.chunks(3) {
			assert_eq!(chunk, &[PartKind::Carry, PartKind::Carry, PartKind::Move]);
		}
	}

	#[test]
	fn zero_capacity_is_empty() {
		assert!(plan_body(&RetrievalConfig::default(), 0).is_empty());
		assert!(plan_body(&RetrievalConfig::default(), 149).is_empty());
	}

	#[test]
	fn capped_at_max_groups() {
		let body = plan_body(&RetrievalConfig::default(), 100_000);
		assert_eq!(body.len(), 16 * 3);
	}

	#[test]
	fn unvalidated_huge_group_count_stays_bounded() {
		let config = RetrievalConfig { group_price: 1, max_groups: u32::MAX, ..Default::default() };
		let body = plan_body(&config, u32::MAX);
		assert_eq!(body.len(), 48);
	}

	#[test]
	fn partial_group_rounds_down() {
		assert_eq!(plan_body(&RetrievalConfig::default(), 299).len(), 3);
	}
}
