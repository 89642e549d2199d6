use std::time::Duration;

use serde::{Deserialize, Serialize};
use stash_primitives::CanStackRules;

/// Seconds between two recounts of the total and occupied slot counters.
pub const DEFAULT_UTILIZATION_INTERVAL_SECS: f64 = 0.6;

/// Tunables of the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
	/// Throttle for the full-scan slot counters.
	pub utilization_interval_secs: f64,
	/// Rules for merging into the stack under a preferred slot.
	pub preferred_rules: CanStackRules,
	/// Rules for picking a container that already holds the incoming kind.
	pub upsert_rules: CanStackRules,
	/// Rules for a regular quick-stack.
	pub quick_stack_rules: CanStackRules,
	/// Rules for a loose quick-stack, ignoring quality and color.
	pub loose_quick_stack_rules: CanStackRules,
}

impl Default for AggregatorConfig {
	fn default() -> Self {
		Self {
			utilization_interval_secs: DEFAULT_UTILIZATION_INTERVAL_SECS,
			preferred_rules: CanStackRules::IGNORE_STACK_SIZE,
			upsert_rules: CanStackRules::ITEM_ONLY,
			quick_stack_rules: CanStackRules::IGNORE_STACK_SIZE,
			loose_quick_stack_rules: CanStackRules::ITEM_ONLY,
		}
	}
}

impl AggregatorConfig {
	pub fn utilization_interval(&self) -> Duration {
		Duration::from_secs_f64(self.utilization_interval_secs.max(0.0))
	}
}
