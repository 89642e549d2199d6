//! Application-side session around an [`Aggregator`].
//!
//! State that must survive closing and reopening the aggregate view lives in
//! [`SessionState`], owned by the caller and handed back on every open.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stash_matcher::Matcher;
use stash_primitives::{CanStackRules, ItemStack};
use stash_registry::ContainerRegistry;
use tracing::{debug, warn};

use crate::{Aggregator, AggregatorConfig, RefreshReport, SlotError};

#[cfg(test)]
mod tests;

/// Label of the choice that clears the category filter.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Category labels longer than this are cut for display.
pub const CATEGORY_LABEL_MAX_CHARS: usize = 26;

/// Long-lived state recalled across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
	/// Category selected when the last session closed.
	pub last_category: Option<String>,
}

/// One entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
	pub label: String,
	/// Filter value; `None` selects every origin.
	pub value: Option<String>,
}

/// Which stack rules a quick-stack uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickStackMode {
	/// Quality and color must match.
	#[default]
	Strict,
	/// Kind identity only.
	Loose,
}

/// Result of [`Session::quick_stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuickStackReport {
	/// Source slots that gave at least one item.
	pub moved_slots: usize,
	/// Source slots that were fully consumed and are now empty.
	pub emptied_slots: usize,
}

/// Slot usage derived from the throttled aggregator counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
	pub total: usize,
	pub occupied: usize,
	pub free: usize,
	/// Occupied share in percent, rounded to one decimal.
	pub percent: f64,
}

impl Utilization {
	fn new(total: usize, occupied: usize) -> Self {
		let percent = if total == 0 {
			0.0
		} else {
			(occupied as f64 * 1000.0 / total as f64).round() / 10.0
		};
		Self {
			total,
			occupied,
			free: total.saturating_sub(occupied),
			percent,
		}
	}
}

/// An open aggregate view plus the state it will hand back on close.
#[derive(Debug)]
pub struct Session {
	aggregator: Aggregator,
	state: SessionState,
}

impl Session {
	/// Opens a view over `registry`, restoring the recalled category if an
	/// origin still carries it.
	pub fn open(state: SessionState, registry: ContainerRegistry, config: AggregatorConfig, matcher: Matcher) -> Self {
		let category = state
			.last_category
			.clone()
			.filter(|recalled| registry.categories().contains(&recalled.as_str()));
		if category.is_none() && state.last_category.is_some() {
			debug!(recalled = ?state.last_category, "recalled category no longer exists");
		}
		let aggregator = Aggregator::builder(registry)
			.config(config)
			.matcher(matcher)
			.category(category)
			.build();
		Self { aggregator, state }
	}

	/// Applies a category filter and remembers it for the next session.
	pub fn select_category(&mut self, category: Option<&str>) -> bool {
		self.state.last_category = category.map(str::to_owned);
		self.aggregator.apply_category_filter(category)
	}

	/// "All Categories" followed by every distinct origin category.
	pub fn category_choices(&self) -> Vec<CategoryChoice> {
		let all = CategoryChoice {
			label: ALL_CATEGORIES_LABEL.to_string(),
			value: None,
		};
		let categories = self
			.aggregator
			.registry()
			.categories()
			.into_iter()
			.filter(|category| !category.is_empty())
			.map(|category| CategoryChoice {
				label: category.chars().take(CATEGORY_LABEL_MAX_CHARS).collect(),
				value: Some(category.to_string()),
			});
		std::iter::once(all).chain(categories).collect()
	}

	pub fn search(&mut self, text: &str) -> bool {
		self.aggregator.apply_text_search(text)
	}

	/// Moves a stack from an external source into the aggregate and returns
	/// what did not fit.
	pub fn deposit(&mut self, item: ItemStack, preferred: Option<usize>) -> Option<ItemStack> {
		self.aggregator.upsert(item, preferred)
	}

	/// Takes the whole stack under visible slot `index`.
	pub fn withdraw(&mut self, index: usize) -> Result<Option<ItemStack>, SlotError> {
		let taken = self.aggregator.index(index);
		self.aggregator.index_set(index, None)?;
		Ok(taken)
	}

	/// Pushes every stack of `inventory` into matching stacks already in the
	/// aggregate. Never opens new stacks.
	///
	/// Fully consumed source slots are cleared, partially consumed ones keep
	/// the remainder.
	pub fn quick_stack(&mut self, inventory: &mut [Option<ItemStack>], mode: QuickStackMode) -> QuickStackReport {
		let rules = self.quick_stack_rules(mode);
		let mut report = QuickStackReport::default();
		let mut changed = false;
		for entry in inventory.iter_mut() {
			let Some(item) = entry.take() else {
				continue;
			};
			let before = item.count;
			let rest = self.aggregator.stack_into_existing(item, rules, &mut changed);
			match &rest {
				None => {
					report.moved_slots += 1;
					report.emptied_slots += 1;
				}
				Some(rest) if rest.count != before => report.moved_slots += 1,
				Some(_) => {}
			}
			*entry = rest;
		}
		if changed {
			self.aggregator.refresh();
		}
		debug!(moved = report.moved_slots, emptied = report.emptied_slots, ?mode, "quick stack");
		report
	}

	fn quick_stack_rules(&self, mode: QuickStackMode) -> CanStackRules {
		let config = self.aggregator.config();
		match mode {
			QuickStackMode::Strict => config.quick_stack_rules,
			QuickStackMode::Loose => config.loose_quick_stack_rules,
		}
	}

	/// Host tick. Evicted origins are reported here since the core evicts
	/// them silently.
	pub fn tick(&mut self, elapsed: Duration) -> RefreshReport {
		let report = self.aggregator.validate_and_refresh(elapsed);
		for origin in &report.pruned {
			warn!(origin = %origin.id(), category = origin.category(), "storage container disappeared");
		}
		report
	}

	pub fn utilization(&self) -> Utilization {
		Utilization::new(self.aggregator.total_slots(), self.aggregator.occupied_slots())
	}

	pub fn aggregator(&self) -> &Aggregator {
		&self.aggregator
	}

	pub fn aggregator_mut(&mut self) -> &mut Aggregator {
		&mut self.aggregator
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	/// Ends the session and returns the state to recall next time.
	pub fn close(self) -> SessionState {
		self.state
	}
}
