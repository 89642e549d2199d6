//! The aggregation state machine.
//!
//! Category changes rebuild the filtered origin list and the slot map; search
//! changes and writes only re-derive the visible projection from the existing
//! slot map.

use std::time::Duration;

use rustc_hash::FxHashSet;
use stash_matcher::{Matcher, Query};
use stash_primitives::{CanStackRules, Container, ItemStack, add_to_container, can_stack_with};
use stash_registry::{ContainerRegistry, ContainerSource, OriginId, StorageOrigin};
use tracing::{debug, trace};

use crate::{AggregatorConfig, SlotError, SlotMap};


/// Outcome of one [`Aggregator::validate_and_refresh`] tick.
#[derive(Debug, Default)]
pub struct RefreshReport {
	/// Origins evicted from the registry during this tick.
	pub pruned: Vec<StorageOrigin>,
	/// Whether an evicted origin was part of the category filter, forcing a
	/// rebuild.
	pub rebuilt: bool,
	/// Whether the slot counters were recomputed.
	pub recounted: bool,
}

/// Builder for [`Aggregator`].
#[derive(Debug)]
pub struct AggregatorBuilder {
	registry: ContainerRegistry,
	config: AggregatorConfig,
	matcher: Matcher,
	category: Option<String>,
	search: String,
}

impl AggregatorBuilder {
	pub fn config(mut self, config: AggregatorConfig) -> Self {
		self.config = config;
		self
	}

	pub fn matcher(mut self, matcher: Matcher) -> Self {
		self.matcher = matcher;
		self
	}

	/// Initial category filter; `None` aggregates every origin.
	pub fn category(mut self, category: Option<String>) -> Self {
		self.category = category;
		self
	}

	pub fn search(mut self, search: impl Into<String>) -> Self {
		self.search = search.into();
		self
	}

	pub fn build(self) -> Aggregator {
		let query = Query::parse(&self.search);
		let mut aggregator = Aggregator {
			registry: self.registry,
			config: self.config,
			matcher: self.matcher,
			category: self.category,
			search: self.search,
			query,
			filtered: Vec::new(),
			filtered_ids: FxHashSet::default(),
			slots: SlotMap::default(),
			visible: SlotMap::default(),
			slot_shift: 0,
			total_slots: 0,
			occupied_slots: 0,
			countdown: 0.0,
			generation: 0,
		};
		aggregator.rebuild();
		aggregator
	}
}

/// Many containers presented as one filtered, sorted, index-addressable
/// inventory.
///
/// Every write is followed by a re-filter and re-sort before the call
/// returns, so the visible projection never shows a stale order.
#[derive(Debug)]
pub struct Aggregator {
	registry: ContainerRegistry,
	config: AggregatorConfig,
	matcher: Matcher,
	category: Option<String>,
	search: String,
	query: Query,
	/// Origins passing the category filter, in registration order.
	filtered: Vec<StorageOrigin>,
	filtered_ids: FxHashSet<OriginId>,
	/// Every slot of `filtered`, before search filtering.
	slots: SlotMap,
	visible: SlotMap,
	slot_shift: usize,
	total_slots: usize,
	occupied_slots: usize,
	/// Seconds until the next counter recount. Starts expired.
	countdown: f64,
	generation: u64,
}

impl Aggregator {
	pub fn builder(registry: ContainerRegistry) -> AggregatorBuilder {
		AggregatorBuilder {
			registry,
			config: AggregatorConfig::default(),
			matcher: Matcher::default(),
			category: None,
			search: String::new(),
		}
	}

	/// Aggregates every origin of `registry` with default settings.
	pub fn new(registry: ContainerRegistry) -> Self {
		Self::builder(registry).build()
	}

	/// Re-selects the origins passing the category filter and rebuilds the
	/// slot map and the visible projection.
	pub fn rebuild(&mut self) {
		let category = self.category.as_deref();
		let filtered: Vec<StorageOrigin> = self
			.registry
			.origins()
			.iter()
			.filter(|origin| category.is_none_or(|c| origin.category() == c))
			.cloned()
			.collect();
		self.filtered_ids = filtered.iter().map(StorageOrigin::id).collect();
		self.slots = SlotMap::rebuild(&filtered);
		self.filtered = filtered;
		debug!(
			category = self.category.as_deref().unwrap_or("*"),
			origins = self.filtered.len(),
			slots = self.slots.len(),
			"slot map rebuilt"
		);
		self.refresh();
	}

	/// Re-filters the slot map with the current query and re-sorts it into
	/// the visible projection.
	pub fn refresh(&mut self) {
		let mut visible = if self.query.is_empty() {
			self.slots.clone()
		} else {
			let (matcher, query) = (&self.matcher, &self.query);
			self.slots.filtered(|slot| matcher.matches(slot.get().as_ref(), query))
		};
		visible.sort();
		self.visible = visible;
		self.generation += 1;
		trace!(visible = self.visible.len(), generation = self.generation, "projection refreshed");
	}

	/// Reads visible slot `index + slot_shift`. Out-of-range reads are empty.
	pub fn index(&self, index: usize) -> Option<ItemStack> {
		self.visible.get(index.checked_add(self.slot_shift)?)
	}

	/// Writes visible slot `index + slot_shift`, then refreshes.
	///
	/// # Errors
	///
	/// Returns [`SlotError::OutOfRange`] if the shifted index is not a visible
	/// slot. Nothing is written in that case.
	pub fn index_set(&mut self, index: usize, item: Option<ItemStack>) -> Result<(), SlotError> {
		let slot = index
			.checked_add(self.slot_shift)
			.and_then(|shifted| self.visible.slot(shifted))
			.ok_or_else(|| SlotError::OutOfRange {
				index,
				shift: self.slot_shift,
				len: self.visible.len(),
			})?;
		slot.set(item);
		self.refresh();
		Ok(())
	}

	/// Scopes the aggregate to origins of `category`, or to every origin for
	/// `None`. Returns false if the filter was already in effect.
	pub fn apply_category_filter(&mut self, category: Option<&str>) -> bool {
		if self.category.as_deref() == category {
			return false;
		}
		self.category = category.map(str::to_owned);
		self.rebuild();
		true
	}

	/// Replaces the search query. Returns false if `text` is the current
	/// query text.
	pub fn apply_text_search(&mut self, text: &str) -> bool {
		if self.search == text {
			return false;
		}
		self.search = text.to_owned();
		self.query = Query::parse(text);
		debug!(search = text, predicates = self.query.predicates().len(), "search changed");
		self.refresh();
		true
	}

	/// Periodic housekeeping, driven by the host with the time elapsed since
	/// the previous call.
	///
	/// Prunes dead origins, rebuilds if one of them was in the category
	/// filter, and recounts the slot counters once the utilization interval
	/// has run out.
	pub fn validate_and_refresh(&mut self, elapsed: Duration) -> RefreshReport {
		let pruned = self.registry.prune();
		let rebuilt = pruned.iter().any(|origin| self.filtered_ids.contains(&origin.id()));
		if rebuilt {
			self.rebuild();
		}

		self.countdown -= elapsed.as_secs_f64();
		let recounted = self.countdown <= 0.0;
		if recounted {
			self.countdown = self.config.utilization_interval().as_secs_f64();
			self.total_slots = self.slots.len();
			self.occupied_slots = self.slots.occupied();
			trace!(total = self.total_slots, occupied = self.occupied_slots, "slot counters recounted");
		}

		RefreshReport {
			pruned,
			rebuilt,
			recounted,
		}
	}

	/// Inserts `item`, merging where possible, and returns the unconsumed
	/// remainder.
	///
	/// Placement order: the container under the preferred visible slot if its
	/// occupant stacks with `item`, then every filtered container already
	/// holding a matching stack, then every filtered container in
	/// registration order.
	pub fn upsert(&mut self, item: ItemStack, preferred: Option<usize>) -> Option<ItemStack> {
		if item.count == 0 {
			return None;
		}
		let mut changed = false;
		let rest = self.place(item, preferred, &mut changed);
		if changed {
			self.refresh();
		}
		rest
	}

	fn place(&self, mut item: ItemStack, preferred: Option<usize>, changed: &mut bool) -> Option<ItemStack> {
		let slot = preferred
			.and_then(|index| index.checked_add(self.slot_shift))
			.and_then(|shifted| self.visible.slot(shifted));
		if let Some(slot) = slot {
			let occupant = slot.get();
			if occupant.is_some_and(|target| can_stack_with(&item, &target, self.config.preferred_rules)) {
				trace!(origin = %slot.origin(), "merging into preferred slot");
				item = add_tracked(&mut *slot.container().lock(), item, changed)?;
			}
		}

		item = self.stack_into_existing(item, self.config.upsert_rules, changed)?;

		for origin in &self.filtered {
			item = add_tracked(&mut *origin.container().lock(), item, changed)?;
		}
		trace!(remaining = item.count, "upsert left a remainder");
		Some(item)
	}

	/// Merges `item` into filtered containers already holding a stack it can
	/// join under `rules`. Never opens a container that has no match.
	pub fn stack_with_existing(&mut self, item: ItemStack, rules: CanStackRules) -> Option<ItemStack> {
		let mut changed = false;
		let rest = self.stack_into_existing(item, rules, &mut changed);
		if changed {
			self.refresh();
		}
		rest
	}

	/// [`Self::stack_with_existing`] without the trailing refresh, for batch
	/// callers that refresh once at the end.
	pub(crate) fn stack_into_existing(
		&self,
		mut item: ItemStack,
		rules: CanStackRules,
		changed: &mut bool,
	) -> Option<ItemStack> {
		for origin in &self.filtered {
			let mut container = origin.container().lock();
			if holds_stackable(&*container, &item, rules) {
				trace!(origin = %origin.id(), "merging into container with a matching stack");
				item = add_tracked(&mut *container, item, changed)?;
			}
		}
		Some(item)
	}

	/// Highest visible index, ignoring the shift, that holds an item.
	pub fn last_occupied_index(&self) -> Option<usize> {
		self.visible.last_occupied()
	}

	/// Re-runs discovery and rebuilds everything. Origins get fresh ids.
	pub fn rediscover<S: ContainerSource + ?Sized>(&mut self, source: &S) {
		self.registry.build(|| source.discover());
		self.rebuild();
	}

	pub fn visible_count(&self) -> usize {
		self.visible.len()
	}

	/// Slot count of the category-scoped map at the last recount.
	pub fn total_slots(&self) -> usize {
		self.total_slots
	}

	/// Occupied slot count at the last recount.
	pub fn occupied_slots(&self) -> usize {
		self.occupied_slots
	}

	pub fn slot_shift(&self) -> usize {
		self.slot_shift
	}

	pub fn set_slot_shift(&mut self, shift: usize) {
		self.slot_shift = shift;
	}

	pub fn category(&self) -> Option<&str> {
		self.category.as_deref()
	}

	pub fn search_text(&self) -> &str {
		&self.search
	}

	/// Bumped every time the visible projection is re-derived.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn registry(&self) -> &ContainerRegistry {
		&self.registry
	}

	pub fn filtered_origins(&self) -> &[StorageOrigin] {
		&self.filtered
	}

	pub fn config(&self) -> &AggregatorConfig {
		&self.config
	}

	pub fn matcher(&self) -> &Matcher {
		&self.matcher
	}

	pub fn visible_slots(&self) -> &SlotMap {
		&self.visible
	}

	/// Every slot of the filtered origins, in build order.
	pub fn slots(&self) -> &SlotMap {
		&self.slots
	}
}

fn holds_stackable(container: &(dyn Container + Send), item: &ItemStack, rules: CanStackRules) -> bool {
	(0..container.item_count())
		.filter_map(|index| container.item_at(index))
		.any(|existing| can_stack_with(item, &existing, rules))
}

/// Native add that records whether the container took anything.
fn add_tracked(container: &mut (dyn Container + Send), item: ItemStack, changed: &mut bool) -> Option<ItemStack> {
	let before = item.count;
	let rest = add_to_container(container, item);
	if rest.as_ref().is_none_or(|rest| rest.count != before) {
		*changed = true;
	}
	rest
}
