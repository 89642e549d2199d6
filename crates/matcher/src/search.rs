use std::fmt;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use stash_primitives::{ItemId, ItemStack};

use crate::{BuffTable, LookupError, NoBuffs, Predicate, Query};

/// Evaluates queries against items, caching buff lookups per item kind.
pub struct Matcher {
	table: Box<dyn BuffTable>,
	cache: Mutex<FxHashMap<ItemId, Option<Vec<i32>>>>,
}

impl Default for Matcher {
	fn default() -> Self {
		Self::new(NoBuffs)
	}
}

impl fmt::Debug for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Matcher")
			.field("cached_kinds", &self.cached_kinds())
			.finish_non_exhaustive()
	}
}

impl Matcher {
	pub fn new(table: impl BuffTable + 'static) -> Self {
		Self {
			table: Box::new(table),
			cache: Mutex::new(FxHashMap::default()),
		}
	}

	/// Returns true if `item` satisfies every predicate of `query`.
	///
	/// Empty slots only match the empty query.
	pub fn matches(&self, item: Option<&ItemStack>, query: &Query) -> bool {
		if query.is_empty() {
			return true;
		}
		let Some(item) = item else {
			return false;
		};
		query.predicates().iter().all(|predicate| self.matches_predicate(item, predicate))
	}

	/// Evaluates a single predicate.
	pub fn matches_predicate(&self, item: &ItemStack, predicate: &Predicate) -> bool {
		match predicate {
			Predicate::Text(term) => {
				item.display_name().to_lowercase().contains(term.as_str())
					|| item.description.to_lowercase().contains(term.as_str())
			}
			Predicate::Category(term) => match item.category.as_deref().filter(|c| !c.is_empty()) {
				None => term.is_empty(),
				Some(category) => !term.is_empty() && category.to_lowercase().contains(term.as_str()),
			},
			Predicate::Buff(term) => self.matches_buff(item, term),
			Predicate::Quality(quality) => *quality == Some(item.quality),
		}
	}

	fn matches_buff(&self, item: &ItemStack, term: &str) -> bool {
		if !item.edibility.is_edible() {
			return false;
		}

		let buffs = match self.buffs(item) {
			Ok(Some(buffs)) => buffs,
			Ok(None) => return false,
			Err(error) => {
				tracing::trace!(item = %item.id, %error, "buff lookup failed; treating as no match");
				return false;
			}
		};

		buffs
			.iter()
			.enumerate()
			.filter(|(_, power)| **power != 0)
			.filter_map(|(slot, _)| self.table.buff_description(slot))
			.any(|description| description.to_lowercase().contains(term))
	}

	/// Returns the buff magnitudes of an item: the cached baseline of its kind
	/// plus item-specific adjustments.
	///
	/// Every call returns a fresh copy; the cache itself is never exposed.
	pub fn buffs(&self, item: &ItemStack) -> Result<Option<Vec<i32>>, LookupError> {
		let baseline = self.baseline(item.id)?;
		Ok(baseline.map(|mut buffs| {
			self.table.adjust_buffs(item, &mut buffs);
			buffs
		}))
	}

	fn baseline(&self, id: ItemId) -> Result<Option<Vec<i32>>, LookupError> {
		if let Some(cached) = self.cache.lock().get(&id) {
			return Ok(cached.clone());
		}
		let buffs = self.table.baseline_buffs(id)?;
		self.cache.lock().insert(id, buffs.clone());
		Ok(buffs)
	}

	/// Number of item kinds with a cached baseline.
	pub fn cached_kinds(&self) -> usize {
		self.cache.lock().len()
	}

	pub fn clear_cache(&self) {
		self.cache.lock().clear();
	}
}
