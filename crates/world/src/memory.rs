use serde::{Deserialize, Serialize};
use stash_primitives::{Container, ItemStack};

/// Slot count of a regular chest.
pub const CHEST_CAPACITY: usize = 36;

/// A chest backed by a plain vector.
///
/// Native add first tops up stacks of the same kind, quality and color, then
/// opens new stacks while fewer than `capacity` slots are occupied.
/// [`Container::organize`] drops empty entries and sorts by host order, so
/// items move between local indices on every accepted write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContainer {
	capacity: usize,
	items: Vec<Option<ItemStack>>,
}

impl Default for MemoryContainer {
	fn default() -> Self {
		Self::new(CHEST_CAPACITY)
	}
}

impl MemoryContainer {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			items: Vec::new(),
		}
	}

	/// Creates a container whose native list is exactly `items`.
	///
	/// The list may be longer than `capacity`.
	pub fn with_items(capacity: usize, items: impl IntoIterator<Item = Option<ItemStack>>) -> Self {
		Self {
			capacity,
			items: items.into_iter().collect(),
		}
	}

	pub fn items(&self) -> &[Option<ItemStack>] {
		&self.items
	}

	/// Number of non-empty entries.
	pub fn occupied(&self) -> usize {
		self.items.iter().flatten().count()
	}

	/// Total count of all stacks of the given kind.
	pub fn count_of(&self, name: &str) -> u32 {
		self.items.iter().flatten().filter(|i| i.name == name).map(|i| i.count).sum()
	}
}

impl Container for MemoryContainer {
	fn capacity(&self) -> usize {
		self.capacity
	}

	fn item_count(&self) -> usize {
		self.items.len()
	}

	fn item_at(&self, index: usize) -> Option<ItemStack> {
		self.items.get(index).cloned().flatten()
	}

	fn set_item_at(&mut self, index: usize, item: Option<ItemStack>) {
		if index >= self.items.len() {
			self.items.resize(index + 1, None);
		}
		self.items[index] = item;
	}

	fn add_item(&mut self, mut item: ItemStack) -> Option<ItemStack> {
		for existing in self.items.iter_mut().flatten() {
			if item.count == 0 {
				break;
			}
			if existing.same_kind(&item) && existing.quality == item.quality && existing.color == item.color {
				let moved = item.count.min(existing.space_left());
				existing.count += moved;
				item.count -= moved;
			}
		}

		while item.count > 0 && self.occupied() < self.capacity {
			let stack = item.split(item.max_stack.max(1));
			match self.items.iter_mut().find(|entry| entry.is_none()) {
				Some(entry) => *entry = Some(stack),
				None => self.items.push(Some(stack)),
			}
		}

		(item.count > 0).then_some(item)
	}

	fn organize(&mut self) {
		self.items.retain(Option::is_some);
		self.items.sort_by(|a, b| match (a, b) {
			(Some(a), Some(b)) => a.host_cmp(b),
			_ => std::cmp::Ordering::Equal,
		});
	}
}
