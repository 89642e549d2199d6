//! Virtual slots: a flat, index-addressable view over many containers.

use std::cmp::Ordering;
use std::fmt;

use stash_primitives::{ContainerHandle, ItemStack};
use stash_registry::{OriginId, StorageOrigin};

use crate::SlotError;


/// One addressable `(container, local index)` pair.
///
/// Holds no item: [`VirtualSlot::get`] and [`VirtualSlot::set`] always go
/// through the container.
#[derive(Clone)]
pub struct VirtualSlot {
	container: ContainerHandle,
	origin: OriginId,
	rank: usize,
	local: usize,
}

impl VirtualSlot {
	/// Reads the stack currently stored at this slot.
	pub fn get(&self) -> Option<ItemStack> {
		self.container.lock().item_at(self.local)
	}

	/// Writes this slot, then lets the container reorganize itself.
	///
	/// Afterwards the item may live at a different local index.
	pub fn set(&self, item: Option<ItemStack>) {
		let mut container = self.container.lock();
		container.set_item_at(self.local, item);
		container.organize();
	}

	pub fn container(&self) -> &ContainerHandle {
		&self.container
	}

	pub fn origin(&self) -> OriginId {
		self.origin
	}

	/// Position of the owning origin in the list the map was built from.
	pub fn container_rank(&self) -> usize {
		self.rank
	}

	pub fn local_index(&self) -> usize {
		self.local
	}

	/// Snapshot of the live ordering key.
	pub fn sort_key(&self) -> SlotKey {
		SlotKey {
			item: self.get(),
			rank: self.rank,
			local: self.local,
		}
	}
}

impl fmt::Debug for VirtualSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VirtualSlot")
			.field("origin", &self.origin)
			.field("rank", &self.rank)
			.field("local", &self.local)
			.finish()
	}
}

/// Ordering key of a slot: empty slots last, then host item order, then
/// container rank, then local index.
///
/// Two keys are equal only if they describe the same slot.
#[derive(Debug, Clone)]
pub struct SlotKey {
	pub item: Option<ItemStack>,
	pub rank: usize,
	pub local: usize,
}

impl Ord for SlotKey {
	fn cmp(&self, other: &Self) -> Ordering {
		let items = match (&self.item, &other.item) {
			(Some(a), Some(b)) => a.host_cmp(b),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		};
		items
			.then_with(|| self.rank.cmp(&other.rank))
			.then_with(|| self.local.cmp(&other.local))
	}
}

impl PartialOrd for SlotKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for SlotKey {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for SlotKey {}

/// Ordered sequence of virtual slots.
#[derive(Debug, Clone, Default)]
pub struct SlotMap {
	slots: Vec<VirtualSlot>,
}

impl SlotMap {
	/// Emits `max(capacity, item_count)` slots per origin, in origin order
	/// and local-index order, ranking each by its origin's position.
	pub fn rebuild(origins: &[StorageOrigin]) -> Self {
		let mut slots = Vec::new();
		for (rank, origin) in origins.iter().enumerate() {
			let len = {
				let container = origin.container().lock();
				container.capacity().max(container.item_count())
			};
			slots.extend((0..len).map(|local| VirtualSlot {
				container: origin.container().clone(),
				origin: origin.id(),
				rank,
				local,
			}));
		}
		Self { slots }
	}

	/// Reads slot `index`; out-of-range reads are empty.
	pub fn get(&self, index: usize) -> Option<ItemStack> {
		self.slots.get(index)?.get()
	}

	/// Writes slot `index`.
	pub fn set(&self, index: usize, item: Option<ItemStack>) -> Result<(), SlotError> {
		let slot = self.slots.get(index).ok_or(SlotError::OutOfRange {
			index,
			shift: 0,
			len: self.slots.len(),
		})?;
		slot.set(item);
		Ok(())
	}

	pub fn slot(&self, index: usize) -> Option<&VirtualSlot> {
		self.slots.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, VirtualSlot> {
		self.slots.iter()
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Counts non-empty slots with a full scan.
	pub fn occupied(&self) -> usize {
		self.slots.iter().filter(|slot| slot.get().is_some()).count()
	}

	/// Highest index holding an item.
	pub fn last_occupied(&self) -> Option<usize> {
		self.slots.iter().rposition(|slot| slot.get().is_some())
	}

	/// Returns true if any slot belongs to `origin`.
	pub fn references(&self, origin: OriginId) -> bool {
		self.slots.iter().any(|slot| slot.origin == origin)
	}

	/// Copies the slots accepted by `keep`, preserving order.
	pub fn filtered(&self, mut keep: impl FnMut(&VirtualSlot) -> bool) -> Self {
		Self {
			slots: self.slots.iter().filter(|&slot| keep(slot)).cloned().collect(),
		}
	}

	/// Sorts by each slot's live [`SlotKey`], read once per slot.
	pub fn sort(&mut self) {
		self.slots.sort_by_cached_key(VirtualSlot::sort_key);
	}
}

impl<'a> IntoIterator for &'a SlotMap {
	type Item = &'a VirtualSlot;
	type IntoIter = std::slice::Iter<'a, VirtualSlot>;

	fn into_iter(self) -> Self::IntoIter {
		self.slots.iter()
	}
}
