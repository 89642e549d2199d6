use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::ItemStack;

/// An ordered list of optional item stacks owned by the host.
///
/// The aggregation engine only ever addresses a container by local index and
/// re-reads it on every access: hosts are free to compact or reorder their
/// list whenever it is mutated.
pub trait Container {
	/// Declared number of slots.
	fn capacity(&self) -> usize;

	/// Current length of the native item list, including empty entries.
	///
	/// May exceed [`Container::capacity`] when the host has overfilled it.
	fn item_count(&self) -> usize;

	/// Returns a copy of the stack at `index`, or `None` for empty or
	/// out-of-range slots.
	fn item_at(&self, index: usize) -> Option<ItemStack>;

	/// Replaces the slot at `index`.
	///
	/// Indices past the end of the native list must extend it with empty
	/// entries first.
	fn set_item_at(&mut self, index: usize, item: Option<ItemStack>);

	/// Native insert: merges into existing stacks and opens new ones as the
	/// host sees fit, returning whatever it could not take.
	fn add_item(&mut self, item: ItemStack) -> Option<ItemStack>;

	/// Compacts and sorts the native list.
	fn organize(&mut self) {}
}

/// Shared reference to a host container.
///
/// The engine never owns containers; it holds handles whose liveness is
/// checked separately by the registry.
#[derive(Clone)]
pub struct ContainerHandle(Arc<Mutex<dyn Container + Send>>);

impl ContainerHandle {
	/// Wraps a container in a fresh handle.
	pub fn new<C: Container + Send + 'static>(container: C) -> Self {
		Self(Arc::new(Mutex::new(container)))
	}

	/// Wraps an already shared container, keeping the caller's typed access.
	pub fn from_shared<C: Container + Send + 'static>(shared: Arc<Mutex<C>>) -> Self {
		Self(shared)
	}

	pub fn lock(&self) -> MutexGuard<'_, dyn Container + Send> {
		self.0.lock()
	}

	/// Returns true if both handles point at the same container.
	pub fn same_container(&self, other: &Self) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
	}
}

impl fmt::Debug for ContainerHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ContainerHandle")
			.field(&Arc::as_ptr(&self.0).cast::<()>())
			.finish()
	}
}

/// Performs the container-native add and reorganizes the container if
/// anything was taken.
///
/// Returns the unconsumed remainder, or `None` when the stack was fully placed.
pub fn add_to_container(container: &mut (dyn Container + Send), item: ItemStack) -> Option<ItemStack> {
	let before = item.count;
	let remainder = container.add_item(item);
	let changed = match &remainder {
		None => true,
		Some(rest) => rest.count != before,
	};
	if changed {
		container.organize();
	}
	remainder
}
