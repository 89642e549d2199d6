use indexmap::IndexSet;

use crate::{Discovered, OriginId, StorageOrigin};


/// Host-world walker producing the containers to aggregate.
pub trait ContainerSource {
	fn discover(&self) -> Vec<Discovered>;
}

impl<F> ContainerSource for F
where
	F: Fn() -> Vec<Discovered>,
{
	fn discover(&self) -> Vec<Discovered> {
		self()
	}
}

/// Ordered list of live storage origins.
///
/// Registration order is significant: it is the container rank used to
/// break ties when slots are sorted.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
	origins: Vec<StorageOrigin>,
	next_id: u64,
}

impl ContainerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry populated from `source`.
	pub fn from_source<S: ContainerSource + ?Sized>(source: &S) -> Self {
		let mut registry = Self::new();
		registry.build(|| source.discover());
		registry
	}

	/// Replaces the origin list with freshly discovered containers.
	///
	/// Containers whose liveness check already fails are skipped. Every
	/// registered origin receives a new id, even if its container was
	/// registered before. Returns the number of registered origins.
	pub fn build<I, F>(&mut self, discover: F) -> usize
	where
		F: FnOnce() -> I,
		I: IntoIterator<Item = Discovered>,
	{
		self.origins.clear();
		for discovered in discover() {
			if !(discovered.is_valid)() {
				tracing::warn!(
					category = %discovered.category,
					container = ?discovered.container,
					"invalid container found during discovery, skipping"
				);
				continue;
			}
			let id = OriginId(self.next_id);
			self.next_id += 1;
			self.origins.push(StorageOrigin::new(id, discovered));
		}
		tracing::debug!(origins = self.origins.len(), "container registry built");
		self.origins.len()
	}

	/// Evicts every origin whose liveness check now fails and returns them.
	pub fn prune(&mut self) -> Vec<StorageOrigin> {
		let (kept, removed): (Vec<_>, Vec<_>) =
			std::mem::take(&mut self.origins).into_iter().partition(StorageOrigin::is_valid);
		self.origins = kept;
		for origin in &removed {
			tracing::debug!(origin = %origin.id(), category = origin.category(), "origin evicted");
		}
		removed
	}

	pub fn origins(&self) -> &[StorageOrigin] {
		&self.origins
	}

	pub fn get(&self, id: OriginId) -> Option<&StorageOrigin> {
		self.origins.iter().find(|o| o.id() == id)
	}

	pub fn len(&self) -> usize {
		self.origins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.origins.is_empty()
	}

	/// Distinct origin categories in first-registered order.
	pub fn categories(&self) -> Vec<&str> {
		self.origins
			.iter()
			.map(StorageOrigin::category)
			.collect::<IndexSet<_>>()
			.into_iter()
			.collect()
	}
}
