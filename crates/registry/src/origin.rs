use std::fmt;
use std::sync::Arc;

use stash_primitives::ContainerHandle;

/// Liveness check supplied by the host for one container.
pub type Liveness = Arc<dyn Fn() -> bool + Send + Sync>;

/// Identity of one registered origin instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OriginId(pub(crate) u64);

impl OriginId {
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for OriginId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "origin#{}", self.0)
	}
}

/// One container as reported by discovery.
pub struct Discovered {
	pub container: ContainerHandle,
	pub category: String,
	pub is_valid: Liveness,
}

impl Discovered {
	pub fn new(
		container: ContainerHandle,
		category: impl Into<String>,
		is_valid: impl Fn() -> bool + Send + Sync + 'static,
	) -> Self {
		Self {
			container,
			category: category.into(),
			is_valid: Arc::new(is_valid),
		}
	}

	/// A container that never becomes invalid.
	pub fn always_valid(container: ContainerHandle, category: impl Into<String>) -> Self {
		Self::new(container, category, || true)
	}
}

impl fmt::Debug for Discovered {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Discovered")
			.field("container", &self.container)
			.field("category", &self.category)
			.finish_non_exhaustive()
	}
}

/// A registered container with its category label and liveness check.
#[derive(Clone)]
pub struct StorageOrigin {
	id: OriginId,
	container: ContainerHandle,
	category: Arc<str>,
	is_valid: Liveness,
}

impl StorageOrigin {
	pub(crate) fn new(id: OriginId, discovered: Discovered) -> Self {
		Self {
			id,
			container: discovered.container,
			category: discovered.category.into(),
			is_valid: discovered.is_valid,
		}
	}

	pub fn id(&self) -> OriginId {
		self.id
	}

	pub fn container(&self) -> &ContainerHandle {
		&self.container
	}

	pub fn category(&self) -> &str {
		&self.category
	}

	/// Re-runs the host's liveness check. Never cached.
	pub fn is_valid(&self) -> bool {
		(self.is_valid)()
	}
}

impl fmt::Debug for StorageOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StorageOrigin")
			.field("id", &self.id)
			.field("category", &self.category)
			.field("container", &self.container)
			.finish_non_exhaustive()
	}
}

impl PartialEq for StorageOrigin {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for StorageOrigin {}
