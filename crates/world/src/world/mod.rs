use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use stash_primitives::{ContainerHandle, ItemStack};
use stash_registry::{ContainerSource, Discovered};

use crate::MemoryContainer;


/// A chest shared between the world and the engine.
pub type SharedChest = Arc<Mutex<MemoryContainer>>;

/// Tile coordinates inside a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tile {
	pub x: i32,
	pub y: i32,
}

impl Tile {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// A chest placed on a tile, with an optional player-assigned category.
#[derive(Debug, Clone)]
pub struct PlacedChest {
	pub chest: SharedChest,
	pub category: Option<String>,
}

type Placements = Arc<RwLock<IndexMap<Tile, PlacedChest>>>;

/// A named map area holding placed chests and at most one fridge.
#[derive(Debug, Default)]
pub struct Location {
	name: String,
	cabin_owner: Option<String>,
	placed: Placements,
	fridge: Arc<RwLock<Option<SharedChest>>>,
}

impl Location {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Marks this location as a cabin owned by `owner`.
	pub fn cabin_of(mut self, owner: impl Into<String>) -> Self {
		self.cabin_owner = Some(owner.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn cabin_owner(&self) -> Option<&str> {
		self.cabin_owner.as_deref()
	}

	/// Category given to containers without an explicit one.
	pub fn default_category(&self) -> String {
		match &self.cabin_owner {
			Some(owner) => format!("{} ({owner})", self.name),
			None => self.name.clone(),
		}
	}

	/// Places `chest` on `tile`, replacing whatever stood there.
	pub fn place_chest(&self, tile: Tile, chest: MemoryContainer, category: Option<String>) -> SharedChest {
		let chest = Arc::new(Mutex::new(chest));
		self.placed.write().insert(
			tile,
			PlacedChest {
				chest: Arc::clone(&chest),
				category,
			},
		);
		chest
	}

	/// Picks up the chest on `tile`.
	pub fn remove_chest(&self, tile: Tile) -> Option<PlacedChest> {
		self.placed.write().shift_remove(&tile)
	}

	pub fn chest_at(&self, tile: Tile) -> Option<SharedChest> {
		self.placed.read().get(&tile).map(|placed| Arc::clone(&placed.chest))
	}

	pub fn set_fridge(&self, fridge: MemoryContainer) -> SharedChest {
		let fridge = Arc::new(Mutex::new(fridge));
		*self.fridge.write() = Some(Arc::clone(&fridge));
		fridge
	}

	pub fn remove_fridge(&self) -> Option<SharedChest> {
		self.fridge.write().take()
	}

	pub fn fridge(&self) -> Option<SharedChest> {
		self.fridge.read().clone()
	}

	/// Containers in this location: placed chests in placement order, then
	/// the fridge.
	///
	/// A chest stays valid while it is still the object on its tile; the
	/// fridge stays valid while it is still this location's fridge.
	pub fn discover(&self) -> Vec<Discovered> {
		let fallback = self.default_category();
		let mut found: Vec<Discovered> = self
			.placed
			.read()
			.iter()
			.map(|(&tile, placed)| {
				let category = placed
					.category
					.clone()
					.filter(|c| !c.is_empty())
					.unwrap_or_else(|| fallback.clone());
				let placements = Arc::clone(&self.placed);
				let chest = Arc::clone(&placed.chest);
				Discovered::new(ContainerHandle::from_shared(Arc::clone(&chest)), category, move || {
					placements
						.read()
						.get(&tile)
						.is_some_and(|now| Arc::ptr_eq(&now.chest, &chest))
				})
			})
			.collect();

		if let Some(fridge) = self.fridge() {
			let slot = Arc::clone(&self.fridge);
			let handle = ContainerHandle::from_shared(Arc::clone(&fridge));
			found.push(Discovered::new(handle, fallback, move || {
				slot.read().as_ref().is_some_and(|now| Arc::ptr_eq(now, &fridge))
			}));
		}
		found
	}
}

/// Every location of the host world plus its item catalog.
#[derive(Debug, Default)]
pub struct World {
	locations: Vec<Location>,
	catalog: Vec<ItemStack>,
}

impl World {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_location(&mut self, location: Location) -> &Location {
		self.locations.push(location);
		&self.locations[self.locations.len() - 1]
	}

	pub fn locations(&self) -> &[Location] {
		&self.locations
	}

	pub fn location(&self, name: &str) -> Option<&Location> {
		self.locations.iter().find(|l| l.name == name)
	}

	pub fn set_catalog(&mut self, catalog: Vec<ItemStack>) {
		self.catalog = catalog;
	}

	/// Looks up a catalog entry by name or display name, ignoring case.
	///
	/// The returned stack holds a single item.
	pub fn catalog_item(&self, name: &str) -> Option<ItemStack> {
		self.catalog
			.iter()
			.find(|item| item.name.eq_ignore_ascii_case(name) || item.display_name().eq_ignore_ascii_case(name))
			.map(|item| item.clone().with_count(1))
	}
}

impl ContainerSource for World {
	fn discover(&self) -> Vec<Discovered> {
		self.locations.iter().flat_map(Location::discover).collect()
	}
}
