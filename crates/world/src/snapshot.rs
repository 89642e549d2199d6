use std::path::Path;

use serde::{Deserialize, Serialize};
use stash_primitives::ItemStack;

use crate::{CHEST_CAPACITY, Location, MemoryContainer, Tile, World, WorldError};

/// Serialized form of a [`World`].
///
/// ```toml
/// [[catalog]]
/// id = 388
/// name = "Wood"
/// price = 2
///
/// [[locations]]
/// name = "Farm"
///
/// [[locations.chests]]
/// tile = { x = 3, y = 7 }
/// category = "Materials"
/// items = [{ id = 388, name = "Wood", count = 50 }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSnapshot {
	pub catalog: Vec<ItemStack>,
	pub locations: Vec<LocationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSnapshot {
	pub name: String,
	#[serde(default)]
	pub cabin_owner: Option<String>,
	#[serde(default)]
	pub chests: Vec<ChestSnapshot>,
	#[serde(default)]
	pub fridge: Option<ChestSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestSnapshot {
	/// Ignored for fridges.
	#[serde(default)]
	pub tile: Tile,
	#[serde(default = "default_capacity")]
	pub capacity: usize,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub items: Vec<ItemStack>,
}

fn default_capacity() -> usize {
	CHEST_CAPACITY
}

impl ChestSnapshot {
	fn into_container(self) -> MemoryContainer {
		MemoryContainer::with_items(self.capacity, self.items.into_iter().map(Some))
	}
}

impl WorldSnapshot {
	pub fn from_toml(text: &str) -> Result<Self, WorldError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, WorldError> {
		let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml(&text)
	}

	/// Places every chest of the snapshot into a fresh world.
	pub fn into_world(self) -> World {
		let mut world = World::new();
		world.set_catalog(self.catalog);
		for snapshot in self.locations {
			let mut location = Location::new(snapshot.name);
			if let Some(owner) = snapshot.cabin_owner {
				location = location.cabin_of(owner);
			}
			let location = world.add_location(location);
			for chest in snapshot.chests {
				let (tile, category) = (chest.tile, chest.category.clone());
				location.place_chest(tile, chest.into_container(), category);
			}
			if let Some(fridge) = snapshot.fridge {
				location.set_fridge(fridge.into_container());
			}
		}
		world
	}
}

impl World {
	/// Loads a world from a TOML snapshot on disk.
	pub fn load(path: &Path) -> Result<Self, WorldError> {
		WorldSnapshot::load(path).map(WorldSnapshot::into_world)
	}
}
