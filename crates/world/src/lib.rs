//! Reference host for the stash engine.
//!
//! [`MemoryContainer`] implements the host container primitives (native add
//! with partial consumption, compaction on organize). [`World`] places
//! containers in named locations and acts as the discovery source, deriving
//! each container's category and liveness check from where it is placed.

mod error;
mod memory;
mod snapshot;
mod world;

pub use error::WorldError;
pub use memory::{CHEST_CAPACITY, MemoryContainer};
pub use snapshot::{ChestSnapshot, LocationSnapshot, WorldSnapshot};
pub use world::{Location, PlacedChest, SharedChest, Tile, World};
