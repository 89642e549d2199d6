//! Container registry: which storage containers take part in aggregation.
//!
//! Discovery is delegated to a [`ContainerSource`]; the registry only keeps
//! the resulting [`StorageOrigin`]s and evicts those whose liveness check
//! fails. Eviction is final for that origin: a container that comes back
//! must be rediscovered and receives a new [`OriginId`].

mod origin;
mod registry;

pub use origin::{Discovered, Liveness, OriginId, StorageOrigin};
pub use registry::{ContainerRegistry, ContainerSource};
