#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Storage aggregation engine.
//!
//! # Purpose
//!
//! Many host containers are presented as one index-addressable inventory
//! that can be scoped to a storage category, searched, sorted, and written
//! to. Writes land in the backing containers; the engine keeps no item state
//! of its own.
//!
//! # Mental Model
//!
//! 1. **Origins:** a [`ContainerRegistry`] holds the live containers with
//!    their category and liveness check.
//! 2. **Slots:** [`SlotMap::rebuild`] flattens the origins passing the
//!    category filter into [`VirtualSlot`]s, `max(capacity, item_count)` per
//!    container, each one a `(container, local index)` pair.
//! 3. **Projection:** the [`Aggregator`] filters the slot map with the current
//!    search [`Query`] and sorts it into the visible projection.
//! 4. **Writes:** [`Aggregator::index_set`], [`Aggregator::upsert`] and
//!    [`Aggregator::stack_with_existing`] mutate containers and then re-filter
//!    and re-sort before returning.
//!
//! # Invariants
//!
//! - Slots never cache items. Every read goes through the container, because
//!   containers compact and reorder themselves on mutation.
//!   - Enforced in: [`VirtualSlot::get`], [`VirtualSlot::set`].
//! - The visible projection is re-derived wholesale, never patched.
//!   - Enforced in: [`Aggregator::refresh`].
//! - Sort order is total: `(empty last, host order, container rank, local index)`.
//!   - Enforced in: [`SlotKey`].
//!   - Tested by: `tests/properties.rs`.
//!
//! # Rebuild triggers
//!
//! | Trigger | Origins | Slot map | Projection |
//! |---------|---------|----------|------------|
//! | construction | filtered | rebuilt | rebuilt |
//! | category change | filtered | rebuilt | rebuilt |
//! | search change | - | - | rebuilt |
//! | pruned origin that was in the filter | filtered | rebuilt | rebuilt |
//! | any write that moved items | - | - | rebuilt |
//!
//! [`ContainerRegistry`]: stash_registry::ContainerRegistry
//! [`Query`]: stash_matcher::Query

mod aggregator;
mod config;
mod error;
pub mod session;
mod slot;

pub use aggregator::{Aggregator, AggregatorBuilder, RefreshReport};
pub use config::{AggregatorConfig, DEFAULT_UTILIZATION_INTERVAL_SECS};
pub use error::SlotError;
pub use session::{Session, SessionState};
pub use slot::{SlotKey, SlotMap, VirtualSlot};
