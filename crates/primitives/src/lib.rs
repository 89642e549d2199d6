//! Core types for storage aggregation: item stacks, stacking rules, and containers.

/// Host container seam and the shared handle type.
pub mod container;
/// Item stack model and the canonical host ordering.
pub mod item;
/// Rules deciding whether two stacks may be merged.
pub mod rules;

pub use container::{Container, ContainerHandle, add_to_container};
pub use item::{Color, Edibility, ItemId, ItemStack, Quality};
pub use rules::{CanStackRules, can_stack_with};
