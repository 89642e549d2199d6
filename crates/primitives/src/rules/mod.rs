use serde::{Deserialize, Serialize};

use crate::ItemStack;


bitflags::bitflags! {
	/// Extra conditions applied on top of [`ItemStack::same_kind`] when looking
	/// for a stack to merge into.
	///
	/// A *container* is targeted if it holds any stack matching these rules;
	/// the container's own add then decides where the items actually land.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
	pub struct CanStackRules: u8 {
		/// Both stacks must allow more than one item per stack.
		const MAX_STACK_GREATER_THAN_ONE = 1 << 0;
		/// Both stacks must have the same quality.
		const MATCHING_QUALITY = 1 << 1;
		/// Colored stacks must share a color.
		const MATCHING_COLOR = 1 << 2;
	}
}

impl CanStackRules {
	/// Kind identity only.
	pub const ITEM_ONLY: Self = Self::empty();
	/// Every rule applies.
	pub const DEFAULT: Self = Self::all();
	pub const IGNORE_STACK_SIZE: Self = Self::DEFAULT.difference(Self::MAX_STACK_GREATER_THAN_ONE);
	pub const IGNORE_QUALITY: Self = Self::DEFAULT.difference(Self::MATCHING_QUALITY);
	pub const IGNORE_COLOR: Self = Self::DEFAULT.difference(Self::MATCHING_COLOR);
}

impl Default for CanStackRules {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Returns true if `source` may be merged into a container holding `target`.
pub fn can_stack_with(source: &ItemStack, target: &ItemStack, rules: CanStackRules) -> bool {
	if !source.same_kind(target) {
		return false;
	}

	if rules.contains(CanStackRules::MATCHING_QUALITY) && source.quality != target.quality {
		return false;
	}

	if rules.contains(CanStackRules::MAX_STACK_GREATER_THAN_ONE)
		&& (source.max_stack <= 1 || target.max_stack <= 1)
	{
		return false;
	}

	if rules.contains(CanStackRules::MATCHING_COLOR) {
		if let (Some(a), Some(b)) = (source.color, target.color) {
			if a != b {
				return false;
			}
		}
	}

	true
}
