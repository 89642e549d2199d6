use rustc_hash::FxHashMap;
use stash_primitives::{ItemId, ItemStack};

/// Index of the buff magnitudes inside a `/`-delimited object info record.
pub const OBJECT_INFO_BUFF_FIELD: usize = 7;

/// Failure to read the buffs of a single item kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	/// A buff magnitude in the info record is not an integer.
	#[error("malformed buff magnitude for item {id}: {value:?}")]
	MalformedBuffs { id: ItemId, value: String },
	/// The host has no buff data for this kind.
	#[error("buff data unavailable for item {id}")]
	Unavailable { id: ItemId },
}

/// Host lookup of food buffs.
pub trait BuffTable: Send + Sync {
	/// Baseline buff magnitudes for an item kind, `None` if the kind has none.
	fn baseline_buffs(&self, id: ItemId) -> Result<Option<Vec<i32>>, LookupError>;

	/// Localized description of the buff stored at `slot`.
	fn buff_description(&self, slot: usize) -> Option<String>;

	/// Applies item-specific adjustments on top of the cached baseline.
	fn adjust_buffs(&self, _item: &ItemStack, _buffs: &mut Vec<i32>) {}
}

/// Buff table for hosts without food buffs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBuffs;

impl BuffTable for NoBuffs {
	fn baseline_buffs(&self, _id: ItemId) -> Result<Option<Vec<i32>>, LookupError> {
		Ok(None)
	}

	fn buff_description(&self, _slot: usize) -> Option<String> {
		None
	}
}

/// Buff table backed by the host's string tables.
///
/// Object info records are `/`-delimited; records with more than
/// [`OBJECT_INFO_BUFF_FIELD`] fields carry space-delimited buff magnitudes in
/// that field. Descriptions are indexed by buff slot.
#[derive(Debug, Clone, Default)]
pub struct StringTableBuffs {
	object_info: FxHashMap<ItemId, String>,
	descriptions: Vec<String>,
}

impl StringTableBuffs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces the raw info record of an item kind.
	pub fn with_object_info(mut self, id: i32, record: impl Into<String>) -> Self {
		self.object_info.insert(ItemId(id), record.into());
		self
	}

	/// Sets the localized buff descriptions, in buff slot order.
	pub fn with_descriptions<I, S>(mut self, descriptions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.descriptions = descriptions.into_iter().map(Into::into).collect();
		self
	}
}

impl BuffTable for StringTableBuffs {
	fn baseline_buffs(&self, id: ItemId) -> Result<Option<Vec<i32>>, LookupError> {
		let Some(record) = self.object_info.get(&id).filter(|r| !r.is_empty()) else {
			return Ok(None);
		};

		let Some(field) = record.split('/').nth(OBJECT_INFO_BUFF_FIELD) else {
			return Ok(None);
		};

		field
			.split(' ')
			.map(|value| {
				value.parse::<i32>().map_err(|_| LookupError::MalformedBuffs {
					id,
					value: value.to_string(),
				})
			})
			.collect::<Result<Vec<_>, _>>()
			.map(Some)
	}

	fn buff_description(&self, slot: usize) -> Option<String> {
		self.descriptions.get(slot).filter(|d| !d.is_empty()).cloned()
	}
}
