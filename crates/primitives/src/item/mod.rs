use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Default maximum stack size for objects that do not declare one.
pub const DEFAULT_MAX_STACK: u32 = 999;

/// Host-side identifier of an item kind (the sprite sheet index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i32);

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Quality tier of an item stack.
///
/// The host numbers its tiers `0, 1, 2, 4`; level 3 does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
	/// Level 0.
	#[default]
	Normal,
	/// Level 1.
	Silver,
	/// Level 2.
	Gold,
	/// Level 4.
	Iridium,
}

impl Quality {
	/// Returns the host level of this tier.
	pub const fn level(self) -> u8 {
		match self {
			Self::Normal => 0,
			Self::Silver => 1,
			Self::Gold => 2,
			Self::Iridium => 4,
		}
	}

	/// Returns the tier for a host level, or `None` for levels the host never uses.
	pub const fn from_level(level: u8) -> Option<Self> {
		match level {
			0 => Some(Self::Normal),
			1 => Some(Self::Silver),
			2 => Some(Self::Gold),
			4 => Some(Self::Iridium),
			_ => None,
		}
	}

	/// Maps a user-typed tier number onto the host scale.
	///
	/// Non-numeric or empty terms mean level 0. Terms above 2 are shifted up by
	/// one so that `3` names the fourth tier (level 4). Returns `None` when the
	/// term names no tier at all, including digit runs too long to parse.
	pub fn from_query_term(term: &str) -> Option<Self> {
		let term = term.trim();
		let n: i64 = match term.parse() {
			Ok(n) => n,
			Err(_) if !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit()) => return None,
			Err(_) => 0,
		};
		let level = if n > 2 { n + 1 } else { n };
		u8::try_from(level).ok().and_then(Self::from_level)
	}
}

/// RGBA tint carried by colored objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: u8,
}

fn opaque() -> u8 {
	u8::MAX
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: u8::MAX }
	}
}

/// Host marker value meaning "cannot be eaten".
pub const INEDIBLE: i32 = -300;

/// Whether an item can be eaten, and its raw edibility value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Edibility {
	#[default]
	Inedible,
	Edible(i32),
}

impl Edibility {
	pub const fn is_edible(self) -> bool {
		matches!(self, Self::Edible(_))
	}
}

impl From<i32> for Edibility {
	fn from(raw: i32) -> Self {
		if raw == INEDIBLE { Self::Inedible } else { Self::Edible(raw) }
	}
}

impl From<Edibility> for i32 {
	fn from(edibility: Edibility) -> Self {
		match edibility {
			Edibility::Inedible => INEDIBLE,
			Edibility::Edible(raw) => raw,
		}
	}
}

/// A stack of identical items as stored in a host container.
///
/// Identity is [`ItemStack::same_kind`]; `count` is the only field the
/// aggregation engine mutates directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
	pub id: ItemId,
	/// Big craftables share the id space with regular objects.
	#[serde(default)]
	pub big: bool,
	pub name: String,
	#[serde(default)]
	pub display_name: String,
	#[serde(default)]
	pub description: String,
	/// Discriminates otherwise identical special-order items.
	#[serde(default)]
	pub order_data: Option<String>,
	/// Localized category label; `None` for uncategorized items.
	#[serde(default)]
	pub category: Option<String>,
	/// Price class, the primary key of the host ordering.
	#[serde(default)]
	pub price: i32,
	#[serde(default)]
	pub quality: Quality,
	#[serde(default)]
	pub color: Option<Color>,
	#[serde(default)]
	pub edibility: Edibility,
	#[serde(default = "one")]
	pub count: u32,
	#[serde(default = "default_max_stack")]
	pub max_stack: u32,
}

fn one() -> u32 {
	1
}

fn default_max_stack() -> u32 {
	DEFAULT_MAX_STACK
}

impl ItemStack {
	/// Creates a single normal-quality item of the given kind.
	pub fn new(id: i32, name: impl Into<String>) -> Self {
		Self {
			id: ItemId(id),
			big: false,
			name: name.into(),
			display_name: String::new(),
			description: String::new(),
			order_data: None,
			category: None,
			price: 0,
			quality: Quality::Normal,
			color: None,
			edibility: Edibility::Inedible,
			count: 1,
			max_stack: DEFAULT_MAX_STACK,
		}
	}

	pub fn with_count(mut self, count: u32) -> Self {
		self.count = count;
		self
	}

	pub fn with_max_stack(mut self, max_stack: u32) -> Self {
		self.max_stack = max_stack;
		self
	}

	pub fn with_quality(mut self, quality: Quality) -> Self {
		self.quality = quality;
		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = display_name.into();
		self
	}

	pub fn with_price(mut self, price: i32) -> Self {
		self.price = price;
		self
	}

	pub fn with_color(mut self, color: Color) -> Self {
		self.color = Some(color);
		self
	}

	pub fn with_order_data(mut self, order_data: impl Into<String>) -> Self {
		self.order_data = Some(order_data.into());
		self
	}

	pub fn with_edibility(mut self, edibility: i32) -> Self {
		self.edibility = Edibility::from(edibility);
		self
	}

	pub fn big_craftable(mut self) -> Self {
		self.big = true;
		self
	}

	/// Name shown to the player, falling back to the internal name.
	pub fn display_name(&self) -> &str {
		if self.display_name.is_empty() { &self.name } else { &self.display_name }
	}

	/// Returns true if both stacks are the same kind of item, regardless of count.
	pub fn same_kind(&self, other: &Self) -> bool {
		self.id == other.id
			&& self.big == other.big
			&& self.name == other.name
			&& self.order_data == other.order_data
	}

	/// Number of additional items this stack can take before reaching its maximum.
	pub fn space_left(&self) -> u32 {
		self.max_stack.saturating_sub(self.count)
	}

	/// Splits off up to `count` items into a new stack of the same kind.
	pub fn split(&mut self, count: u32) -> Self {
		let taken = count.min(self.count);
		self.count -= taken;
		Self {
			count: taken,
			..self.clone()
		}
	}

	/// Canonical host ordering: price class, then id, then quality.
	///
	/// Name and the big-craftable flag break the remaining ties so that
	/// distinct kinds never compare equal.
	pub fn host_cmp(&self, other: &Self) -> Ordering {
		self.price
			.cmp(&other.price)
			.then_with(|| self.id.cmp(&other.id))
			.then_with(|| self.quality.cmp(&other.quality))
			.then_with(|| self.name.cmp(&other.name))
			.then_with(|| self.big.cmp(&other.big))
	}
}

impl fmt::Display for ItemStack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} x{}", self.display_name(), self.count)?;
		if self.quality != Quality::Normal {
			write!(f, " ({:?})", self.quality)?;
		}
		Ok(())
	}
}
