//! CLI schema and parsing helpers for the stash binary.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;


#[derive(Parser, Debug)]
#[command(name = "stash")]
#[command(about = "Browse every storage chest of a world as one inventory")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// World snapshot to load (TOML)
	#[arg(long, short = 'w', value_name = "PATH")]
	pub world: Option<PathBuf>,

	/// Settings file (TOML); defaults apply when missing
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Session state file remembering the last category between runs
	#[arg(long, value_name = "PATH")]
	pub state: Option<PathBuf>,

	/// Only show containers of this storage category ("all" clears it)
	#[arg(long)]
	pub category: Option<String>,

	/// Search query, e.g. "#fish =2 ed"
	#[arg(long, short = 's')]
	pub search: Option<String>,

	/// Deposit a catalog item, e.g. "Wood x50"
	#[arg(long, value_name = "NAME xCOUNT")]
	pub deposit: Vec<StackSpec>,

	/// Quick-stack a catalog item into matching stacks only
	#[arg(long, value_name = "NAME xCOUNT")]
	pub quick_stack: Vec<StackSpec>,

	/// Ignore quality and color when quick-stacking
	#[arg(long)]
	pub loose: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Category filter requested on the command line.
	///
	/// `None` keeps the recalled category, `Some(None)` clears the filter.
	pub fn category_filter(&self) -> Option<Option<&str>> {
		self.category
			.as_deref()
			.map(|category| (!category.eq_ignore_ascii_case("all")).then_some(category))
	}
}

/// An item name with an optional `xCOUNT` suffix.
///
/// * `Wood` - one item
/// * `Wood x50` - fifty items
/// * `Copper Ore x3` - names may contain spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
	pub name: String,
	pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackSpecError {
	#[error("item name is empty")]
	EmptyName,
	#[error("cannot move zero items of {0}")]
	ZeroCount(String),
}

impl FromStr for StackSpec {
	type Err = StackSpecError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let (name, count) = match s.rsplit_once(" x") {
			Some((name, count)) => match count.parse::<u32>() {
				Ok(count) => (name.trim_end(), count),
				Err(_) => (s, 1),
			},
			None => (s, 1),
		};

		if name.is_empty() {
			return Err(StackSpecError::EmptyName);
		}
		if count == 0 {
			return Err(StackSpecError::ZeroCount(name.to_string()));
		}
		Ok(Self {
			name: name.to_string(),
			count,
		})
	}
}
