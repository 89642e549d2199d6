use std::fmt;

use smallvec::SmallVec;
use stash_primitives::Quality;

/// One parsed search token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
	/// Lower-cased substring of the display name or description.
	Text(String),
	/// Lower-cased substring of the category label; empty selects uncategorized items.
	Category(String),
	/// Lower-cased substring of a buff description.
	Buff(String),
	/// Exact quality tier; `None` when the term names no tier and nothing can match.
	Quality(Option<Quality>),
}

impl Predicate {
	/// Classifies a single whitespace-free token by its prefix.
	pub fn parse(token: &str) -> Self {
		if let Some(term) = token.strip_prefix('#') {
			Self::Category(term.to_lowercase())
		} else if let Some(term) = token.strip_prefix('+') {
			Self::Buff(term.to_lowercase())
		} else if let Some(term) = token.strip_prefix('=') {
			Self::Quality(Quality::from_query_term(term))
		} else {
			Self::Text(token.to_lowercase())
		}
	}
}

impl fmt::Display for Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(term) => f.write_str(term),
			Self::Category(term) => write!(f, "#{term}"),
			Self::Buff(term) => write!(f, "+{term}"),
			Self::Quality(Some(quality)) => write!(f, "={}", quality.level()),
			Self::Quality(None) => f.write_str("=?"),
		}
	}
}

/// A parsed search query: the conjunction of its predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	predicates: SmallVec<[Predicate; 4]>,
}

impl Query {
	/// Parses a raw query. Blank input yields the empty query.
	pub fn parse(raw: &str) -> Self {
		Self {
			predicates: raw.split_whitespace().map(Predicate::parse).collect(),
		}
	}

	/// Returns true if the query has no predicates and therefore matches everything.
	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	pub fn predicates(&self) -> &[Predicate] {
		&self.predicates
	}
}

impl From<&str> for Query {
	fn from(raw: &str) -> Self {
		Self::parse(raw)
	}
}
