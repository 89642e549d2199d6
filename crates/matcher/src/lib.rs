//! Item search for the aggregated storage view.
//!
//! A query is split on whitespace and every token becomes one [`Predicate`],
//! classified by an optional single-character prefix:
//!
//! | Prefix | Predicate | Matches |
//! |--------|-----------|---------|
//! | none | [`Predicate::Text`] | display name or description |
//! | `#` | [`Predicate::Category`] | category label; a bare `#` matches uncategorized items |
//! | `+` | [`Predicate::Buff`] | food buff descriptions of edible items |
//! | `=` | [`Predicate::Quality`] | quality tier, with `3` naming the top tier |
//!
//! All text comparisons are case-insensitive. An item matches a query only if
//! it matches every predicate; an empty query matches everything, including
//! empty slots.
//!
//! Buff lookups go through a [`BuffTable`] and are cached per item kind by the
//! [`Matcher`]. A failed lookup only fails the predicate for that item.

mod buffs;
mod query;
mod search;

pub use buffs::{BuffTable, LookupError, NoBuffs, OBJECT_INFO_BUFF_FIELD, StringTableBuffs};
pub use query::{Predicate, Query};
pub use search::Matcher;

#[cfg(test)]
mod tests;
