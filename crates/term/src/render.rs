//! Plain-text rendering of the visible projection.

use std::fmt::Write;

use stash_aggregator::Aggregator;
use stash_aggregator::session::{ALL_CATEGORIES_LABEL, Utilization};

use crate::config::WidthMode;

/// One line per occupied visible slot, addressed by grid row and column.
pub fn projection(aggregator: &Aggregator, width: WidthMode) -> String {
	let columns = width.columns();
	let mut out = String::new();
	let _ = writeln!(
		out,
		"{} | search: {:?} | {} slots",
		aggregator.category().unwrap_or(ALL_CATEGORIES_LABEL),
		aggregator.search_text(),
		aggregator.visible_count()
	);
	for index in 0..aggregator.visible_count() {
		if let Some(item) = aggregator.index(index) {
			let _ = writeln!(out, "{:>4}:{:<2} {item}", index / columns, index % columns);
		}
	}
	out
}

pub fn utilization(utilization: &Utilization) -> String {
	format!(
		"{}/{} slots used ({:.1}%), {} free",
		utilization.occupied, utilization.total, utilization.percent, utilization.free
	)
}
