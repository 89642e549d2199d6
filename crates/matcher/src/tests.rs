use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use stash_primitives::{ItemId, ItemStack, Quality};

use crate::{BuffTable, LookupError, Matcher, Query, StringTableBuffs};

fn pufferfish() -> ItemStack {
	ItemStack::new(128, "Pufferfish")
		.with_category("Fish")
		.with_description("Inflates when threatened.")
		.with_edibility(-40)
}

fn coffee() -> ItemStack {
	ItemStack::new(395, "Coffee")
		.with_category("Cooking")
		.with_description("It smells delicious.")
		.with_edibility(1)
}

fn buff_table() -> StringTableBuffs {
	StringTableBuffs::new()
		.with_object_info(395, "Coffee/150/1/Crafting/Coffee/It smells delicious./drink/0 0 0 0 0 0 0 0 0 1 0/120")
		.with_object_info(772, "Oil of Garlic/1000/-300/Crafting/Oil of Garlic/Repels monsters./drink/0 0 0 0 0 0 0 0 0 1 0/120")
		.with_descriptions([
			"Farming", "Fishing", "Mining", "", "Luck", "Foraging", "", "Max Energy", "Magnetism", "Speed", "Defense",
		])
}

fn matches(matcher: &Matcher, item: &ItemStack, raw: &str) -> bool {
	matcher.matches(Some(item), &Query::parse(raw))
}

#[test]
fn empty_query_matches_everything() {
	let matcher = Matcher::default();
	assert!(matcher.matches(None, &Query::parse("")));
	assert!(matches(&matcher, &pufferfish(), "   "));
}

#[test]
fn empty_slot_fails_any_predicate() {
	let matcher = Matcher::default();
	assert!(!matcher.matches(None, &Query::parse("fish")));
	assert!(!matcher.matches(None, &Query::parse("#")));
}

#[test]
fn text_matches_name_or_description_case_insensitively() {
	let matcher = Matcher::default();
	assert!(matches(&matcher, &pufferfish(), "PUFFER"));
	assert!(matches(&matcher, &pufferfish(), "threat"));
	assert!(!matches(&matcher, &pufferfish(), "salmon"));
}

#[test]
fn text_uses_display_name() {
	let matcher = Matcher::default();
	let item = pufferfish().with_display_name("Poisson-globe");
	assert!(matches(&matcher, &item, "globe"));
	assert!(!matches(&matcher, &item, "puffer"));
}

#[test]
fn category_matches_label_substring() {
	let matcher = Matcher::default();
	assert!(matches(&matcher, &pufferfish(), "#fis"));
	assert!(!matches(&matcher, &pufferfish(), "#forage"));
}

#[test]
fn bare_category_selects_uncategorized_items() {
	let matcher = Matcher::default();
	let trash = ItemStack::new(168, "Trash");
	assert!(matches(&matcher, &trash, "#"));
	assert!(!matches(&matcher, &pufferfish(), "#"));
	assert!(!matches(&matcher, &trash, "#fish"));
}

#[test]
fn predicates_are_conjunctive() {
	let matcher = Matcher::default();
	let gold = pufferfish().with_quality(Quality::Gold);
	let silver = pufferfish().with_quality(Quality::Silver);
	let gold_coffee = coffee().with_quality(Quality::Gold);

	assert!(matches(&matcher, &gold, "#fish =2"));
	assert!(!matches(&matcher, &silver, "#fish =2"));
	assert!(!matches(&matcher, &gold_coffee, "#fish =2"));
	assert!(matches(&matcher, &gold, "#fish =2 threat"));
	assert!(!matches(&matcher, &gold, "#fish =2 salmon"));
}

#[test]
fn quality_three_means_top_tier() {
	let matcher = Matcher::default();
	let iridium = pufferfish().with_quality(Quality::Iridium);
	assert!(matches(&matcher, &iridium, "=3"));
	assert!(!matches(&matcher, &iridium, "=2"));
	assert!(!matches(&matcher, &pufferfish().with_quality(Quality::Gold), "=3"));
}

#[test]
fn non_numeric_quality_means_normal() {
	let matcher = Matcher::default();
	assert!(matches(&matcher, &pufferfish(), "=gold"));
	assert!(matches(&matcher, &pufferfish(), "="));
	assert!(!matches(&matcher, &pufferfish(), "=7"));
}

#[test]
fn buff_requires_edible_item_with_nonzero_buff() {
	let matcher = Matcher::new(buff_table());
	assert!(matches(&matcher, &coffee(), "+speed"));
	assert!(matches(&matcher, &coffee(), "+SPE"));
	assert!(!matches(&matcher, &coffee(), "+farming"));

	// Same buff data, but the item is not edible.
	let garlic = ItemStack::new(772, "Oil of Garlic");
	assert!(!matches(&matcher, &garlic, "+speed"));
}

#[test]
fn buff_lookups_are_cached_per_kind() {
	let matcher = Matcher::new(buff_table());
	assert_eq!(matcher.cached_kinds(), 0);
	assert!(matches(&matcher, &coffee(), "+speed"));
	assert!(matches(&matcher, &coffee().with_count(20), "+speed"));
	assert_eq!(matcher.cached_kinds(), 1);

	// Kinds without buffs are cached too.
	assert!(!matches(&matcher, &pufferfish(), "+speed"));
	assert_eq!(matcher.cached_kinds(), 2);
}

#[test]
fn cached_buffs_are_copied_out() {
	let matcher = Matcher::new(buff_table());
	let mut buffs = matcher.buffs(&coffee()).unwrap().unwrap();
	buffs.iter_mut().for_each(|b| *b = 0);
	assert!(matches(&matcher, &coffee(), "+speed"));
}

struct FlakyTable {
	calls: Arc<AtomicUsize>,
}

impl BuffTable for FlakyTable {
	fn baseline_buffs(&self, id: ItemId) -> Result<Option<Vec<i32>>, LookupError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if id == ItemId(395) {
			Err(LookupError::Unavailable { id })
		} else {
			Ok(Some(vec![0, 0, 3]))
		}
	}

	fn buff_description(&self, slot: usize) -> Option<String> {
		(slot == 2).then(|| "Mining".to_string())
	}

	fn adjust_buffs(&self, item: &ItemStack, buffs: &mut Vec<i32>) {
		if item.quality == Quality::Iridium {
			buffs[2] = 0;
		}
	}
}

#[test]
fn lookup_failure_only_fails_that_item() {
	let calls = Arc::new(AtomicUsize::new(0));
	let matcher = Matcher::new(FlakyTable { calls: calls.clone() });
	let query = Query::parse("+mining");

	let items = [coffee(), ItemStack::new(204, "Lucky Lunch").with_edibility(40)];
	let hits: Vec<_> = items.iter().filter(|i| matcher.matches(Some(*i), &query)).collect();
	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].name, "Lucky Lunch");

	// Failures are not cached, successes are.
	assert!(!matcher.matches(Some(&coffee()), &query));
	assert!(matcher.matches(Some(&items[1]), &query));
	assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn adjustments_apply_after_the_cache() {
	let matcher = Matcher::new(FlakyTable {
		calls: Arc::new(AtomicUsize::new(0)),
	});
	let lunch = ItemStack::new(204, "Lucky Lunch").with_edibility(40);
	assert!(matches(&matcher, &lunch, "+mining"));
	assert!(!matches(&matcher, &lunch.clone().with_quality(Quality::Iridium), "+mining"));
	assert!(matches(&matcher, &lunch, "+mining"));
}
