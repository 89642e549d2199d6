use std::cmp::Ordering;

use super::*;

#[test]
fn quality_levels_skip_three() {
	assert_eq!(Quality::from_level(3), None);
	assert_eq!(Quality::from_level(4), Some(Quality::Iridium));
	assert_eq!(Quality::Iridium.level(), 4);
}

#[test]
fn query_term_remaps_above_gold() {
	assert_eq!(Quality::from_query_term("0"), Some(Quality::Normal));
	assert_eq!(Quality::from_query_term("1"), Some(Quality::Silver));
	assert_eq!(Quality::from_query_term("2"), Some(Quality::Gold));
	assert_eq!(Quality::from_query_term("3"), Some(Quality::Iridium));
	assert_eq!(Quality::from_query_term("4"), None);
}

#[test]
fn query_term_defaults_to_normal() {
	assert_eq!(Quality::from_query_term(""), Some(Quality::Normal));
	assert_eq!(Quality::from_query_term("gold"), Some(Quality::Normal));
	assert_eq!(Quality::from_query_term("-1"), None);
}

#[test]
fn oversized_query_term_names_no_tier() {
	assert_eq!(Quality::from_query_term("99999999999999999999"), None);
	assert_eq!(Quality::from_query_term(" 99999999999999999999 "), None);
	assert_eq!(Quality::from_query_term("9999999999"), None);
}

#[test]
fn same_kind_ignores_count_and_quality() {
	let a = ItemStack::new(388, "Wood").with_count(10);
	let b = ItemStack::new(388, "Wood").with_count(500).with_quality(Quality::Gold);
	assert!(a.same_kind(&b));
}

#[test]
fn same_kind_checks_identity_fields() {
	let wood = ItemStack::new(388, "Wood");
	assert!(!wood.same_kind(&ItemStack::new(388, "Wood").big_craftable()));
	assert!(!wood.same_kind(&ItemStack::new(388, "Hardwood")));
	assert!(!wood.same_kind(&ItemStack::new(709, "Wood")));
	assert!(!wood.same_kind(&ItemStack::new(388, "Wood").with_order_data("Willy")));
}

#[test]
fn host_order_is_price_then_id_then_quality() {
	let cheap = ItemStack::new(900, "Fiber").with_price(1);
	let pricey = ItemStack::new(10, "Diamond").with_price(750);
	assert_eq!(cheap.host_cmp(&pricey), Ordering::Less);

	let low_id = ItemStack::new(330, "Clay").with_price(20);
	let high_id = ItemStack::new(390, "Stone").with_price(20);
	assert_eq!(low_id.host_cmp(&high_id), Ordering::Less);

	let normal = ItemStack::new(128, "Pufferfish").with_price(200);
	let gold = normal.clone().with_quality(Quality::Gold);
	assert_eq!(normal.host_cmp(&gold), Ordering::Less);
	assert_eq!(gold.host_cmp(&normal), Ordering::Greater);
}

#[test]
fn host_order_ignores_count() {
	let a = ItemStack::new(388, "Wood").with_count(1);
	let b = ItemStack::new(388, "Wood").with_count(999);
	assert_eq!(a.host_cmp(&b), Ordering::Equal);
}

#[test]
fn split_takes_at_most_the_stack() {
	let mut wood = ItemStack::new(388, "Wood").with_count(5);
	let taken = wood.split(3);
	assert_eq!(taken.count, 3);
	assert_eq!(wood.count, 2);

	let rest = wood.split(10);
	assert_eq!(rest.count, 2);
	assert_eq!(wood.count, 0);
}

#[test]
fn edibility_sentinel_round_trips() {
	assert_eq!(Edibility::from(INEDIBLE), Edibility::Inedible);
	assert_eq!(i32::from(Edibility::Edible(-20)), -20);
	assert!(!ItemStack::new(388, "Wood").edibility.is_edible());
	assert!(ItemStack::new(18, "Daffodil").with_edibility(0).edibility.is_edible());
}

#[test]
fn display_name_falls_back_to_name() {
	let item = ItemStack::new(388, "Wood");
	assert_eq!(item.display_name(), "Wood");
	let item = item.with_display_name("Bois");
	assert_eq!(item.display_name(), "Bois");
	assert_eq!(item.with_count(3).to_string(), "Bois x3");
}

fn arb_item() -> impl proptest::strategy::Strategy<Value = ItemStack> {
	use proptest::prelude::*;
	(0i32..4, 0i32..3, 0usize..4, prop::bool::ANY, 1u32..50).prop_map(|(price, id, quality, big, count)| {
		let quality = [Quality::Normal, Quality::Silver, Quality::Gold, Quality::Iridium][quality];
		let mut item = ItemStack::new(id, format!("item-{id}"))
			.with_price(price)
			.with_quality(quality)
			.with_count(count);
		item.big = big;
		item
	})
}

proptest::proptest! {
	/// `host_cmp` is antisymmetric and transitive over arbitrary stacks.
	#[test]
	fn prop_host_cmp_is_a_total_order(a in arb_item(), b in arb_item(), c in arb_item()) {
		proptest::prop_assert_eq!(a.host_cmp(&b), b.host_cmp(&a).reverse());
		if a.host_cmp(&b) != Ordering::Greater && b.host_cmp(&c) != Ordering::Greater {
			proptest::prop_assert_ne!(a.host_cmp(&c), Ordering::Greater);
		}
	}
}
