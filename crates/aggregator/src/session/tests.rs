use std::time::Duration;

use pretty_assertions::assert_eq;
use stash_primitives::{ItemStack, Quality};
use stash_world::{Location, MemoryContainer, Tile, World};

use super::*;

fn wood(count: u32) -> ItemStack {
	ItemStack::new(388, "Wood").with_price(2).with_count(count)
}

fn sap(count: u32) -> ItemStack {
	ItemStack::new(92, "Sap").with_price(2).with_count(count)
}

fn world() -> World {
	let mut world = World::new();
	let farm = world.add_location(Location::new("Farm"));
	farm.place_chest(
		Tile::new(0, 0),
		MemoryContainer::with_items(4, [Some(wood(10))]),
		Some("Materials".into()),
	);
	farm.place_chest(Tile::new(1, 0), MemoryContainer::new(2), None);
	let cabin = world.add_location(Location::new("Cabin").cabin_of("A farmhand with a long name"));
	cabin.set_fridge(MemoryContainer::new(3));
	world
}

fn open(world: &World, state: SessionState) -> Session {
	Session::open(
		state,
		ContainerRegistry::from_source(world),
		AggregatorConfig::default(),
		Matcher::default(),
	)
}

#[test]
fn recalled_category_is_restored() {
	let world = world();
	let state = SessionState {
		last_category: Some("Materials".into()),
	};
	let session = open(&world, state);
	assert_eq!(session.aggregator().category(), Some("Materials"));
	assert_eq!(session.aggregator().visible_count(), 4);
}

#[test]
fn vanished_category_falls_back_to_all() {
	let world = world();
	let state = SessionState {
		last_category: Some("Gone".into()),
	};
	let session = open(&world, state.clone());
	assert_eq!(session.aggregator().category(), None);
	assert_eq!(session.aggregator().visible_count(), 9);
	assert_eq!(session.close(), state);
}

#[test]
fn selection_is_recalled_after_close() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	assert!(session.select_category(Some("Farm")));
	let state = session.close();
	assert_eq!(state.last_category.as_deref(), Some("Farm"));

	let reopened = open(&world, state);
	assert_eq!(reopened.aggregator().visible_count(), 2);
}

#[test]
fn category_choices_start_with_all_and_truncate() {
	let world = world();
	let session = open(&world, SessionState::default());
	let labels: Vec<_> = session.category_choices().into_iter().map(|c| c.label).collect();
	assert_eq!(
		labels,
		["All Categories", "Materials", "Farm", "Cabin (A farmhand with a l"]
	);
	let last = session.category_choices().pop().unwrap();
	assert_eq!(last.value.as_deref(), Some("Cabin (A farmhand with a long name)"));
}

#[test]
fn quick_stack_only_joins_existing_stacks() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	let mut inventory = vec![Some(wood(5)), None, Some(sap(3)), Some(wood(2).with_quality(Quality::Silver))];

	let report = session.quick_stack(&mut inventory, QuickStackMode::Strict);
	assert_eq!(
		report,
		QuickStackReport {
			moved_slots: 1,
			emptied_slots: 1
		}
	);
	assert_eq!(inventory[0], None);
	assert_eq!(inventory[2], Some(sap(3)));
	assert!(inventory[3].is_some());
	assert_eq!(session.aggregator().index(0), Some(wood(15)));
}

#[test]
fn loose_quick_stack_ignores_quality() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	let mut inventory = vec![Some(wood(2).with_quality(Quality::Silver))];

	let report = session.quick_stack(&mut inventory, QuickStackMode::Loose);
	assert_eq!(report.emptied_slots, 1);
	let chest = world.location("Farm").unwrap().chest_at(Tile::new(0, 0)).unwrap();
	assert_eq!(chest.lock().occupied(), 2);
}

#[test]
fn quick_stack_keeps_partial_remainders() {
	let mut world = World::new();
	let farm = world.add_location(Location::new("Farm"));
	farm.place_chest(Tile::new(0, 0), MemoryContainer::with_items(1, [Some(wood(995))]), None);
	let mut session = open(&world, SessionState::default());

	let mut inventory = vec![Some(wood(10))];
	let report = session.quick_stack(&mut inventory, QuickStackMode::Strict);
	assert_eq!(report.moved_slots, 1);
	assert_eq!(report.emptied_slots, 0);
	assert_eq!(inventory[0], Some(wood(6)));
}

#[test]
fn deposit_and_withdraw_round_trip_through_containers() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	assert_eq!(session.deposit(sap(4), None), None);

	let index = (0..session.aggregator().visible_count())
		.find(|&i| session.aggregator().index(i).is_some_and(|item| item.name == "Sap"))
		.unwrap();
	assert_eq!(session.withdraw(index), Ok(Some(sap(4))));
	assert!((0..session.aggregator().visible_count()).all(|i| session.aggregator().index(i) != Some(sap(4))));
	assert!(session.withdraw(100).is_err());
}

#[test]
fn tick_reports_pruned_origins() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	world.location("Cabin").unwrap().remove_fridge();

	let report = session.tick(Duration::ZERO);
	assert_eq!(report.pruned.len(), 1);
	assert_eq!(report.pruned[0].category(), "Cabin (A farmhand with a long name)");
	assert!(report.rebuilt);
}

#[test]
fn utilization_uses_the_recounted_totals() {
	let world = world();
	let mut session = open(&world, SessionState::default());
	assert_eq!(session.utilization().total, 0);

	session.tick(Duration::ZERO);
	let utilization = session.utilization();
	assert_eq!((utilization.total, utilization.occupied, utilization.free), (9, 1, 8));
	assert_eq!(utilization.percent, 11.1);
}

#[test]
fn session_state_round_trips_through_toml() {
	let state = SessionState {
		last_category: Some("Fish".into()),
	};
	let text = toml::to_string(&state).unwrap();
	assert_eq!(toml::from_str::<SessionState>(&text).unwrap(), state);
	assert_eq!(toml::from_str::<SessionState>("").unwrap(), SessionState::default());
}
