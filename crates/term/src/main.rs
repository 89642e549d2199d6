//! `stash` command-line frontend.
//!
//! Loads a world snapshot, opens an aggregate session over every chest in it,
//! applies the requested category, search and transfers, then prints the
//! visible projection.

mod cli;
mod config;
mod render;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, StackSpec};
use config::Settings;
use stash_aggregator::session::QuickStackMode;
use stash_aggregator::{Session, SessionState};
use stash_matcher::Matcher;
use stash_primitives::ItemStack;
use stash_registry::ContainerRegistry;
use stash_world::World;
use tracing::{debug, info, warn};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let settings = match &cli.config {
		Some(path) => Settings::load(path)?,
		None => Settings::default(),
	};
	debug!(
		open_key = %settings.open_key,
		width = ?settings.width_mode,
		background_effects = settings.background_effects,
		"settings loaded"
	);

	let world = match &cli.world {
		Some(path) => World::load(path).with_context(|| format!("loading world {}", path.display()))?,
		None => World::new(),
	};
	let state = match &cli.state {
		Some(path) => config::load_state(path)?,
		None => SessionState::default(),
	};

	let registry = ContainerRegistry::from_source(&world);
	info!(origins = registry.len(), categories = registry.categories().len(), "world loaded");

	let mut session = Session::open(state, registry, settings.aggregator.clone(), Matcher::default());
	if let Some(category) = cli.category_filter() {
		session.select_category(category);
	}
	if let Some(search) = &cli.search {
		session.search(search);
	}

	for stack in &cli.deposit {
		let item = resolve(&world, stack)?;
		if let Some(rest) = session.deposit(item, None) {
			warn!(item = %stack.name, remaining = rest.count, "not everything fit");
		}
	}

	if !cli.quick_stack.is_empty() {
		let mut inventory = cli
			.quick_stack
			.iter()
			.map(|stack| resolve(&world, stack).map(Some))
			.collect::<anyhow::Result<Vec<_>>>()?;
		let mode = if cli.loose != settings.invert_shift_transfer {
			QuickStackMode::Loose
		} else {
			QuickStackMode::Strict
		};
		let report = session.quick_stack(&mut inventory, mode);
		info!(moved = report.moved_slots, emptied = report.emptied_slots, "quick stack done");
		for rest in inventory.iter().flatten() {
			println!("kept in inventory: {rest}");
		}
	}

	session.tick(Duration::ZERO);

	print!("{}", render::projection(session.aggregator(), settings.width_mode));
	println!("{}", render::utilization(&session.utilization()));

	if let Some(path) = &cli.state {
		config::save_state(path, &session.close())?;
	}
	Ok(())
}

/// Builds a stack of `stack.count` items from the world catalog.
fn resolve(world: &World, stack: &StackSpec) -> anyhow::Result<ItemStack> {
	let item = world
		.catalog_item(&stack.name)
		.with_context(|| format!("unknown item {:?}", stack.name))?;
	Ok(item.with_count(stack.count))
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("stash=debug,info")
		} else {
			EnvFilter::new("stash=info,warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
