//! Runs the `stash` binary against a world snapshot on disk.

use std::path::Path;
use std::process::Command;

const WORLD: &str = r#"
[[catalog]]
id = 388
name = "Wood"
price = 2

[[catalog]]
id = 145
name = "Sunfish"
price = 30
category = "Fish"

[[locations]]
name = "Farm"

[[locations.chests]]
tile = { x = 0, y = 0 }
capacity = 5
items = [{ id = 388, name = "Wood", price = 2, count = 50 }]

[[locations.chests]]
tile = { x = 1, y = 0 }
capacity = 3
category = "Fish"
items = [{ id = 145, name = "Sunfish", price = 30, category = "Fish", quality = "gold" }]
"#;

fn stash(dir: &Path, args: &[&str]) -> (bool, String, String) {
	let world = dir.join("world.toml");
	std::fs::write(&world, WORLD).unwrap();
	let output = Command::new(env!("CARGO_BIN_EXE_stash"))
		.arg("--world")
		.arg(&world)
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.unwrap();
	(
		output.status.success(),
		String::from_utf8_lossy(&output.stdout).into_owned(),
		String::from_utf8_lossy(&output.stderr).into_owned(),
	)
}

#[test]
fn lists_every_chest_as_one_inventory() {
	let dir = tempfile::tempdir().unwrap();
	let (ok, stdout, _) = stash(dir.path(), &[]);
	assert!(ok);
	assert!(stdout.starts_with("All Categories | search: \"\" | 8 slots"));
	assert!(stdout.contains("Wood x50"));
	assert!(stdout.contains("Sunfish x1 (Gold)"));
	assert!(stdout.contains("2/8 slots used (25.0%), 6 free"));
}

#[test]
fn deposits_merge_into_existing_stacks() {
	let dir = tempfile::tempdir().unwrap();
	let (ok, stdout, _) = stash(dir.path(), &["--deposit", "wood x10", "--category", "Farm"]);
	assert!(ok);
	assert!(stdout.contains("Wood x60"));
	assert!(!stdout.contains("Sunfish"));
}

#[test]
fn unknown_items_fail_with_a_message() {
	let dir = tempfile::tempdir().unwrap();
	let (ok, _, stderr) = stash(dir.path(), &["--deposit", "Diamond x2"]);
	assert!(!ok);
	assert!(stderr.contains("unknown item \"Diamond\""));
}

#[test]
fn category_is_recalled_through_the_state_file() {
	let dir = tempfile::tempdir().unwrap();
	let state = dir.path().join("state.toml");
	let state = state.to_str().unwrap();

	let (ok, _, _) = stash(dir.path(), &["--state", state, "--category", "Fish"]);
	assert!(ok);
	let (ok, stdout, _) = stash(dir.path(), &["--state", state, "--search", "=2"]);
	assert!(ok);
	assert!(stdout.starts_with("Fish | search: \"=2\" | 1 slots"));
}
