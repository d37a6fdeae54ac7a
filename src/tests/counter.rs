use std::fs;

use crate::{
	command::DiceCommand,
	counter::{CounterStore, JsonFileCounter},
	dice::roller::Max as MaxRoller,
};

#[test]
fn missing_file_starts_at_zero() {
	let dir = tempfile::tempdir().unwrap();
	let counter = JsonFileCounter::open(dir.path().join("roll_count.json"));
	assert_eq!(counter.load(), 0);
}

#[test]
fn increments_are_persisted() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("roll_count.json");

	let mut counter = JsonFileCounter::open(&path);
	assert_eq!(counter.increment(), 1);
	assert_eq!(counter.increment(), 2);
	assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"total_rolls":2}"#);

	let reopened = JsonFileCounter::open(&path);
	assert_eq!(reopened.load(), 2);
}

#[test]
fn unreadable_file_starts_at_zero() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("roll_count.json");
	fs::write(&path, "not json").unwrap();

	let mut counter = JsonFileCounter::open(&path);
	assert_eq!(counter.load(), 0);
	assert_eq!(counter.increment(), 1);
	assert_eq!(JsonFileCounter::open(&path).load(), 1);
}

#[test]
fn failed_save_does_not_block_rolls() {
	let dir = tempfile::tempdir().unwrap();
	// A directory can't be written as a file
	let counter = JsonFileCounter::open(dir.path());
	assert!(counter.save().is_err());

	let mut command = DiceCommand::new(MaxRoller, counter);
	assert_eq!(command.run("1d6").unwrap(), "🎲 **1d6**: [6] = **6**");
	assert_eq!(command.total_rolls(), 1);
}

#[test]
fn command_persists_only_successful_rolls() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("roll_count.json");

	let mut command = DiceCommand::new(MaxRoller, JsonFileCounter::open(&path));
	assert!(command.run("2d6").is_ok());
	assert!(command.run("101d6").is_err());
	assert!(command.run("nope").is_err());
	assert!(command.run("1d20cd10").is_ok());

	assert_eq!(JsonFileCounter::open(&path).load(), 2);
}
