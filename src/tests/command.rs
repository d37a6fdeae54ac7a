use crate::{
	command::{evaluate_dice_command, is_implicit_roll, roll, DiceCommand, Rejection},
	counter::{CounterStore, MemoryCounter},
	dice::{
		roller::{Iter as IterRoller, Val as ValRoller},
		Error as DiceError, Integer, Limits,
	},
};

#[test]
fn sum_with_modifier() {
	let mut command = scripted(vec![2, 3, 4]);
	assert_eq!(command.run("3d6+2").unwrap(), "🎲 **3d6+2**: [2, 3, 4] +2 = **11**");
}

#[test]
fn advantage() {
	let mut command = scripted(vec![4, 7]);
	assert_eq!(command.run("1d20adv").unwrap(), "🎲 **1d20adv**: [4,7→7] = **7**");
}

#[test]
fn disadvantage_with_negative_modifier() {
	let mut command = scripted(vec![12, 5, 3, 19]);
	assert_eq!(
		command.run("2d20dis-2").unwrap(),
		"🎲 **2d20dis-2**: [12,3→3, 5,19→5] -2 = **6**"
	);
}

#[test]
fn success_count() {
	let mut command = scripted(vec![1, 6, 10, 5, 7]);
	assert_eq!(
		command.run("5d10cd6").unwrap(),
		"🎲 **5d10cd6**: [1, 6, 10, 5, 7] (CD 6) = **3 sucessos**"
	);
}

#[test]
fn echoes_normalized_input_with_trailing_text() {
	let mut command = scripted(vec![1, 2, 3]);
	assert_eq!(
		command.run("3D6 + 2 Goblin Attack").unwrap(),
		"🎲 **3d6+2goblinattack**: [1, 2, 3] +2 = **8**"
	);
}

#[test]
fn zero_dice() {
	let mut command = scripted(Vec::new());
	assert_eq!(command.run("0d6+3").unwrap(), "🎲 **0d6+3**: [] +3 = **3**");
	assert_eq!(command.total_rolls(), 1);
}

#[test]
fn zero_dice_without_sides() {
	let mut command = scripted(Vec::new());
	assert_eq!(command.run("0d0").unwrap(), "🎲 **0d0**: [] = **0**");
	assert_eq!(command.run("0d0cd3").unwrap(), "🎲 **0d0cd3**: [] (CD 3) = **0 sucessos**");
	assert_eq!(command.total_rolls(), 2);
}

#[test]
fn huge_modifiers_and_difficulties_are_exact() {
	let mut command = DiceCommand::new(ValRoller(3), MemoryCounter::default());
	assert_eq!(
		command.run("1d6+99999999999999999999").unwrap(),
		"🎲 **1d6+99999999999999999999**: [3] +99999999999999999999 = **100000000000000000002**"
	);
	assert_eq!(
		command.run("1d6+9223372036854775807").unwrap(),
		"🎲 **1d6+9223372036854775807**: [3] +9223372036854775807 = **9223372036854775810**"
	);
	assert_eq!(
		command.run("1d6-99999999999999999999").unwrap(),
		"🎲 **1d6-99999999999999999999**: [3] -99999999999999999999 = **-99999999999999999996**"
	);
	assert_eq!(
		command.run("1d6cd99999999999").unwrap(),
		"🎲 **1d6cd99999999999**: [3] (CD 99999999999) = **0 sucessos**"
	);
	assert_eq!(
		command.run("2d6+007").unwrap(),
		"🎲 **2d6+007**: [3, 3] +7 = **13**"
	);
}

#[test]
fn out_of_range_is_rejected_before_rolling() {
	// The scripted roller would panic if anything were drawn
	let mut command = scripted(Vec::new());
	for input in ["101d6", "1d1001", "1d0", "101d6cd3", "99999999999d6"] {
		assert!(
			matches!(command.run(input), Err(Rejection::OutOfRange(DiceError::OutOfRange { .. }))),
			"{input:?} should be out of range"
		);
	}
	assert_eq!(command.total_rolls(), 0);
}

#[test]
fn not_notation_is_rejected() {
	let mut command = scripted(Vec::new());
	assert_eq!(command.run("hello"), Err(Rejection::NoMatch));
	assert_eq!(command.run(""), Err(Rejection::NoMatch));
	assert_eq!(command.run("d20"), Err(Rejection::NoMatch));
	assert_eq!(command.total_rolls(), 0);
}

#[test]
fn counter_only_counts_successful_rolls() {
	let mut command = DiceCommand::new(IterRoller::new(vec![1, 2, 3, 4]), MemoryCounter::new(10));
	assert!(command.run("1d6").is_ok());
	assert!(command.run("hello").is_err());
	assert!(command.run("500d6").is_err());
	assert!(command.run("1d20adv").is_ok());
	assert_eq!(command.handle_message("nice roll!"), None);
	assert!(command.handle_message("1d4").is_some());
	assert_eq!(command.total_rolls(), 13);
	assert_eq!(command.counter().load(), 13);
	assert_eq!(command.presence(), "🎲 13 rolagens");
}

#[test]
fn implicit_rolls() {
	let mut command = scripted(vec![5, 5, 5]);
	assert_eq!(command.handle_message("I have 3d6+2 apples"), None);
	assert_eq!(command.handle_message("3d6+2 apples"), None);
	assert_eq!(command.handle_message("3D6+2"), None);
	assert_eq!(
		command.handle_message("  3d6+2\n"),
		Some(Ok("🎲 **3d6+2**: [5, 5, 5] +2 = **17**".to_owned()))
	);
	assert_eq!(command.total_rolls(), 1);
}

#[test]
fn implicit_roll_can_still_be_out_of_range() {
	let mut command = scripted(Vec::new());
	let result = command.handle_message("101d6");
	assert!(matches!(result, Some(Err(Rejection::OutOfRange(..)))));
	assert_eq!(command.total_rolls(), 0);
}

#[test]
fn implicit_trigger() {
	assert!(is_implicit_roll("3d6+2"));
	assert!(is_implicit_roll("5d10cd6"));
	assert!(is_implicit_roll("\t1d20adv "));
	assert!(!is_implicit_roll("I have 3d6+2 apples"));
	assert!(!is_implicit_roll("/rolld 3d6"));
	assert!(!is_implicit_roll("3d6 +2"));
}

#[test]
fn custom_limits() {
	let limits = Limits {
		max_count: 3,
		max_sides: 6,
	};
	let mut command = scripted(vec![6, 6, 6]).with_limits(limits);
	assert_eq!(command.limits(), &limits);
	let rejection = command.run("4d6").unwrap_err();
	assert_eq!(
		rejection.advisory(),
		"Por favor, use valores razoáveis (máximo 3 dados com até 6 lados)"
	);
	assert!(command.run("3d6").is_ok());
}

#[test]
fn advisories() {
	assert_eq!(
		Rejection::NoMatch.advisory(),
		"Notação de dados inválida. Use formatos como '3d6+2', '1d20adv' ou '5d10cd6'."
	);
	assert_eq!(
		evaluate_dice_command("1d1001").unwrap_err().advisory(),
		"Por favor, use valores razoáveis (máximo 100 dados com até 1000 lados)"
	);
}

#[test]
fn roll_keeps_structured_outcome() {
	let mut roller = IterRoller::new(vec![3, 4]);
	let roll = roll("2d4-1xyz", &mut roller, &Limits::default()).unwrap();
	assert_eq!(roll.notation, "2d4-1xyz");
	assert_eq!(roll.outcome.aggregate, Integer::from(6));
	assert_eq!(roll.outcome.secondary, Integer::from(-1));
	assert_eq!(roll.to_string(), "🎲 **2d4-1xyz**: [3, 4] -1 = **6**");
}

#[test]
fn random_rolls_are_well_formed() {
	for _ in 0..100 {
		let message = evaluate_dice_command("4d6+1").unwrap();
		let (_, total) = message.rsplit_once(" = **").unwrap();
		let total: i64 = total.trim_end_matches("**").parse().unwrap();
		assert!((5..=25).contains(&total), "{message}");
	}

	let message = evaluate_dice_command("10d10cd6").unwrap();
	assert!(message.starts_with("🎲 **10d10cd6**: ["));
	assert!(message.ends_with(" sucessos**"));
}

#[test]
fn borrowed_roller_and_counter() {
	let mut roller = IterRoller::new(vec![2, 9]);
	let mut counter = MemoryCounter::new(5);
	{
		let mut command = DiceCommand::new(&mut roller, &mut counter);
		assert_eq!(command.run("1d10").unwrap(), "🎲 **1d10**: [2] = **2**");
	}
	assert!(roller.can_roll());
	assert_eq!(counter.load(), 6);
}

fn scripted(vals: Vec<u32>) -> DiceCommand<IterRoller<std::vec::IntoIter<u32>>, MemoryCounter> {
	DiceCommand::new(IterRoller::new(vals), MemoryCounter::default())
}
