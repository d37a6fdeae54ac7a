//! The dice command as a chat bot sees it: raw text in, a finished message or a [`Rejection`] out.

use alloc::{
	borrow::ToOwned,
	format,
	string::{String, ToString},
};
use core::fmt;

use chumsky::Parser;
use tracing::debug;

#[cfg(all(feature = "fastrand", feature = "std"))]
use crate::dice::roller::FastRand;
use crate::{
	counter::CounterStore,
	dice::{self, Limits, RollOutcome, Roller},
	parse::{normalize, parse_notation, trigger},
};

/// Reason a dice command produced no roll
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Rejection {
	/// The input isn't dice notation.
	#[error("input is not dice notation")]
	NoMatch,

	/// The input is dice notation, but asks for an unreasonable roll.
	#[error(transparent)]
	OutOfRange(#[from] dice::Error),
}

impl Rejection {
	/// Builds the advisory message to show the user in place of a roll.
	///
	/// # Examples
	/// ```
	/// use rolld::command::{evaluate_dice_command, Rejection};
	///
	/// assert_eq!(
	/// 	evaluate_dice_command("101d6").unwrap_err().advisory(),
	/// 	"Por favor, use valores razoáveis (máximo 100 dados com até 1000 lados)"
	/// );
	/// assert_eq!(
	/// 	Rejection::NoMatch.advisory(),
	/// 	"Notação de dados inválida. Use formatos como '3d6+2', '1d20adv' ou '5d10cd6'."
	/// );
	/// ```
	#[must_use]
	pub fn advisory(&self) -> String {
		match self {
			Self::NoMatch => "Notação de dados inválida. Use formatos como '3d6+2', '1d20adv' ou '5d10cd6'.".to_owned(),
			Self::OutOfRange(dice::Error::OutOfRange { limits, .. }) => format!(
				"Por favor, use valores razoáveis (máximo {} dados com até {} lados)",
				limits.max_count, limits.max_sides
			),
		}
	}
}

/// A successful roll along with the normalized text that requested it
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Roll {
	/// Normalized input, including anything after the notation that the parser ignored
	pub notation: String,

	/// Result of rolling the parsed notation
	pub outcome: RollOutcome,
}

impl fmt::Display for Roll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is the chat message from [`RollOutcome::describe()`].
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.outcome.describe(&self.notation))
	}
}

/// Normalizes, parses, validates and rolls a dice command.
///
/// Validation happens before the roller is touched, so rejected input never draws any values.
///
/// # Errors
/// [`Rejection::NoMatch`] if the input isn't dice notation, [`Rejection::OutOfRange`] if it exceeds `limits`.
///
/// # Examples
/// ```
/// use rolld::{command::roll, dice::{roller::Iter as IterRoller, Limits}};
///
/// let mut roller = IterRoller::new([14, 9]);
/// let roll = roll("1d20 ADV", &mut roller, &Limits::default())?;
/// assert_eq!(roll.to_string(), "🎲 **1d20adv**: [14,9→14] = **14**");
/// # Ok::<(), rolld::command::Rejection>(())
/// ```
pub fn roll<R: Roller>(raw: &str, roller: &mut R, limits: &Limits) -> Result<Roll, Rejection> {
	let notation = normalize(raw);
	let spec = parse_notation(&notation).ok_or(Rejection::NoMatch)?;
	spec.validate(limits)?;

	let outcome = roller.roll(&spec);
	Ok(Roll { notation, outcome })
}

/// Evaluates a dice command with a fresh random roller and the default limits, producing the chat message for it.
///
/// # Errors
/// [`Rejection::NoMatch`] if the input isn't dice notation, [`Rejection::OutOfRange`] if it asks for more than 100 dice
/// or 1000 sides.
///
/// # Examples
/// ```
/// use rolld::command::{evaluate_dice_command, Rejection};
///
/// let message = evaluate_dice_command("3d6+2")?;
/// assert!(message.starts_with("🎲 **3d6+2**: ["));
/// assert_eq!(evaluate_dice_command("hello"), Err(Rejection::NoMatch));
/// # Ok::<(), Rejection>(())
/// ```
#[cfg(all(feature = "fastrand", feature = "std"))]
pub fn evaluate_dice_command(raw: &str) -> Result<String, Rejection> {
	roll(raw, &mut FastRand::default(), &Limits::default()).map(|roll| roll.to_string())
}

/// Checks whether a chat message consists of nothing but dice notation, and so should be rolled without an explicit
/// command. Only surrounding whitespace is ignored; the message is not lowercased.
///
/// # Examples
/// ```
/// use rolld::command::is_implicit_roll;
///
/// assert!(is_implicit_roll("3d6+2"));
/// assert!(is_implicit_roll("  5d10cd6\n"));
/// assert!(!is_implicit_roll("I have 3d6+2 apples"));
/// assert!(!is_implicit_roll("3D6"));
/// ```
#[must_use]
pub fn is_implicit_roll(message: &str) -> bool {
	trigger().parse(message.trim()).into_result().is_ok()
}

/// Dice command handler that owns its roller and keeps a running count of successful rolls.
///
/// # Examples
/// ```
/// use rolld::{
/// 	command::DiceCommand,
/// 	counter::MemoryCounter,
/// 	dice::roller::Max as MaxRoller,
/// };
///
/// let mut command = DiceCommand::new(MaxRoller, MemoryCounter::default());
/// assert_eq!(command.run("2d6-1").as_deref(), Ok("🎲 **2d6-1**: [6, 6] -1 = **11**"));
/// assert!(command.run("hello").is_err());
/// assert_eq!(command.handle_message("good luck everyone"), None);
/// assert!(command.handle_message("1d20").is_some());
/// assert_eq!(command.total_rolls(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DiceCommand<R, C> {
	/// Source of die values
	roller: R,

	/// Running total of successful rolls
	counter: C,

	/// Bounds applied before rolling
	limits: Limits,
}

impl<R: Roller, C: CounterStore> DiceCommand<R, C> {
	/// Creates a handler with the default limits.
	#[must_use]
	pub fn new(roller: R, counter: C) -> Self {
		Self {
			roller,
			counter,
			limits: Limits::default(),
		}
	}

	/// Replaces the limits rolls are validated against.
	#[must_use]
	pub fn with_limits(mut self, limits: Limits) -> Self {
		self.limits = limits;
		self
	}

	/// Gets the limits rolls are validated against.
	#[must_use]
	#[inline]
	pub const fn limits(&self) -> &Limits {
		&self.limits
	}

	/// Gets the counter of successful rolls.
	#[must_use]
	#[inline]
	pub const fn counter(&self) -> &C {
		&self.counter
	}

	/// Runs an explicit dice command. The counter is incremented once for every successful roll and never for a
	/// rejection.
	///
	/// # Errors
	/// [`Rejection::NoMatch`] if the input isn't dice notation, [`Rejection::OutOfRange`] if it exceeds the limits.
	pub fn run(&mut self, raw: &str) -> Result<String, Rejection> {
		match roll(raw, &mut self.roller, &self.limits) {
			Ok(roll) => {
				let total = self.counter.increment();
				debug!(notation = %roll.notation, aggregate = %roll.outcome.aggregate, total, "rolled dice");
				Ok(roll.to_string())
			}
			Err(rejection) => {
				debug!(input = raw, %rejection, "rejected dice command");
				Err(rejection)
			}
		}
	}

	/// Handles an ordinary chat message, rolling it only if it is nothing but dice notation.
	/// Returns [`None`] for messages that should be left alone.
	pub fn handle_message(&mut self, message: &str) -> Option<Result<String, Rejection>> {
		if !is_implicit_roll(message) {
			return None;
		}
		Some(self.run(message.trim()))
	}

	/// Gets the number of successful rolls made so far.
	#[must_use]
	#[inline]
	pub fn total_rolls(&self) -> u64 {
		self.counter.load()
	}

	/// Builds the status line shown as the bot's presence.
	///
	/// # Examples
	/// ```
	/// use rolld::{command::DiceCommand, counter::MemoryCounter, dice::roller::Max as MaxRoller};
	///
	/// let command = DiceCommand::new(MaxRoller, MemoryCounter::new(1234));
	/// assert_eq!(command.presence(), "🎲 1234 rolagens");
	/// ```
	#[must_use]
	pub fn presence(&self) -> String {
		format!("🎲 {} rolagens", self.total_rolls())
	}
}
