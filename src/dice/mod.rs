//! All functionality for describing a dice roll, rolling it, and working with the resulting outcome.
//!
//! This is the home of the roll "primitives": a parsed [`RollSpec`], the [`DieRoll`]s produced for each die and the
//! aggregated [`RollOutcome`]. For turning notation text into a [`RollSpec`], see [`crate::parse`].

mod integer;
pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::{integer::Integer, roller::Roller};

/// Per-die rolling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Mode {
	/// One draw per die
	#[default]
	Normal,

	/// Two draws per die, keeping the higher one
	Advantage,

	/// Two draws per die, keeping the lower one
	Disadvantage,
}

impl Mode {
	/// Classifies the text captured for the advantage tag of a notation.
	///
	/// Only the exact strings `"adv"` and `"dis"` select advantage or disadvantage. Anything else the tag's loose
	/// character class happened to match (`""`, `"a"`, `"dd"`, `"adva"`, ...) rolls normally.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::Mode;
	///
	/// assert_eq!(Mode::from_tag("adv"), Mode::Advantage);
	/// assert_eq!(Mode::from_tag("dis"), Mode::Disadvantage);
	/// assert_eq!(Mode::from_tag("a"), Mode::Normal);
	/// assert_eq!(Mode::from_tag(""), Mode::Normal);
	/// ```
	#[must_use]
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"adv" => Self::Advantage,
			"dis" => Self::Disadvantage,
			_ => Self::Normal,
		}
	}

	/// Indicates whether each die is rolled twice.
	#[must_use]
	#[inline]
	pub const fn is_paired(self) -> bool {
		matches!(self, Self::Advantage | Self::Disadvantage)
	}
}

/// Aggregation strategy, carrying the value that is only meaningful for that strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
	/// Sum all kept dice and add a modifier
	Sum {
		/// Value added to the sum of the dice (may be negative or zero)
		modifier: Integer,
	},

	/// Count the dice that meet or exceed a difficulty
	SuccessCount {
		/// Minimum kept value for a die to count as a success
		difficulty: Integer,
	},
}

impl Default for Kind {
	/// A plain sum with no modifier.
	#[inline]
	fn default() -> Self {
		Self::Sum { modifier: Integer::ZERO }
	}
}

/// Upper bounds a [`RollSpec`] must respect before any dice are rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Plain configuration value")]
pub struct Limits {
	/// Maximum number of dice in a single roll
	pub max_count: u32,

	/// Maximum number of sides per die
	pub max_sides: u32,
}

impl Limits {
	/// Default maximum number of dice.
	pub const MAX_COUNT: u32 = 100;

	/// Default maximum number of sides.
	pub const MAX_SIDES: u32 = 1000;
}

impl Default for Limits {
	/// 100 dice with up to 1000 sides each.
	#[inline]
	fn default() -> Self {
		Self {
			max_count: Self::MAX_COUNT,
			max_sides: Self::MAX_SIDES,
		}
	}
}

/// A parsed dice roll request, such as `3d6+2`, `1d20adv` or `5d10cd6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct RollSpec {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,

	/// How each die is rolled
	pub mode: Mode,

	/// How the kept dice are aggregated
	pub kind: Kind,
}

impl RollSpec {
	/// Creates a plain summed roll with no modifier.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self {
			count,
			sides,
			mode: Mode::Normal,
			kind: Kind::Sum { modifier: Integer::ZERO },
		}
	}

	/// Creates a summed roll with the given mode and modifier.
	#[must_use]
	pub fn sum(count: u32, sides: u32, mode: Mode, modifier: impl Into<Integer>) -> Self {
		Self {
			count,
			sides,
			mode,
			kind: Kind::Sum {
				modifier: modifier.into(),
			},
		}
	}

	/// Creates a success-counting roll. Success counts always roll each die once.
	#[must_use]
	pub fn success_count(count: u32, sides: u32, difficulty: impl Into<Integer>) -> Self {
		Self {
			count,
			sides,
			mode: Mode::Normal,
			kind: Kind::SuccessCount {
				difficulty: difficulty.into(),
			},
		}
	}

	/// Gets the modifier for summed rolls.
	#[must_use]
	#[inline]
	pub const fn modifier(&self) -> Option<&Integer> {
		match &self.kind {
			Kind::Sum { modifier } => Some(modifier),
			Kind::SuccessCount { .. } => None,
		}
	}

	/// Gets the difficulty for success-counting rolls.
	#[must_use]
	#[inline]
	pub const fn difficulty(&self) -> Option<&Integer> {
		match &self.kind {
			Kind::SuccessCount { difficulty } => Some(difficulty),
			Kind::Sum { .. } => None,
		}
	}

	/// Checks that the roll stays within the given limits and that its dice can actually be rolled.
	///
	/// # Errors
	/// If there are more dice than `limits.max_count`, more sides than `limits.max_sides`, or there are dice to roll
	/// but they have no sides, [`Error::OutOfRange`] is returned.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{Error, Limits, RollSpec};
	///
	/// assert!(RollSpec::new(100, 1000).validate(&Limits::default()).is_ok());
	/// assert!(matches!(RollSpec::new(101, 6).validate(&Limits::default()), Err(Error::OutOfRange { .. })));
	/// assert!(matches!(RollSpec::new(1, 1001).validate(&Limits::default()), Err(Error::OutOfRange { .. })));
	/// assert!(RollSpec::new(0, 0).validate(&Limits::default()).is_ok());
	/// ```
	pub const fn validate(&self, limits: &Limits) -> Result<(), Error> {
		if self.count > limits.max_count || self.sides > limits.max_sides || (self.sides == 0 && self.count > 0) {
			return Err(Error::OutOfRange {
				count: self.count,
				sides: self.sides,
				limits: *limits,
			});
		}
		Ok(())
	}
}

impl Default for RollSpec {
	/// Creates the default roll (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for RollSpec {
	/// Formats the roll spec in canonical notation. This is not necessarily the text it was parsed from.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{Mode, RollSpec};
	///
	/// assert_eq!(RollSpec::sum(3, 6, Mode::Normal, 2).to_string(), "3d6+2");
	/// assert_eq!(RollSpec::sum(1, 20, Mode::Disadvantage, -1).to_string(), "1d20dis-1");
	/// assert_eq!(RollSpec::success_count(5, 10, 6).to_string(), "5d10cd6");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		match &self.kind {
			Kind::SuccessCount { difficulty } => write!(f, "cd{difficulty}"),
			Kind::Sum { modifier } => {
				match self.mode {
					Mode::Normal => {}
					Mode::Advantage => f.write_str("adv")?,
					Mode::Disadvantage => f.write_str("dis")?,
				}
				f.write_str(&signed(modifier, ""))
			}
		}
	}
}

/// Single die position produced from rolling a [`RollSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DieRoll {
	/// Die rolled once
	Single(u32),

	/// Die rolled twice with advantage or disadvantage
	Pair {
		/// Value of the first draw
		first: u32,

		/// Value of the second draw
		second: u32,

		/// Value kept from the two draws
		kept: u32,
	},
}

impl DieRoll {
	/// Combines two draws for a die according to the mode. [`Mode::Normal`] keeps only the first draw.
	#[must_use]
	pub fn from_pair(mode: Mode, first: u32, second: u32) -> Self {
		match mode {
			Mode::Normal => Self::Single(first),
			Mode::Advantage => Self::Pair {
				first,
				second,
				kept: first.max(second),
			},
			Mode::Disadvantage => Self::Pair {
				first,
				second,
				kept: first.min(second),
			},
		}
	}

	/// Gets the value that counts for this die.
	#[must_use]
	#[inline]
	pub const fn val(&self) -> u32 {
		match *self {
			Self::Single(val) | Self::Pair { kept: val, .. } => val,
		}
	}
}

impl fmt::Display for DieRoll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// A single roll is its plain numeric value. A pair shows both draws and the kept value.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{DieRoll, Mode};
	///
	/// assert_eq!(DieRoll::Single(4).to_string(), "4");
	/// assert_eq!(DieRoll::from_pair(Mode::Advantage, 4, 7).to_string(), "4,7→7");
	/// assert_eq!(DieRoll::from_pair(Mode::Disadvantage, 4, 7).to_string(), "4,7→4");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::Single(val) => write!(f, "{val}"),
			Self::Pair { first, second, kept } => write!(f, "{first},{second}→{kept}"),
		}
	}
}

/// Representation of the result from rolling a [`RollSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct RollOutcome {
	/// Spec that was rolled to produce this
	pub spec: RollSpec,

	/// Each die position, in roll order
	pub rolls: Vec<DieRoll>,

	/// Modified sum for summed rolls, number of successes for success counts
	pub aggregate: Integer,

	/// Modifier for summed rolls, difficulty for success counts
	pub secondary: Integer,
}

impl RollOutcome {
	/// Aggregates a set of die rolls according to the roll spec's kind.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{DieRoll, Integer, Mode, RollOutcome, RollSpec};
	///
	/// let spec = RollSpec::sum(3, 6, Mode::Normal, 2);
	/// let outcome = RollOutcome::from_rolls(spec, vec![DieRoll::Single(1), DieRoll::Single(5), DieRoll::Single(6)]);
	/// assert_eq!(outcome.aggregate, Integer::from(14));
	/// assert_eq!(outcome.secondary, Integer::from(2));
	///
	/// let spec = RollSpec::success_count(3, 10, 6);
	/// let outcome = RollOutcome::from_rolls(spec, vec![DieRoll::Single(6), DieRoll::Single(5), DieRoll::Single(10)]);
	/// assert_eq!(outcome.aggregate, Integer::from(2));
	/// assert_eq!(outcome.secondary, Integer::from(6));
	/// ```
	#[must_use]
	pub fn from_rolls(spec: RollSpec, rolls: Vec<DieRoll>) -> Self {
		let (aggregate, secondary) = match &spec.kind {
			Kind::Sum { modifier } => {
				// At most u32::MAX dice of at most u32::MAX each, which can't overflow a u64
				let sum = rolls
					.iter()
					.fold(0_u64, |sum, roll| sum.saturating_add(u64::from(roll.val())));
				(&Integer::from(sum) + modifier, modifier.clone())
			}
			Kind::SuccessCount { difficulty } => {
				let successes = rolls
					.iter()
					.filter(|roll| Integer::from(roll.val()) >= *difficulty)
					.count();
				(
					Integer::from(u64::try_from(successes).unwrap_or(u64::MAX)),
					difficulty.clone(),
				)
			}
		};

		Self {
			spec,
			rolls,
			aggregate,
			secondary,
		}
	}

	/// Builds the chat message for this outcome, echoing `notation` as the text the user asked for.
	///
	/// `notation` is shown verbatim rather than re-rendered from the roll spec, so any trailing text the parser ignored
	/// still appears in the message.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{DieRoll, Mode, RollOutcome, RollSpec};
	///
	/// let spec = RollSpec::sum(3, 6, Mode::Normal, 2);
	/// let outcome = RollOutcome::from_rolls(spec, vec![DieRoll::Single(1), DieRoll::Single(5), DieRoll::Single(6)]);
	/// assert_eq!(outcome.describe("3d6+2"), "🎲 **3d6+2**: [1, 5, 6] +2 = **14**");
	///
	/// let spec = RollSpec::success_count(2, 10, 6);
	/// let outcome = RollOutcome::from_rolls(spec, vec![DieRoll::Single(7), DieRoll::Single(2)]);
	/// assert_eq!(outcome.describe("2d10cd6"), "🎲 **2d10cd6**: [7, 2] (CD 6) = **1 sucessos**");
	/// ```
	#[must_use]
	pub fn describe(&self, notation: &str) -> String {
		let rolls = self
			.rolls
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ");

		match self.spec.kind {
			Kind::SuccessCount { .. } => format!(
				"🎲 **{notation}**: [{rolls}] (CD {}) = **{} sucessos**",
				self.secondary, self.aggregate
			),
			Kind::Sum { .. } => format!(
				"🎲 **{notation}**: [{rolls}]{} = **{}**",
				signed(&self.secondary, " "),
				self.aggregate
			),
		}
	}
}

/// Renders a modifier after `sep` with an explicit sign, or nothing at all for zero.
fn signed(modifier: &Integer, sep: &str) -> String {
	if modifier.is_zero() {
		String::new()
	} else if modifier.is_negative() {
		format!("{sep}{modifier}")
	} else {
		format!("{sep}+{modifier}")
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The roll asks for more dice or sides than allowed, or for dice without sides.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{Error, Limits, RollSpec};
	///
	/// let err = RollSpec::new(1, 0).validate(&Limits::default()).unwrap_err();
	/// assert!(matches!(err, Error::OutOfRange { count: 1, sides: 0, .. }));
	/// ```
	#[error("{count}d{sides} is outside the allowed range (max {} dice with 1 to {} sides)", .limits.max_count, .limits.max_sides)]
	OutOfRange {
		/// Number of dice requested
		count: u32,

		/// Number of sides requested
		sides: u32,

		/// Limits that were exceeded
		limits: Limits,
	},
}
