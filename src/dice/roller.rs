//! Abstractions for rolling [`RollSpec`]s using various means.

use alloc::vec::Vec;
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{DieRoll, RollOutcome, RollSpec};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die, producing a value in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Rolls every die of a spec and aggregates the result.
	///
	/// Paired modes draw the first value for every die, then the second value for every die, pairing them up by
	/// position. The roll spec is expected to have been validated beforehand.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{roller::{Iter as IterRoller, Roller}, Mode, RollSpec};
	///
	/// let mut roller = IterRoller::new([3, 18, 12, 9]);
	/// let outcome = roller.roll(&RollSpec::sum(2, 20, Mode::Advantage, 0));
	/// assert_eq!(outcome.rolls[0].to_string(), "3,12→12");
	/// assert_eq!(outcome.rolls[1].to_string(), "18,9→18");
	/// assert_eq!(outcome.aggregate.to_i64(), Some(30));
	/// ```
	fn roll(&mut self, spec: &RollSpec) -> RollOutcome
	where
		Self: Sized,
	{
		let firsts = (0..spec.count)
			.map(|_| self.roll_die(spec.sides))
			.collect::<Vec<_>>();

		let rolls = if spec.mode.is_paired() {
			let seconds = (0..spec.count)
				.map(|_| self.roll_die(spec.sides))
				.collect::<Vec<_>>();
			firsts
				.into_iter()
				.zip(seconds)
				.map(|(first, second)| DieRoll::from_pair(spec.mode, first, second))
				.collect()
		} else {
			firsts.into_iter().map(DieRoll::Single).collect()
		};

		RollOutcome::from_rolls(spec.clone(), rolls)
	}
}

impl<R: Roller + ?Sized> Roller for &mut R {
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		(**self).roll_die(sides)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use rolld::dice::{roller::{FastRand as FastRandRoller, Roller}, RollSpec};
///
/// let mut roller = FastRandRoller::default();
///
/// let spec = RollSpec::new(4, 6);
/// let outcome = roller.roll(&spec);
/// assert!(outcome.rolls.iter().all(|roll| (1..=6).contains(&roll.val())));
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use rolld::dice::{roller::{FastRand as FastRandRoller, Roller}, RollSpec};
///
/// let spec = RollSpec::new(4, 6);
/// let a = FastRandRoller::with_seed(0x750c38d574400).roll(&spec);
/// let b = FastRandRoller::with_seed(0x750c38d574400).roll(&spec);
/// assert_eq!(a, b);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		if sides > 0 {
			self.0.u32(1..=sides)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use rolld::dice::{roller::{Roller, Val as ValRoller}, RollSpec};
///
/// let mut roller = ValRoller(3);
///
/// let outcome = roller.roll(&RollSpec::success_count(4, 6, 3));
/// assert!(outcome.rolls.iter().all(|roll| roll.val() == 3));
/// assert_eq!(outcome.aggregate.to_i64(), Some(4));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use rolld::dice::{roller::{Max as MaxRoller, Roller}, RollSpec};
///
/// let mut roller = MaxRoller;
///
/// let outcome = roller.roll(&RollSpec::new(4, 6));
/// assert_eq!(outcome.aggregate.to_i64(), Some(24));
///
/// let outcome = roller.roll(&RollSpec::new(2, 20));
/// assert_eq!(outcome.aggregate.to_i64(), Some(40));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use rolld::dice::{roller::{Iter as IterRoller, Roller}, DieRoll, RollSpec};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let outcome = roller.roll(&RollSpec::new(5, 6));
/// assert_eq!(
/// 	outcome.rolls,
/// 	vec![DieRoll::Single(1), DieRoll::Single(2), DieRoll::Single(3), DieRoll::Single(4), DieRoll::Single(10)]
/// );
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
