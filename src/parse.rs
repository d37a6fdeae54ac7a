//! Parser generators for dice notation such as `3d6+2`, `1d20adv` and `5d10cd6`.
//!
//! All parsers expect input that has already been through [`normalize()`]. The notation parsers only need to match a
//! prefix of their input, while [`trigger()`] must match all of it.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::str::FromStr;

use chumsky::prelude::*;

use crate::dice::{Integer, Mode, RollSpec};

/// Parser extra shared by every parser in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Lowercases the input and strips every space from it. This must be done exactly once before parsing.
///
/// # Examples
/// ```
/// use rolld::parse::normalize;
///
/// assert_eq!(normalize("3D6 + 2"), "3d6+2");
/// assert_eq!(normalize(" 1d20 ADV "), "1d20adv");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
	input.to_lowercase().replace(' ', "")
}

/// Generates a parser for a run of one or more ASCII digits, leading zeros included. Other Unicode decimal digits
/// (such as fullwidth `１`) are not accepted.
fn digits<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
	any().filter(char::is_ascii_digit).repeated().at_least(1).to_slice()
}

/// Generates a parser for the shared `<count>d<sides>` head of every notation. Numbers too large for a `u32`
/// saturate, which validation will always reject.
fn dice_head<'src>() -> impl Parser<'src, &'src str, (u32, u32), Extra<'src>> + Clone {
	digits()
		.then_ignore(just('d'))
		.then(digits())
		.map(|(count, sides)| (saturating_u32(count), saturating_u32(sides)))
}

/// Generates a parser for success-counting dice like "5d10cd6".
pub fn success_count<'src>() -> impl Parser<'src, &'src str, RollSpec, Extra<'src>> + Clone {
	dice_head()
		.then_ignore(just("cd"))
		.then(digits())
		.map(|((count, sides), difficulty)| {
			RollSpec::success_count(count, sides, Integer::from_digits(false, difficulty))
		})
}

/// Generates a parser for summed dice like "3d6", "3d6+2" or "1d20adv-1".
///
/// The advantage tag is any run of the characters `a`, `d`, `v`, `|`, `i` and `s`. Only a tag of exactly `adv` or
/// `dis` changes the mode; every other tag (`a`, `dd`, `vs`, ...) is consumed and rolls normally.
pub fn general<'src>() -> impl Parser<'src, &'src str, RollSpec, Extra<'src>> + Clone {
	let tag = one_of("adv|is").repeated().to_slice().map(Mode::from_tag);
	let modifier = one_of("+-")
		.then(digits())
		.map(|(sign, digits)| Integer::from_digits(sign == '-', digits));

	dice_head()
		.then(tag)
		.then(modifier.or_not())
		.map(|(((count, sides), mode), modifier)| RollSpec::sum(count, sides, mode, modifier.unwrap_or_default()))
}

/// Generates a parser for either notation form. The success-count form is attempted first, since the general form
/// would otherwise match its `<count>d<sides>` head and stop before the `cd` suffix.
pub fn notation_part<'src>() -> impl Parser<'src, &'src str, RollSpec, Extra<'src>> + Clone {
	choice((success_count(), general()))
}

/// Generates a parser for either notation form that ignores anything after the notation
///
/// # Examples
/// ```
/// use chumsky::Parser;
/// use rolld::{dice::{Mode, RollSpec}, parse::notation};
///
/// let spec = notation().parse("3d6+2xyz").into_result().ok();
/// assert_eq!(spec, Some(RollSpec::sum(3, 6, Mode::Normal, 2)));
/// ```
pub fn notation<'src>() -> impl Parser<'src, &'src str, RollSpec, Extra<'src>> + Clone {
	notation_part().then_ignore(any().repeated())
}

/// Generates a parser that only accepts input consisting entirely of a notation, used to pick dice rolls out of
/// ordinary chat messages.
///
/// # Examples
/// ```
/// use chumsky::Parser;
/// use rolld::parse::trigger;
///
/// assert!(trigger().parse("3d6+2").into_result().is_ok());
/// assert!(trigger().parse("I have 3d6+2 apples").into_result().is_err());
/// assert!(trigger().parse("3d6+2 apples").into_result().is_err());
/// ```
pub fn trigger<'src>() -> impl Parser<'src, &'src str, RollSpec, Extra<'src>> + Clone {
	choice((
		success_count().then_ignore(end()),
		general().then_ignore(end()),
	))
}

/// Parses normalized input into a roll spec, returning [`None`] when it isn't dice notation.
///
/// # Examples
/// ```
/// use rolld::{dice::RollSpec, parse::parse_notation};
///
/// assert_eq!(parse_notation("5d10cd6"), Some(RollSpec::success_count(5, 10, 6)));
/// assert_eq!(parse_notation("hello"), None);
/// ```
#[must_use]
pub fn parse_notation(normalized: &str) -> Option<RollSpec> {
	notation().parse(normalized).into_result().ok()
}

/// Converts a run of digits to a `u32`, saturating at [`u32::MAX`].
fn saturating_u32(digits: &str) -> u32 {
	digits.parse().unwrap_or(u32::MAX)
}

/// Error from parsing notation text through [`FromStr`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
#[non_exhaustive]
pub struct Error {
	/// Details of all parser errors, joined together
	pub details: String,
}

impl FromStr for RollSpec {
	type Err = Error;

	/// Normalizes and parses notation text. Trailing text after the notation is ignored.
	///
	/// # Examples
	/// ```
	/// use rolld::dice::{Mode, RollSpec};
	///
	/// let spec: RollSpec = "1d20 ADV".parse()?;
	/// assert_eq!(spec, RollSpec::sum(1, 20, Mode::Advantage, 0));
	/// assert!("hello".parse::<RollSpec>().is_err());
	/// # Ok::<(), rolld::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = normalize(s);
		let result = notation().parse(normalized.as_str()).into_result().map_err(|errs| Error {
			details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
		});
		result
	}
}
