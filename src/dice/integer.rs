//! Signed integers of any size, used for the numbers in a roll that are echoed back and added but never drawn.

use alloc::{string::ToString, vec::Vec};
use core::{
	cmp::Ordering,
	fmt::{self, Write},
	ops::Add,
};

/// Signed integer of any size, stored as its decimal digits.
///
/// Modifiers and difficulties may be written with any number of digits, and both the echoed value and the total have
/// to come out exact.
///
/// # Examples
/// ```
/// use rolld::dice::Integer;
///
/// let modifier = Integer::from_digits(false, "99999999999999999999");
/// assert_eq!((&modifier + &Integer::from(3)).to_string(), "100000000000000000002");
/// assert_eq!(Integer::from_digits(true, "007").to_string(), "-7");
/// assert_eq!(Integer::from_digits(true, "000"), Integer::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Integer {
	/// Whether the value is below zero, never set for zero
	negative: bool,

	/// Decimal digits of the magnitude, least significant first, with no trailing zeros (empty for zero)
	digits: Vec<u8>,
}

impl Integer {
	/// Zero
	pub const ZERO: Self = Self {
		negative: false,
		digits: Vec::new(),
	};

	/// Builds an integer from a sign and a run of decimal digits. Leading zeros are dropped and anything that isn't an
	/// ASCII digit is skipped.
	#[must_use]
	pub fn from_digits(negative: bool, digits: &str) -> Self {
		let digits = digits
			.chars()
			.rev()
			.filter_map(|ch| ch.to_digit(10).and_then(|digit| u8::try_from(digit).ok()))
			.collect();
		Self::normalized(negative, digits)
	}

	/// Strips the insignificant zeros and clears the sign of zero.
	fn normalized(negative: bool, mut digits: Vec<u8>) -> Self {
		while digits.last() == Some(&0) {
			digits.pop();
		}
		Self {
			negative: negative && !digits.is_empty(),
			digits,
		}
	}

	/// Checks whether this is zero.
	#[must_use]
	#[inline]
	pub fn is_zero(&self) -> bool {
		self.digits.is_empty()
	}

	/// Checks whether this is below zero.
	#[must_use]
	#[inline]
	pub const fn is_negative(&self) -> bool {
		self.negative
	}

	/// Converts to an `i64` if the value fits in one.
	#[must_use]
	pub fn to_i64(&self) -> Option<i64> {
		self.to_string().parse().ok()
	}

	/// Converts to a `u64` if the value fits in one.
	#[must_use]
	pub fn to_u64(&self) -> Option<u64> {
		self.to_string().parse().ok()
	}
}

/// Implements [`From`] for signed integer types.
macro_rules! impl_from_int {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for Integer {
				#[inline]
				fn from(val: $ty) -> Self {
					Self::from_digits(val < 0, &val.unsigned_abs().to_string())
				}
			}
		)+
	};
}

/// Implements [`From`] for unsigned integer types.
macro_rules! impl_from_uint {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for Integer {
				#[inline]
				fn from(val: $ty) -> Self {
					Self::from_digits(false, &val.to_string())
				}
			}
		)+
	};
}

impl_from_int!(i32, i64);
impl_from_uint!(u32, u64);

impl Ord for Integer {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.negative, other.negative) {
			(false, true) => Ordering::Greater,
			(true, false) => Ordering::Less,
			(false, false) => cmp_magnitudes(&self.digits, &other.digits),
			(true, true) => cmp_magnitudes(&other.digits, &self.digits),
		}
	}
}

impl PartialOrd for Integer {
	#[inline]
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Add for &Integer {
	type Output = Integer;

	fn add(self, rhs: Self) -> Integer {
		if self.negative == rhs.negative {
			return Integer::normalized(self.negative, add_magnitudes(&self.digits, &rhs.digits));
		}

		match cmp_magnitudes(&self.digits, &rhs.digits) {
			Ordering::Less => Integer::normalized(rhs.negative, sub_magnitudes(&rhs.digits, &self.digits)),
			Ordering::Equal | Ordering::Greater => {
				Integer::normalized(self.negative, sub_magnitudes(&self.digits, &rhs.digits))
			}
		}
	}
}

impl Add for Integer {
	type Output = Self;

	#[inline]
	fn add(self, rhs: Self) -> Self {
		&self + &rhs
	}
}

impl fmt::Display for Integer {
	/// Formats the value in plain decimal, with a leading `-` when negative.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.digits.is_empty() {
			return f.write_char('0');
		}
		if self.negative {
			f.write_char('-')?;
		}
		for &digit in self.digits.iter().rev() {
			f.write_char(char::from_digit(u32::from(digit), 10).ok_or(fmt::Error)?)?;
		}
		Ok(())
	}
}

/// Compares two normalized magnitudes.
fn cmp_magnitudes(a: &[u8], b: &[u8]) -> Ordering {
	a.len().cmp(&b.len()).then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Adds two magnitudes digit by digit.
#[expect(clippy::arithmetic_side_effects, reason = "Digits and carries stay below 20")]
fn add_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
	let len = a.len().max(b.len());
	let mut sum = Vec::with_capacity(len.saturating_add(1));
	let mut carry = 0;
	for idx in 0..len {
		let digit = a.get(idx).copied().unwrap_or(0) + b.get(idx).copied().unwrap_or(0) + carry;
		sum.push(digit % 10);
		carry = digit / 10;
	}
	if carry > 0 {
		sum.push(carry);
	}
	sum
}

/// Subtracts magnitude `b` from magnitude `a`, which must not be smaller.
#[expect(clippy::arithmetic_side_effects, reason = "Each digit is borrowed against before it can underflow")]
fn sub_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
	let mut borrow = 0;
	a.iter()
		.enumerate()
		.map(|(idx, &digit)| {
			let subtrahend = b.get(idx).copied().unwrap_or(0) + borrow;
			if digit >= subtrahend {
				borrow = 0;
				digit - subtrahend
			} else {
				borrow = 1;
				digit + 10 - subtrahend
			}
		})
		.collect()
}
