use std::fmt;
use std::str::FromStr;

use super::error::{FormatError, RangeError};

/// Separator between the two offsets of a serialized range.
pub const RANGE_SEPARATOR: &str = " - ";

/// Half-open `[start, end)` interval of UTF-16 code units into a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
	start: usize,
	end: usize,
}

impl SelectionRange {
	/// Build a range, rejecting `end < start`.
	pub fn new(start: usize, end: usize) -> Result<Self, RangeError> {
		if end < start {
			return Err(RangeError::Inverted { start, end });
		}
		Ok(Self { start, end })
	}

	/// Range starting at `start` and covering `len` code units.
	#[must_use]
	pub fn with_len(start: usize, len: usize) -> Self {
		Self {
			start,
			end: start.saturating_add(len),
		}
	}

	#[must_use]
	pub fn start(&self) -> usize {
		self.start
	}

	#[must_use]
	pub fn end(&self) -> usize {
		self.end
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Whether the code unit at `offset` falls inside the range.
	#[must_use]
	pub fn contains(&self, offset: usize) -> bool {
		offset >= self.start && offset < self.end
	}
}

impl fmt::Display for SelectionRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{RANGE_SEPARATOR}{}", self.start, self.end)
	}
}

impl FromStr for SelectionRange {
	type Err = FormatError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		parse_range(input)
	}
}

/// Render a range in its canonical `"<start> - <end>"` form.
#[must_use]
pub fn serialize_range(range: SelectionRange) -> String {
	range.to_string()
}

/// Parse the canonical `"<start> - <end>"` form.
///
/// Only ASCII digits are accepted on either side of the separator, with no
/// surrounding whitespace, sign, or extra separators.
pub fn parse_range(input: &str) -> Result<SelectionRange, FormatError> {
	let malformed = || FormatError::Malformed {
		input: input.to_string(),
	};

	let (start, end) = input.split_once(RANGE_SEPARATOR).ok_or_else(malformed)?;
	let start = parse_offset(start, input).ok_or_else(malformed)??;
	let end = parse_offset(end, input).ok_or_else(malformed)??;

	SelectionRange::new(start, end).map_err(|_| FormatError::Inverted {
		input: input.to_string(),
	})
}

/// `None` when `digits` is not a non-empty run of ASCII digits.
fn parse_offset(digits: &str, input: &str) -> Option<Result<usize, FormatError>> {
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	Some(digits.parse().map_err(|_| FormatError::Overflow {
		input: input.to_string(),
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_with_spaced_hyphen() {
		let range = SelectionRange::new(0, 4).expect("valid");
		assert_eq!(serialize_range(range), "0 - 4");
	}

	#[test]
	fn parses_canonical_form() {
		assert_eq!(parse_range("0 - 4"), Ok(SelectionRange::new(0, 4).expect("valid")));
		assert_eq!(parse_range("12 - 12").map(|r| r.is_empty()), Ok(true));
	}

	#[test]
	fn round_trips_a_spread_of_ranges() {
		for (start, end) in [(0, 0), (0, 1), (3, 17), (120, 4096), (usize::MAX, usize::MAX)] {
			let range = SelectionRange::new(start, end).expect("valid");
			assert_eq!(parse_range(&serialize_range(range)), Ok(range));
		}
	}

	#[test]
	fn rejects_missing_spaces() {
		assert!(matches!(parse_range("5-10"), Err(FormatError::Malformed { .. })));
	}

	#[test]
	fn rejects_non_canonical_variants() {
		for input in [
			"",
			" - ",
			"5 - ",
			" 5 - 10",
			"5 - 10 ",
			"5  - 10",
			"-5 - 10",
			"+5 - 10",
			"5 - 10 - 12",
			"five - ten",
			"٥ - ١٠",
		] {
			assert!(
				matches!(parse_range(input), Err(FormatError::Malformed { .. })),
				"{input:?} should be rejected"
			);
		}
	}

	#[test]
	fn rejects_inverted_ranges() {
		assert!(matches!(parse_range("10 - 5"), Err(FormatError::Inverted { .. })));
		assert_eq!(
			SelectionRange::new(10, 5),
			Err(RangeError::Inverted { start: 10, end: 5 })
		);
	}

	#[test]
	fn rejects_offsets_that_overflow() {
		let input = format!("0 - {}0", usize::MAX);
		assert!(matches!(parse_range(&input), Err(FormatError::Overflow { .. })));
	}
}
