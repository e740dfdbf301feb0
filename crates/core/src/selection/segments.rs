use super::error::RangeError;
use super::range::SelectionRange;
use crate::verse::VerseText;

/// Verse text split around the active highlight.
///
/// `before + between + after` always reproduces the verse text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplaySegments {
	pub before: String,
	pub between: String,
	pub after: String,
}

impl DisplaySegments {
	/// The segments in document order.
	#[must_use]
	pub fn parts(&self) -> [&str; 3] {
		[&self.before, &self.between, &self.after]
	}

	/// Reassemble the full text.
	#[must_use]
	pub fn joined(&self) -> String {
		self.parts().concat()
	}
}

/// Slice `verse` into `(verse[..start], verse[start..end], verse[end..])`.
///
/// Offsets are never clamped; out of range offsets are the caller's problem.
pub fn apply_highlight(
	verse: &VerseText,
	range: SelectionRange,
) -> Result<DisplaySegments, RangeError> {
	verse.check(range)?;
	let text = verse.as_str();
	let start = verse.byte_index(range.start())?;
	let end = verse.byte_index(range.end())?;

	Ok(DisplaySegments {
		before: text[..start].to_string(),
		between: text[start..end].to_string(),
		after: text[end..].to_string(),
	})
}

/// The whole verse as the `between` segment.
#[must_use]
pub fn clear_highlight(verse: &VerseText) -> DisplaySegments {
	DisplaySegments {
		before: String::new(),
		between: verse.as_str().to_string(),
		after: String::new(),
	}
}
