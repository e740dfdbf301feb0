use thiserror::Error;

/// A range string that does not have the canonical `"<start> - <end>"` shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
	/// The string is not two decimal integers separated by `" - "`.
	#[error("range `{input}` is not of the form `<start> - <end>`")]
	Malformed { input: String },

	/// One of the integers does not fit into an offset.
	#[error("range `{input}` contains an offset that is too large")]
	Overflow { input: String },

	/// The end of the range precedes its start.
	#[error("range `{input}` ends before it starts")]
	Inverted { input: String },
}

/// Offsets that do not describe a slice of the verse text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
	/// `start > end`.
	#[error("range {start} - {end} ends before it starts")]
	Inverted { start: usize, end: usize },

	/// The range reaches past the end of the text.
	#[error("range {start} - {end} exceeds text length {len}")]
	OutOfBounds { start: usize, end: usize, len: usize },

	/// The offset points between the two halves of a surrogate pair.
	#[error("offset {offset} splits a UTF-16 surrogate pair")]
	SplitsCharacter { offset: usize },

	/// A captured selection does not match the verse text at the computed offsets.
	#[error("selection `{selected}` does not match verse text `{found}` at {start} - {end}")]
	Mismatch {
		start: usize,
		end: usize,
		selected: String,
		found: String,
	},
}

/// Why an annotation's stored range could not be previewed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
	#[error(transparent)]
	Format(#[from] FormatError),
	#[error(transparent)]
	Range(#[from] RangeError),
}
