use log::debug;

use super::error::RangeError;
use super::range::SelectionRange;
use crate::verse::{VerseText, utf16_len};

/// Position inside one rendered text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeOffset {
	/// Index of the text node in document order.
	pub node: usize,
	/// UTF-16 offset within that node.
	pub offset: usize,
}

/// A platform text selection as reported by whatever renders the verse.
///
/// The verse may be rendered as several text nodes (for example the
/// `before`/`between`/`after` spans of an active highlight). `nodes` holds the
/// content of each node in document order so offsets can be accumulated
/// across all of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSelection {
	pub nodes: Vec<String>,
	pub anchor: NodeOffset,
	pub text: String,
}

impl RawSelection {
	/// Selection inside a verse rendered as a single text node.
	pub fn single(node: impl Into<String>, offset: usize, text: impl Into<String>) -> Self {
		Self {
			nodes: vec![node.into()],
			anchor: NodeOffset { node: 0, offset },
			text: text.into(),
		}
	}

	/// Whether nothing is selected.
	#[must_use]
	pub fn is_collapsed(&self) -> bool {
		self.text.is_empty()
	}

	/// UTF-16 units of rendered text preceding the anchor node.
	#[must_use]
	pub fn preceding_len(&self) -> usize {
		self.nodes
			.iter()
			.take(self.anchor.node)
			.map(|node| utf16_len(node))
			.sum()
	}
}

/// Source of the current text selection, injected so the tracker never reaches
/// for ambient UI state.
pub trait SelectionProvider {
	fn current_selection(&self) -> Option<RawSelection>;
}

impl<F> SelectionProvider for F
where
	F: Fn() -> Option<RawSelection>,
{
	fn current_selection(&self) -> Option<RawSelection> {
		self()
	}
}

/// The selected substring and where it lives in the verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSpan {
	pub text: String,
	pub range: SelectionRange,
}

impl SelectedSpan {
	/// The canonical range string for this span.
	#[must_use]
	pub fn range_string(&self) -> String {
		self.range.to_string()
	}
}

/// Translate a platform selection into a span of the logical verse text.
///
/// Returns `Ok(None)` for an empty or collapsed selection. The start offset
/// counts every text node rendered before the anchor node, so highlight markup
/// around the verse does not shift the result. A selection that does not
/// match the verse text at the computed offsets is rejected.
pub fn capture_selection(
	verse: &VerseText,
	raw: &RawSelection,
) -> Result<Option<SelectedSpan>, RangeError> {
	if raw.is_collapsed() {
		return Ok(None);
	}

	let start = raw.preceding_len() + raw.anchor.offset;
	let range = SelectionRange::with_len(start, utf16_len(&raw.text));
	let found = verse.slice(range)?;
	if found != raw.text {
		return Err(RangeError::Mismatch {
			start: range.start(),
			end: range.end(),
			selected: raw.text.clone(),
			found: found.to_string(),
		});
	}

	debug!("captured selection {range} in verse {}", verse.key());
	Ok(Some(SelectedSpan {
		text: raw.text.clone(),
		range,
	}))
}
