use log::{debug, warn};

use super::capture::{SelectedSpan, SelectionProvider, capture_selection};
use super::error::{PreviewError, RangeError};
use super::range::{SelectionRange, parse_range};
use super::segments::{DisplaySegments, apply_highlight, clear_highlight};
use crate::verse::VerseText;

/// Which highlight is currently drawn over the verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
	#[default]
	None,
	/// The user's pending selection.
	Selected,
	/// An existing annotation's range while it is hovered.
	AnnotationPreview,
}

/// Selection and highlight state owned by a single verse display.
///
/// Every transition recomputes [`DisplaySegments`] before returning, so the
/// segments always describe the latest verse, selection and hover.
#[derive(Debug, Clone, Default)]
pub struct VerseDisplay {
	verse: VerseText,
	selected: Option<SelectedSpan>,
	preview: Option<SelectionRange>,
	popup_open: bool,
	segments: DisplaySegments,
}

impl VerseDisplay {
	pub fn new(verse: VerseText) -> Self {
		let segments = clear_highlight(&verse);
		Self {
			verse,
			selected: None,
			preview: None,
			popup_open: false,
			segments,
		}
	}

	#[must_use]
	pub fn verse(&self) -> &VerseText {
		&self.verse
	}

	/// Display a different verse, dropping any selection and preview first.
	pub fn load_verse(&mut self, verse: VerseText) {
		self.selected = None;
		self.preview = None;
		self.verse = verse;
		self.recompute();
	}

	/// Read the provider's current selection and make it the pending span.
	///
	/// Ignored while the annotation popup is open. An empty selection clears
	/// the pending span; so does a selection that cannot be mapped onto the
	/// verse, in which case the error is returned.
	pub fn capture(
		&mut self,
		provider: &impl SelectionProvider,
	) -> Result<Option<&SelectedSpan>, RangeError> {
		if self.popup_open {
			debug!("ignoring selection while the annotation popup is open");
			return Ok(None);
		}

		let captured = match provider.current_selection() {
			Some(raw) => capture_selection(&self.verse, &raw),
			None => Ok(None),
		};

		match captured {
			Ok(span) => {
				self.selected = span;
				self.recompute();
				Ok(self.selected.as_ref())
			}
			Err(err) => {
				self.selected = None;
				self.recompute();
				Err(err)
			}
		}
	}

	pub fn clear_selection(&mut self) {
		if self.selected.take().is_some() {
			self.recompute();
		}
	}

	/// Preview the stored range of a hovered annotation.
	///
	/// On failure no preview is shown and the pending selection is untouched.
	pub fn hover_annotation(&mut self, annotated_range: &str) -> Result<(), PreviewError> {
		let parsed = parse_range(annotated_range)
			.map_err(PreviewError::from)
			.and_then(|range| {
				self.verse.check(range)?;
				Ok(range)
			});

		match parsed {
			Ok(range) => {
				self.preview = Some(range);
				self.recompute();
				Ok(())
			}
			Err(err) => {
				self.leave_annotation();
				Err(err)
			}
		}
	}

	pub fn leave_annotation(&mut self) {
		if self.preview.take().is_some() {
			self.recompute();
		}
	}

	/// Open the annotation popup, handing over the pending selection.
	pub fn open_popup(&mut self) -> Option<SelectedSpan> {
		self.popup_open = true;
		let span = self.selected.take();
		self.recompute();
		span
	}

	pub fn close_popup(&mut self) {
		self.popup_open = false;
	}

	#[must_use]
	pub fn is_popup_open(&self) -> bool {
		self.popup_open
	}

	#[must_use]
	pub fn selected(&self) -> Option<&SelectedSpan> {
		self.selected.as_ref()
	}

	#[must_use]
	pub fn preview(&self) -> Option<SelectionRange> {
		self.preview
	}

	#[must_use]
	pub fn state(&self) -> HighlightState {
		if self.preview.is_some() {
			HighlightState::AnnotationPreview
		} else if self.selected.is_some() {
			HighlightState::Selected
		} else {
			HighlightState::None
		}
	}

	#[must_use]
	pub fn segments(&self) -> &DisplaySegments {
		&self.segments
	}

	fn active_range(&self) -> Option<SelectionRange> {
		self.preview
			.or_else(|| self.selected.as_ref().map(|span| span.range))
	}

	fn recompute(&mut self) {
		self.segments = match self.active_range() {
			Some(range) => apply_highlight(&self.verse, range).unwrap_or_else(|err| {
				warn!("dropping highlight for verse {}: {err}", self.verse.key());
				clear_highlight(&self.verse)
			}),
			None => clear_highlight(&self.verse),
		};
	}
}
