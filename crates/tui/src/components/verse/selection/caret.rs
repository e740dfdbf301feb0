/// Keyboard caret and mouse drag over the verse, in UTF-16 offsets.
///
/// `anchor` is where the selection started and `focus` where it currently
/// ends; either may come first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Caret {
	anchor: Option<usize>,
	focus: usize,
	dragging: bool,
}

impl Caret {
	pub(crate) fn focus(&self) -> usize {
		self.focus
	}

	pub(crate) fn is_dragging(&self) -> bool {
		self.dragging
	}

	/// Move without selecting.
	pub(crate) fn move_to(&mut self, offset: usize) {
		self.anchor = None;
		self.focus = offset;
	}

	/// Move the focus, keeping or starting an anchor at the old position.
	pub(crate) fn extend_to(&mut self, offset: usize) {
		self.anchor.get_or_insert(self.focus);
		self.focus = offset;
	}

	pub(crate) fn start_drag(&mut self, offset: usize) {
		self.anchor = Some(offset);
		self.focus = offset;
		self.dragging = true;
	}

	pub(crate) fn drag_to(&mut self, offset: usize) -> bool {
		if !self.dragging {
			return false;
		}
		self.focus = offset;
		true
	}

	pub(crate) fn finish_drag(&mut self) -> bool {
		std::mem::replace(&mut self.dragging, false)
	}

	/// Collapse the selection onto the focus.
	pub(crate) fn collapse(&mut self) {
		self.anchor = None;
		self.dragging = false;
	}

	pub(crate) fn reset(&mut self) {
		*self = Self::default();
	}

	/// Ordered `(start, end)` of a non-empty selection.
	pub(crate) fn bounds(&self) -> Option<(usize, usize)> {
		let anchor = self.anchor?;
		match anchor.cmp(&self.focus) {
			std::cmp::Ordering::Less => Some((anchor, self.focus)),
			std::cmp::Ordering::Greater => Some((self.focus, anchor)),
			std::cmp::Ordering::Equal => None,
		}
	}
}
