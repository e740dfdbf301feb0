//! Single-line text input used by prompts, the annotation form and the grid.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

/// A [`TextArea`] restricted to one line.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
	focused: bool,
}

impl<'a> QueryInput<'a> {
	/// Create an input pre-filled with `initial`, cursor at the end.
	pub fn new(initial: impl Into<String>) -> Self {
		let mut input = Self {
			textarea: TextArea::default(),
			focused: true,
		};
		input.set_text(initial);
		input
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea.lines().first().map_or("", String::as_str)
	}

	/// Replace the contents, dropping newlines.
	pub fn set_text(&mut self, text: impl Into<String>) {
		let text: String = text.into().replace(['\n', '\r'], " ");
		let placeholder = self.textarea.placeholder_text().to_string();
		self.textarea = TextArea::new(vec![text]);
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.move_cursor(CursorMove::End);
		self.apply_styles();
	}

	pub fn clear(&mut self) {
		self.set_text("");
	}

	pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
		self.textarea.set_placeholder_text(placeholder);
	}

	/// Unfocused inputs hide their cursor.
	pub fn set_focused(&mut self, focused: bool) {
		self.focused = focused;
		self.apply_styles();
	}

	/// Feed a key press. Returns `true` when the text changed.
	///
	/// Keys that would insert a line break are ignored.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let newline = matches!(key.code, KeyCode::Enter)
			|| (key.modifiers.contains(KeyModifiers::CONTROL)
				&& matches!(key.code, KeyCode::Char('m' | 'j')));
		if newline {
			return false;
		}
		self.textarea.input(key)
	}

	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}

	fn apply_styles(&mut self) {
		self.textarea.set_cursor_line_style(Style::default());
		let cursor = if self.focused {
			Style::default().add_modifier(Modifier::REVERSED)
		} else {
			Style::default()
		};
		self.textarea.set_cursor_style(cursor);
	}
}

impl Default for QueryInput<'_> {
	fn default() -> Self {
		Self::new("")
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::{KeyEventKind, KeyEventState};

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent {
			code,
			modifiers: KeyModifiers::NONE,
			kind: KeyEventKind::Press,
			state: KeyEventState::NONE,
		}
	}

	#[test]
	fn typing_appends_at_the_cursor() {
		let mut input = QueryInput::new("1:");
		assert!(input.input(key(KeyCode::Char('7'))));
		assert_eq!(input.text(), "1:7");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "1:");
	}

	#[test]
	fn enter_never_adds_a_line() {
		let mut input = QueryInput::new("abc");
		assert!(!input.input(key(KeyCode::Enter)));
		assert_eq!(input.text(), "abc");
	}

	#[test]
	fn set_text_flattens_newlines() {
		let mut input = QueryInput::default();
		input.set_text("a\nb");
		assert_eq!(input.text(), "a b");
	}
}
