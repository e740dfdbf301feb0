use ratatui::style::{Color, Style};

/// A theme containing styles for various UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Style for header elements.
	pub header: Style,
	/// Style for highlighted rows.
	pub row_highlight: Style,
	/// Style for prompt elements.
	pub prompt: Style,
	/// Style for empty states.
	pub empty: Style,
	/// Style for highlighted elements.
	pub highlight: Style,
	/// The user's pending selection in the verse pane.
	pub selection: Style,
	/// A saved annotation's range while it is hovered.
	pub preview: Style,
	/// Status line messages for failures.
	pub error: Style,
}

impl Theme {
	/// Returns the style for inactive tabs.
	#[must_use]
	pub fn tab_inactive_style(&self) -> Style {
		Style::new()
			.fg(self.header.fg.unwrap_or(Color::Reset))
			.bg(self.row_highlight.bg.unwrap_or(Color::Reset))
	}

	/// Returns the style for highlighted tabs.
	#[must_use]
	pub fn tab_highlight_style(&self) -> Style {
		Style::new().bg(self.header.bg.unwrap_or(Color::Reset))
	}

	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}
}

/// A compiled-in theme and the names it answers to.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
	pub name: &'static str,
	pub aliases: &'static [&'static str],
	pub theme: Theme,
}

impl ThemeDefinition {
	pub(crate) fn matches(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
			|| self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
	}
}
