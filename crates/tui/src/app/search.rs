//! Verse search prompt.

use ayat_core::{ServiceCommand, Verse};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::{App, Overlay};
use crate::components::tables::HIGHLIGHT_SYMBOL;
use crate::components::{centered_rect, render_popup};
use crate::input::QueryInput;
use crate::style::Theme;

/// Longest verse excerpt shown next to a search hit, in columns.
const EXCERPT_WIDTH: usize = 40;

#[derive(Debug, Default)]
pub(crate) struct SearchPrompt<'a> {
	input: QueryInput<'a>,
	results: Vec<Verse>,
	state: ListState,
}

impl<'a> SearchPrompt<'a> {
	pub(crate) fn new() -> Self {
		let mut input = QueryInput::default();
		input.set_placeholder("verse key (2:255), Arabic text or sura name");
		Self {
			input,
			..Self::default()
		}
	}

	pub(crate) fn set_results(&mut self, results: Vec<Verse>) {
		self.state
			.select(if results.is_empty() { None } else { Some(0) });
		self.results = results;
	}

	pub(crate) fn selected(&self) -> Option<&Verse> {
		self.results.get(self.state.selected()?)
	}

	fn move_selection(&mut self, forward: bool) {
		if self.results.is_empty() {
			return;
		}
		let last = self.results.len() - 1;
		let next = match (self.state.selected(), forward) {
			(Some(current), true) => (current + 1).min(last),
			(Some(current), false) => current.saturating_sub(1),
			(None, _) => 0,
		};
		self.state.select(Some(next));
	}
}

impl<'a> App<'a> {
	pub(crate) fn open_search(&mut self) {
		self.overlay = Overlay::Search(SearchPrompt::new());
	}

	pub(crate) fn handle_search_key(&mut self, key: KeyEvent) {
		let Overlay::Search(prompt) = &mut self.overlay else {
			return;
		};
		match key.code {
			KeyCode::Esc => self.close_overlay(),
			KeyCode::Enter => {
				let Some(verse) = prompt.selected().cloned() else {
					return;
				};
				self.close_overlay();
				self.show_verse(verse);
			}
			KeyCode::Up => prompt.move_selection(false),
			KeyCode::Down => prompt.move_selection(true),
			_ => {
				if !prompt.input.input(key) {
					return;
				}
				let query = prompt.input.text().trim().to_string();
				if query.is_empty() {
					prompt.set_results(Vec::new());
				} else {
					self.service.send(ServiceCommand::SearchVerses { query });
				}
			}
		}
	}
}

fn excerpt(text: &str) -> String {
	if text.width() <= EXCERPT_WIDTH {
		return text.to_string();
	}
	let mut out = String::new();
	for c in text.chars() {
		if out.width() + c.to_string().width() >= EXCERPT_WIDTH {
			break;
		}
		out.push(c);
	}
	out.push('…');
	out
}

pub(crate) fn render_search(
	frame: &mut Frame,
	area: Rect,
	prompt: &mut SearchPrompt<'_>,
	theme: &Theme,
) {
	let popup = centered_rect(area, 70, 18);
	let inner = render_popup(frame, popup, "Go to verse", theme);
	let [input_area, list_area, hints] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Fill(1),
		Constraint::Length(1),
	])
	.areas(inner);

	prompt.input.render_textarea(frame, input_area);

	let items = prompt
		.results
		.iter()
		.map(|verse| {
			ListItem::new(Line::from(vec![
				Span::styled(format!("{:<16}", verse.label()), theme.header),
				Span::raw(" "),
				Span::raw(excerpt(&verse.aya_text)),
			]))
		})
		.collect::<Vec<_>>();
	let list = List::new(items)
		.highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(list, list_area, &mut prompt.state);

	frame.render_widget(
		Paragraph::new(Span::styled("Enter open · Esc cancel", theme.empty_style())),
		hints,
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn long_verses_are_cut_with_an_ellipsis() {
		let text = "a".repeat(60);
		let cut = excerpt(&text);
		assert!(cut.ends_with('…'));
		assert!(cut.width() <= EXCERPT_WIDTH);
		assert_eq!(excerpt("short"), "short");
	}

	#[test]
	fn results_select_the_first_hit() {
		let mut prompt = SearchPrompt::new();
		prompt.set_results(vec![Verse::new("1:1", "a"), Verse::new("1:2", "b")]);
		assert_eq!(prompt.selected().map(|v| v.key.as_str()), Some("1:1"));
		prompt.move_selection(true);
		assert_eq!(prompt.selected().map(|v| v.key.as_str()), Some("1:2"));
		prompt.set_results(Vec::new());
		assert!(prompt.selected().is_none());
	}
}
