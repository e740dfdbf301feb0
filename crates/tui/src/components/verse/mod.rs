//! The verse pane: highlighted verse text plus the geometry needed to turn
//! clicks and caret moves back into offsets.

pub(crate) mod layout;
pub(crate) mod selection;

use ayat_core::selection::{HighlightState, VerseDisplay};
use ayat_core::verse::{VerseText, utf16_len};
use layout::VerseLayout;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::components::point_in_rect;
use crate::style::Theme;

/// Screen state of the verse pane between frames.
#[derive(Debug, Clone, Default)]
pub(crate) struct VersePane {
	pub(crate) area: Option<Rect>,
	pub(crate) layout: VerseLayout,
	key: String,
}

impl VersePane {
	/// Lay the verse out again if it or the available width changed.
	pub(crate) fn relayout(&mut self, verse: &VerseText, width: u16) {
		if self.key == verse.key() && self.layout.width() == width.max(1) && self.layout.len() == verse.len() {
			return;
		}
		self.key = verse.key().to_string();
		self.layout = VerseLayout::new(verse.as_str(), width);
	}

	/// Offset under a screen cell, clamped to the pane when `clamp` is set.
	pub(crate) fn offset_at(&self, column: u16, row: u16, clamp: bool) -> Option<usize> {
		let area = self.area?;
		if !clamp && !point_in_rect(column, row, area) {
			return None;
		}
		if row < area.y {
			return Some(0);
		}
		let local_column = column.saturating_sub(area.x);
		let local_row = row - area.y;
		Some(self.layout.offset_at(local_column, local_row))
	}
}

pub(crate) struct VerseContext<'a> {
	pub(crate) display: &'a VerseDisplay,
	pub(crate) title: String,
	pub(crate) caret: Option<usize>,
	pub(crate) theme: &'a Theme,
}

pub(crate) fn render_verse(frame: &mut Frame, area: Rect, pane: &mut VersePane, ctx: VerseContext<'_>) {
	let border_style = if ctx.caret.is_some() {
		ctx.theme.prompt
	} else {
		Style::default()
	};
	let block = Block::default()
		.borders(Borders::ALL)
		.border_type(BorderType::Rounded)
		.border_style(border_style)
		.title(Span::styled(format!(" {} ", ctx.title), ctx.theme.header));
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let verse = ctx.display.verse();
	pane.relayout(verse, inner.width);
	pane.area = Some(inner);

	let lines = highlighted_lines(ctx.display, &pane.layout, ctx.theme);
	frame.render_widget(Paragraph::new(lines), inner);

	if let Some(offset) = ctx.caret {
		let (column, row) = pane.layout.position_of(offset);
		if row < inner.height && column < inner.width {
			frame.set_cursor_position(Position::new(inner.x + column, inner.y + row));
		}
	}
}

/// Split each laid out line into spans at the highlight boundaries.
pub(crate) fn highlighted_lines(
	display: &VerseDisplay,
	layout: &VerseLayout,
	theme: &Theme,
) -> Vec<Line<'static>> {
	let segments = display.segments();
	let start = utf16_len(&segments.before);
	let end = start + utf16_len(&segments.between);
	let highlight = match display.state() {
		HighlightState::None => None,
		HighlightState::Selected => Some(theme.selection),
		HighlightState::AnnotationPreview => Some(theme.preview),
	};
	let text = display.verse().as_str();

	layout
		.lines()
		.iter()
		.map(|glyphs| {
			let mut spans: Vec<Span<'static>> = Vec::new();
			let mut run: Option<(usize, usize, bool)> = None;
			for glyph in glyphs {
				let lit = highlight.is_some() && glyph.start >= start && glyph.start < end;
				run = match run {
					Some((from, _, run_lit)) if run_lit == lit => Some((from, glyph.byte_end, lit)),
					Some((from, to, run_lit)) => {
						spans.push(styled(&text[from..to], run_lit.then_some(highlight).flatten()));
						Some((glyph.byte_start, glyph.byte_end, lit))
					}
					None => Some((glyph.byte_start, glyph.byte_end, lit)),
				};
			}
			if let Some((from, to, lit)) = run {
				spans.push(styled(&text[from..to], lit.then_some(highlight).flatten()));
			}
			Line::from(spans)
		})
		.collect()
}

fn styled(text: &str, style: Option<Style>) -> Span<'static> {
	match style {
		Some(style) => Span::styled(text.to_string(), style),
		None => Span::raw(text.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn display(text: &str) -> VerseDisplay {
		VerseDisplay::new(VerseText::new("1:1", text))
	}

	#[test]
	fn preview_is_drawn_as_its_own_span() {
		let theme = Theme::default();
		let mut display = display("salaam alaikum");
		display.hover_annotation("0 - 6").expect("preview");
		let layout = VerseLayout::new("salaam alaikum", 40);

		let lines = highlighted_lines(&display, &layout, &theme);
		assert_eq!(lines.len(), 1);
		let spans = &lines[0].spans;
		assert_eq!(spans.len(), 2);
		assert_eq!(spans[0].content, "salaam");
		assert_eq!(spans[0].style, theme.preview);
		assert_eq!(spans[1].content, " alaikum");
		assert_eq!(spans[1].style, Style::default());
	}

	#[test]
	fn unhighlighted_verse_is_a_single_plain_span_per_line() {
		let theme = Theme::default();
		let display = display("salaam alaikum");
		let layout = VerseLayout::new("salaam alaikum", 10);
		let lines = highlighted_lines(&display, &layout, &theme);
		assert_eq!(lines.len(), 2);
		assert!(lines.iter().all(|line| line.spans.len() == 1));
	}

	#[test]
	fn renders_into_a_bordered_pane_and_records_geometry() {
		let theme = Theme::default();
		let display = display("salaam alaikum");
		let mut pane = VersePane::default();
		let mut terminal = Terminal::new(TestBackend::new(20, 4)).expect("terminal");
		terminal
			.draw(|frame| {
				render_verse(frame, frame.area(), &mut pane, VerseContext {
					display: &display,
					title: "1:1".into(),
					caret: Some(0),
					theme: &theme,
				});
			})
			.expect("draw");

		assert_eq!(pane.area, Some(Rect::new(1, 1, 18, 2)));
		let buffer = terminal.backend().buffer();
		assert_eq!(buffer[(1, 1)].symbol(), "s");
		assert_eq!(pane.offset_at(3, 1, false), Some(2));
		assert_eq!(pane.offset_at(0, 0, false), None);
		assert_eq!(pane.offset_at(0, 0, true), Some(0));
	}
}
