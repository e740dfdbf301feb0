use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
	Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Scrollbar, ScrollbarOrientation,
	ScrollbarState, Table, TableState,
};

use crate::components::point_in_rect;
use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const TABLE_COLUMN_SPACING: u16 = 1;
/// Header row + separator height inside the table's viewport.
pub(crate) const TABLE_HEADER_ROWS: u16 = 2;

/// Fully materialized table configuration.
pub(crate) struct TableSpec<'a> {
	/// Column headers.
	pub(crate) headers: Vec<String>,
	/// Column width constraints.
	pub(crate) widths: Vec<Constraint>,
	/// Rendered table rows.
	pub(crate) rows: Vec<Row<'a>>,
	/// Optional title for the bordered table.
	pub(crate) title: Option<String>,
	/// Draw the border in the prompt colour.
	pub(crate) focused: bool,
}

/// Selection, scroll position and last drawn geometry of a table.
#[derive(Debug, Default)]
pub(crate) struct TableView {
	pub(crate) state: TableState,
	pub(crate) scrollbar: ScrollbarState,
	pub(crate) scrollbar_area: Option<Rect>,
	/// Where the data rows were drawn, below the header.
	pub(crate) body: Option<Rect>,
	pub(crate) len: usize,
}

impl TableView {
	pub(crate) fn selected(&self) -> Option<usize> {
		self.state.selected().filter(|&index| index < self.len)
	}

	pub(crate) fn select(&mut self, index: Option<usize>) {
		self.state.select(index.filter(|&index| index < self.len));
	}

	/// Data row drawn under a screen cell.
	pub(crate) fn row_at(&self, column: u16, row: u16) -> Option<usize> {
		let body = self.body?;
		if !point_in_rect(column, row, body) {
			return None;
		}
		let index = self.state.offset() + usize::from(row - body.y);
		(index < self.len).then_some(index)
	}

	pub(crate) fn contains(&self, column: u16, row: u16) -> bool {
		self.body.is_some_and(|body| point_in_rect(column, row, body))
	}
}

/// Render a bordered table with a header separator and, when the rows
/// overflow, a scrollbar on the right edge.
pub(crate) fn render_table(
	frame: &mut Frame,
	area: Rect,
	view: &mut TableView,
	spec: TableSpec<'_>,
	theme: &Theme,
) {
	view.scrollbar_area = None;
	view.body = None;
	view.len = spec.rows.len();

	let border_style = if spec.focused {
		theme.prompt
	} else {
		Style::default().fg(theme.header.fg.unwrap_or(Color::Reset))
	};
	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(border_style);
	if let Some(title) = spec.title.clone() {
		block = block.title(Span::styled(format!(" {title} "), theme.header));
	}

	let inner = block.inner(area);
	frame.render_widget(block, area);
	if inner.width == 0 || inner.height == 0 {
		return;
	}

	let header_style = Style::default().fg(theme.header.fg.unwrap_or(Color::Reset));
	let header = Row::new(spec.headers.into_iter().map(Cell::from).collect::<Vec<_>>())
		.style(header_style)
		.height(1)
		.bottom_margin(1);

	let mut widths = spec.widths;
	if widths.is_empty() {
		widths = vec![Constraint::Fill(1)];
	}

	let available_rows = usize::from(inner.height.saturating_sub(TABLE_HEADER_ROWS));
	let total_rows = view.len;
	let needs_scrollbar = total_rows > available_rows && available_rows > 0;

	let table_area = if needs_scrollbar {
		Rect {
			width: inner.width.saturating_sub(1),
			..inner
		}
	} else {
		inner
	};

	let table = Table::new(spec.rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(HighlightSpacing::Always)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, table_area, &mut view.state);

	if table_area.height > TABLE_HEADER_ROWS {
		view.body = Some(Rect {
			y: table_area.y + TABLE_HEADER_ROWS,
			height: table_area.height - TABLE_HEADER_ROWS,
			..table_area
		});
	}

	if needs_scrollbar {
		view.scrollbar = ScrollbarState::new(total_rows)
			.viewport_content_length(available_rows)
			.position(view.state.offset());
		render_scrollbar(frame, inner, view, theme);
	}

	render_header_separator(frame, table_area, theme);
}

fn render_scrollbar(frame: &mut Frame, area: Rect, view: &mut TableView, theme: &Theme) {
	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(Style::default().fg(theme.header.fg.unwrap_or(Color::Reset)));

	let track = Rect {
		x: area.x + area.width.saturating_sub(1),
		y: area.y + TABLE_HEADER_ROWS,
		width: 1,
		height: area.height.saturating_sub(TABLE_HEADER_ROWS),
	};
	view.scrollbar_area = Some(track);
	frame.render_stateful_widget(scrollbar, track, &mut view.scrollbar);
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height <= 1 {
		return;
	}
	let width = area.width as usize;
	if width == 0 {
		return;
	}

	let sep_rect = Rect {
		y: area.y + 1,
		height: 1,
		..area
	};
	if width <= 2 {
		frame.render_widget(Paragraph::new(" ".repeat(width)), sep_rect);
		return;
	}

	let middle_style = Style::default().fg(theme.header.fg.unwrap_or(Color::Reset));
	let spans = vec![
		Span::raw(" "),
		Span::styled("─".repeat(width - 2), middle_style),
		Span::raw(" "),
	];
	frame.render_widget(Paragraph::new(Text::from(Line::from(spans))), sep_rect);
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn draw(view: &mut TableView, rows: usize, height: u16) -> Terminal<TestBackend> {
		let theme = Theme::default();
		let mut terminal = Terminal::new(TestBackend::new(30, height)).expect("terminal");
		terminal
			.draw(|frame| {
				let spec = TableSpec {
					headers: vec!["Range".into()],
					widths: vec![Constraint::Fill(1)],
					rows: (0..rows).map(|i| Row::new(vec![i.to_string()])).collect(),
					title: Some("Grid".into()),
					focused: false,
				};
				render_table(frame, frame.area(), view, spec, &theme);
			})
			.expect("draw");
		terminal
	}

	#[test]
	fn clicks_map_to_rows_below_the_header() {
		let mut view = TableView::default();
		draw(&mut view, 3, 10);
		let body = view.body.expect("body");
		assert_eq!(body.y, 3);
		assert_eq!(view.row_at(body.x, body.y), Some(0));
		assert_eq!(view.row_at(body.x, body.y + 2), Some(2));
		assert_eq!(view.row_at(body.x, body.y + 3), None);
		assert_eq!(view.row_at(body.x, 1), None);
		assert!(view.scrollbar_area.is_none());
	}

	#[test]
	fn overflowing_rows_get_a_scrollbar() {
		let mut view = TableView::default();
		draw(&mut view, 20, 8);
		assert!(view.scrollbar_area.is_some());
		assert_eq!(view.len, 20);
	}

	#[test]
	fn selection_is_bounded_by_the_drawn_rows() {
		let mut view = TableView::default();
		draw(&mut view, 2, 8);
		view.select(Some(5));
		assert_eq!(view.selected(), None);
		view.select(Some(1));
		assert_eq!(view.selected(), Some(1));
	}
}
