//! Filter and bulk-edit tab.

use ayat_core::{Annotation, AnnotationField, AnnotationFilter, BulkEdit, ServiceCommand};
use log::info;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};

use super::state::{App, Tab};
use crate::components::{TableSpec, TableView, render_table};
use crate::input::QueryInput;
use crate::style::Theme;

/// Editable columns, after the read-only verse and manuscript columns.
const COLUMNS: [AnnotationField; 8] = AnnotationField::ALL;

#[derive(Debug)]
pub(crate) struct GridState<'a> {
	pub(crate) filter: QueryInput<'a>,
	pub(crate) filter_focused: bool,
	/// Cell editor; `Some` while a text cell is being changed.
	pub(crate) editing: Option<QueryInput<'a>>,
	pub(crate) edit: BulkEdit,
	pub(crate) view: TableView,
	pub(crate) column: usize,
	pub(crate) last_filter: Option<AnnotationFilter>,
}

impl Default for GridState<'_> {
	fn default() -> Self {
		let mut filter = QueryInput::default();
		filter.set_placeholder("field=value; field~partial   e.g. annotation_type=gloss; annotation~mercy");
		filter.set_focused(false);
		Self {
			filter,
			filter_focused: false,
			editing: None,
			edit: BulkEdit::default(),
			view: TableView::default(),
			column: 0,
			last_filter: None,
		}
	}
}

impl<'a> GridState<'a> {
	/// Show freshly filtered rows, dropping unsaved changes.
	pub(crate) fn load(&mut self, rows: Vec<Annotation>) {
		self.edit.load(rows);
		self.editing = None;
		self.view.len = self.edit.len();
		self.view
			.select(if self.edit.is_empty() { None } else { Some(0) });
	}

	pub(crate) fn clamp_cursor(&mut self) {
		self.view.len = self.edit.len();
		let row = self
			.view
			.state
			.selected()
			.map(|row| row.min(self.edit.len().saturating_sub(1)));
		self.view
			.select(if self.edit.is_empty() { None } else { row });
	}

	pub(crate) fn row(&self) -> Option<usize> {
		self.view.selected()
	}

	pub(crate) fn field(&self) -> AnnotationField {
		COLUMNS[self.column.min(COLUMNS.len() - 1)]
	}

	pub(crate) fn move_row(&mut self, forward: bool) {
		if self.edit.is_empty() {
			return;
		}
		let last = self.edit.len() - 1;
		let next = match (self.row(), forward) {
			(Some(row), true) => (row + 1).min(last),
			(Some(row), false) => row.saturating_sub(1),
			(None, _) => 0,
		};
		self.view.select(Some(next));
	}

	pub(crate) fn move_column(&mut self, forward: bool) {
		self.column = if forward {
			(self.column + 1).min(COLUMNS.len() - 1)
		} else {
			self.column.saturating_sub(1)
		};
	}

	/// Start editing the cell under the cursor; the flag column toggles instead.
	pub(crate) fn begin_edit(&mut self) -> bool {
		let Some(row) = self.row() else {
			return false;
		};
		let field = self.field();
		if field == AnnotationField::Flag {
			return self.edit.toggle_flag(row);
		}
		let Some(annotation) = self.edit.rows().get(row) else {
			return false;
		};
		self.editing = Some(QueryInput::new(annotation.field_text(field)));
		true
	}

	pub(crate) fn commit_edit(&mut self) -> bool {
		let (Some(input), Some(row)) = (self.editing.take(), self.row()) else {
			return false;
		};
		let field = self.field();
		self.edit.edit(row, field, input.text())
	}
}

impl<'a> App<'a> {
	pub(crate) fn toggle_tab(&mut self) {
		self.tab = match self.tab {
			Tab::Verse => Tab::Grid,
			Tab::Grid => Tab::Verse,
		};
		if self.tab == Tab::Grid {
			self.display.leave_annotation();
			if self.grid.last_filter.is_none() {
				self.grid.filter_focused = true;
				self.grid.filter.set_focused(true);
			}
		}
	}

	/// Parse the filter prompt and ask the service for matching rows.
	pub(crate) fn apply_grid_filter(&mut self) {
		let text = self.grid.filter.text().to_string();
		match AnnotationFilter::parse(&text) {
			Ok(filter) => {
				info!("filtering annotations with `{text}`");
				self.grid.last_filter = Some(filter.clone());
				self.grid.filter_focused = false;
				self.grid.filter.set_focused(false);
				self.service
					.send(ServiceCommand::FilterAnnotations { filter });
			}
			Err(err) => self.status.error(err.to_string()),
		}
	}

	pub(crate) fn save_grid(&mut self) {
		if !self.grid.edit.has_changes() {
			self.status.info("Nothing to save");
			return;
		}
		let changes = self.grid.edit.changes();
		info!(
			"saving {} updated and {} deleted annotation(s)",
			changes.updated_rows.len(),
			changes.deleted_rows.len()
		);
		self.service.send(ServiceCommand::SaveBulk { changes });
	}

	pub(crate) fn handle_grid_key(&mut self, key: KeyEvent) {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

		if let Some(input) = self.grid.editing.as_mut() {
			match key.code {
				KeyCode::Enter => {
					self.grid.commit_edit();
				}
				KeyCode::Esc => self.grid.editing = None,
				_ => {
					input.input(key);
				}
			}
			return;
		}

		if self.grid.filter_focused {
			match key.code {
				KeyCode::Enter => self.apply_grid_filter(),
				KeyCode::Esc => {
					self.grid.filter_focused = false;
					self.grid.filter.set_focused(false);
				}
				_ => {
					self.grid.filter.input(key);
				}
			}
			return;
		}

		match key.code {
			KeyCode::Char('s') if ctrl => self.save_grid(),
			KeyCode::Tab | KeyCode::Esc => self.toggle_tab(),
			KeyCode::Char('/') | KeyCode::Char('f') => {
				self.grid.filter_focused = true;
				self.grid.filter.set_focused(true);
			}
			KeyCode::Char('r') => {
				if let Some(filter) = self.grid.last_filter.clone() {
					self.service
						.send(ServiceCommand::FilterAnnotations { filter });
				}
			}
			KeyCode::Up | KeyCode::Char('k') => self.grid.move_row(false),
			KeyCode::Down | KeyCode::Char('j') => self.grid.move_row(true),
			KeyCode::Left | KeyCode::Char('h') => self.grid.move_column(false),
			KeyCode::Right | KeyCode::Char('l') => self.grid.move_column(true),
			KeyCode::Enter | KeyCode::Char('e') => {
				self.grid.begin_edit();
			}
			KeyCode::Char(' ') => {
				if let Some(row) = self.grid.row() {
					self.grid.edit.toggle_flag(row);
				}
			}
			KeyCode::Char('x') | KeyCode::Delete => {
				if let Some(row) = self.grid.row() {
					self.grid.edit.toggle_deleted(row);
				}
			}
			_ => {}
		}
	}
}

pub(crate) fn render_grid(frame: &mut Frame, area: Rect, grid: &mut GridState<'_>, theme: &Theme) {
	let [filter_area, table_area, editor_area] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Fill(1),
		Constraint::Length(1),
	])
	.areas(area);

	let [label, input] =
		Layout::horizontal([Constraint::Length(8), Constraint::Fill(1)]).areas(filter_area);
	let label_style = if grid.filter_focused {
		theme.prompt
	} else {
		theme.empty_style()
	};
	frame.render_widget(Paragraph::new(Span::styled("Filter ", label_style)), label);
	grid.filter.render_textarea(frame, input);

	let cursor = grid.row().map(|row| (row, grid.column));
	let rows = grid
		.edit
		.rows()
		.iter()
		.enumerate()
		.map(|(index, annotation)| grid_row(&grid.edit, index, annotation, cursor, theme))
		.collect::<Vec<_>>();

	let mut headers = vec!["Verse".to_string(), "MS".to_string()];
	headers.extend(COLUMNS.iter().map(|field| field.label().to_string()));
	let mut widths = vec![Constraint::Length(7), Constraint::Length(4)];
	widths.extend(COLUMNS.iter().map(|field| match field {
		AnnotationField::AnnotatedRange => Constraint::Length(9),
		AnnotationField::Language => Constraint::Length(8),
		AnnotationField::Flag => Constraint::Length(4),
		_ => Constraint::Fill(1),
	}));

	let pending = if grid.edit.has_changes() { " (unsaved)" } else { "" };
	let spec = TableSpec {
		headers,
		widths,
		rows,
		title: Some(format!("Annotations {}{pending}", grid.edit.len())),
		focused: !grid.filter_focused && grid.editing.is_none(),
	};
	render_table(frame, table_area, &mut grid.view, spec, theme);

	match &grid.editing {
		Some(editor) => {
			let [label, input] =
				Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(editor_area);
			frame.render_widget(
				Paragraph::new(Span::styled(format!("{}: ", grid.field().label()), theme.prompt)),
				label,
			);
			editor.render_textarea(frame, input);
		}
		None => {
			let hints = "/ filter · ←→↑↓ move · Enter edit · Space flag · x delete · Ctrl+S save · r reload · Tab back";
			frame.render_widget(
				Paragraph::new(Line::from(Span::styled(hints, theme.empty_style()))),
				editor_area,
			);
		}
	}
}

fn grid_row<'a>(
	edit: &BulkEdit,
	index: usize,
	annotation: &'a Annotation,
	cursor: Option<(usize, usize)>,
	theme: &Theme,
) -> Row<'a> {
	let mut cells = vec![
		Cell::from(annotation.verse_id.as_str()),
		Cell::from(annotation.manuscript_id.as_str()),
	];
	cells.extend(COLUMNS.iter().enumerate().map(|(column, field)| {
		let text = match field {
			AnnotationField::Flag => {
				if annotation.flag {
					"⚑".to_string()
				} else {
					String::new()
				}
			}
			_ => annotation.field_text(*field),
		};
		let mut style = Style::default();
		if edit.is_edited(index, *field) {
			style = style.patch(theme.highlight);
		}
		if cursor == Some((index, column)) {
			style = style.add_modifier(Modifier::REVERSED);
		}
		Cell::from(text).style(style)
	}));

	let row = Row::new(cells);
	if edit.is_deleted(index) {
		row.style(theme.error.add_modifier(Modifier::CROSSED_OUT))
	} else {
		row
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rows() -> Vec<Annotation> {
		(1..=3)
			.map(|id| Annotation {
				annotation_id: id.to_string(),
				manuscript_id: "1".into(),
				verse_id: "1:1".into(),
				annotation: format!("note {id}"),
				..Annotation::default()
			})
			.collect()
	}

	#[test]
	fn loading_selects_the_first_row() {
		let mut grid = GridState::default();
		grid.load(rows());
		assert_eq!(grid.row(), Some(0));
		grid.move_row(true);
		grid.move_row(true);
		grid.move_row(true);
		assert_eq!(grid.row(), Some(2));
	}

	#[test]
	fn editing_a_cell_records_the_change() {
		let mut grid = GridState::default();
		grid.load(rows());
		grid.column = 2;
		assert_eq!(grid.field(), AnnotationField::Annotation);
		assert!(grid.begin_edit());
		let editor = grid.editing.as_mut().expect("editor");
		assert_eq!(editor.text(), "note 1");
		editor.set_text("changed");
		assert!(grid.commit_edit());
		assert!(grid.editing.is_none());
		assert!(grid.edit.is_edited(0, AnnotationField::Annotation));
		assert_eq!(grid.edit.changes().updated_rows[0].annotation, "changed");
	}

	#[test]
	fn the_flag_column_toggles_instead_of_editing() {
		let mut grid = GridState::default();
		grid.load(rows());
		for _ in 0..10 {
			grid.move_column(true);
		}
		assert_eq!(grid.field(), AnnotationField::Flag);
		assert!(grid.begin_edit());
		assert!(grid.editing.is_none());
		assert!(grid.edit.rows()[0].flag);
	}

	#[test]
	fn committing_deletions_keeps_the_cursor_in_range() {
		let mut grid = GridState::default();
		grid.load(rows());
		grid.move_row(true);
		grid.move_row(true);
		grid.edit.toggle_deleted(2);
		grid.edit.commit();
		grid.clamp_cursor();
		assert_eq!(grid.edit.len(), 2);
		assert_eq!(grid.row(), Some(1));
	}
}
