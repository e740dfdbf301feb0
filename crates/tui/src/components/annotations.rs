//! Annotations on the displayed verse, grouped under their manuscript.

use ayat_core::{Annotation, AnnotationResult};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row};

use super::tables::{TableSpec, TableView, render_table};
use crate::style::Theme;

const FLAG_MARKER: &str = "⚑ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnnotationRow {
	/// Manuscript heading; never selectable.
	Header { group: usize },
	Entry { group: usize, index: usize },
}

#[derive(Debug, Default)]
pub(crate) struct AnnotationList {
	groups: Vec<AnnotationResult>,
	rows: Vec<AnnotationRow>,
	pub(crate) view: TableView,
}

impl AnnotationList {
	/// Replace the listed annotations. Empty groups are skipped and the
	/// cursor is dropped.
	pub(crate) fn set_groups(&mut self, groups: Vec<AnnotationResult>) {
		self.groups = groups
			.into_iter()
			.filter(|group| !group.annotations.is_empty())
			.collect();
		self.rows.clear();
		for (group, result) in self.groups.iter().enumerate() {
			self.rows.push(AnnotationRow::Header { group });
			self.rows
				.extend((0..result.annotations.len()).map(|index| AnnotationRow::Entry { group, index }));
		}
		self.view.len = self.rows.len();
		self.view.select(None);
	}

	pub(crate) fn clear(&mut self) {
		self.set_groups(Vec::new());
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub(crate) fn annotation_count(&self) -> usize {
		self.groups.iter().map(|group| group.annotations.len()).sum()
	}

	pub(crate) fn rows(&self) -> &[AnnotationRow] {
		&self.rows
	}

	pub(crate) fn annotation(&self, row: usize) -> Option<&Annotation> {
		match self.rows.get(row)? {
			AnnotationRow::Entry { group, index } => self.groups.get(*group)?.annotations.get(*index),
			AnnotationRow::Header { .. } => None,
		}
	}

	pub(crate) fn selected_annotation(&self) -> Option<&Annotation> {
		self.annotation(self.view.selected()?)
	}

	/// Select an entry row; headers and out of range rows clear the cursor.
	pub(crate) fn select(&mut self, row: Option<usize>) -> Option<&Annotation> {
		let row = row.filter(|&row| self.annotation(row).is_some());
		self.view.select(row);
		self.selected_annotation()
	}

	pub(crate) fn select_next(&mut self) -> Option<&Annotation> {
		let start = self.view.selected().map_or(0, |row| row + 1);
		let next = (start..self.rows.len()).find(|&row| self.annotation(row).is_some());
		match next {
			Some(row) => self.select(Some(row)),
			None => self.selected_annotation(),
		}
	}

	pub(crate) fn select_previous(&mut self) -> Option<&Annotation> {
		let Some(current) = self.view.selected() else {
			return None;
		};
		let previous = (0..current).rev().find(|&row| self.annotation(row).is_some());
		self.select(previous)
	}

	/// Entry row under a screen cell.
	pub(crate) fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
		self.view
			.row_at(column, row)
			.filter(|&row| self.annotation(row).is_some())
	}
}

/// Short single-line summary of an annotation.
pub(crate) fn annotation_summary(annotation: &Annotation) -> String {
	let mut summary = annotation.annotation.clone();
	let details: Vec<&str> = [
		annotation.annotation_language.as_str(),
		annotation.annotation_type.as_str(),
	]
	.into_iter()
	.filter(|value| !value.is_empty())
	.collect();
	if !details.is_empty() {
		summary.push_str(&format!(" [{}]", details.join("/")));
	}
	summary
}

pub(crate) fn render_annotations(
	frame: &mut Frame,
	area: Rect,
	list: &mut AnnotationList,
	focused: bool,
	theme: &Theme,
) {
	let rows = list
		.rows()
		.iter()
		.map(|row| match *row {
			AnnotationRow::Header { group } => {
				let name = list
					.groups
					.get(group)
					.map(|group| group.manuscript_name.clone())
					.unwrap_or_default();
				Row::new(vec![Cell::from(Span::styled(
					name,
					theme.header.add_modifier(Modifier::BOLD),
				))])
			}
			AnnotationRow::Entry { group, index } => {
				let Some(annotation) = list
					.groups
					.get(group)
					.and_then(|group| group.annotations.get(index))
				else {
					return Row::default();
				};
				let marker = if annotation.flag { FLAG_MARKER } else { "" };
				Row::new(vec![
					Cell::from(annotation.annotated_range.clone()),
					Cell::from(annotation.annotated_object.clone()),
					Cell::from(format!("{marker}{}", annotation_summary(annotation))),
				])
			}
		})
		.collect::<Vec<_>>();

	let title = match list.annotation_count() {
		0 => "Annotations".to_string(),
		count => format!("Annotations ({count})"),
	};
	let spec = TableSpec {
		headers: vec!["Range".into(), "Text".into(), "Annotation".into()],
		widths: vec![
			Constraint::Length(9),
			Constraint::Percentage(30),
			Constraint::Fill(1),
		],
		rows,
		title: Some(title),
		focused,
	};
	render_table(frame, area, &mut list.view, spec, theme);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn annotation(id: &str, range: &str) -> Annotation {
		Annotation {
			annotation_id: id.into(),
			annotated_range: range.into(),
			annotation: format!("note {id}"),
			..Annotation::default()
		}
	}

	fn list() -> AnnotationList {
		let mut list = AnnotationList::default();
		list.set_groups(vec![
			AnnotationResult {
				manuscript_name: "Manuscript_1".into(),
				manuscript_id: "1".into(),
				annotations: vec![annotation("1", "0 - 6"), annotation("2", "7 - 14")],
			},
			AnnotationResult {
				manuscript_name: "Manuscript_2".into(),
				manuscript_id: "2".into(),
				annotations: Vec::new(),
			},
			AnnotationResult {
				manuscript_name: "Manuscript_3".into(),
				manuscript_id: "3".into(),
				annotations: vec![annotation("3", "0 - 3")],
			},
		]);
		list
	}

	#[test]
	fn empty_groups_get_no_heading() {
		let list = list();
		assert_eq!(list.rows().len(), 5);
		assert_eq!(list.annotation_count(), 3);
		assert_eq!(list.rows()[3], AnnotationRow::Header { group: 1 });
	}

	#[test]
	fn cursor_skips_headings() {
		let mut list = list();
		assert_eq!(list.select_next().map(|a| a.annotation_id.as_str()), Some("1"));
		assert_eq!(list.select_next().map(|a| a.annotation_id.as_str()), Some("2"));
		assert_eq!(list.select_next().map(|a| a.annotation_id.as_str()), Some("3"));
		// stays on the last entry
		assert_eq!(list.select_next().map(|a| a.annotation_id.as_str()), Some("3"));
		assert_eq!(list.select_previous().map(|a| a.annotation_id.as_str()), Some("2"));
		assert_eq!(list.select_previous().map(|a| a.annotation_id.as_str()), Some("1"));
		assert!(list.select_previous().is_none());
		assert!(list.selected_annotation().is_none());
	}

	#[test]
	fn headings_cannot_be_selected_directly() {
		let mut list = list();
		assert!(list.select(Some(0)).is_none());
		assert_eq!(list.select(Some(4)).map(|a| a.annotation_id.as_str()), Some("3"));
	}

	#[test]
	fn summary_lists_language_and_type() {
		let mut entry = annotation("1", "0 - 6");
		entry.annotation_language = "en".into();
		entry.annotation_type = "gloss".into();
		assert_eq!(annotation_summary(&entry), "note 1 [en/gloss]");
		entry.annotation_language.clear();
		assert_eq!(annotation_summary(&entry), "note 1 [gloss]");
	}
}
