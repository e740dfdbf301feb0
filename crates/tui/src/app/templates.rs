//! Template picker: applies a stored template to the pending selection and
//! saves the result straight away.

use ayat_core::{SelectedSpan, ServiceCommand, Template};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::state::{App, Overlay};
use crate::components::tables::HIGHLIGHT_SYMBOL;
use crate::components::{centered_rect, render_popup};
use crate::input::QueryInput;
use crate::style::Theme;

#[derive(Debug)]
pub(crate) struct TemplatePicker<'a> {
	input: QueryInput<'a>,
	span: SelectedSpan,
	manuscript_id: String,
	templates: Vec<Template>,
	state: ListState,
	/// Order by last use instead of popularity.
	recent: bool,
}

impl<'a> TemplatePicker<'a> {
	pub(crate) fn new(span: SelectedSpan, manuscript_id: String) -> Self {
		let mut input = QueryInput::default();
		input.set_placeholder("filter templates");
		Self {
			input,
			span,
			manuscript_id,
			templates: Vec::new(),
			state: ListState::default(),
			recent: false,
		}
	}

	pub(crate) fn query(&self) -> &str {
		self.input.text()
	}

	pub(crate) fn set_templates(&mut self, templates: Vec<Template>) {
		self.state
			.select(if templates.is_empty() { None } else { Some(0) });
		self.templates = templates;
	}

	pub(crate) fn selected(&self) -> Option<&Template> {
		self.templates.get(self.state.selected()?)
	}

	pub(crate) fn move_selection(&mut self, forward: bool) {
		if self.templates.is_empty() {
			return;
		}
		let last = self.templates.len() - 1;
		let next = match (self.state.selected(), forward) {
			(Some(current), true) => (current + 1).min(last),
			(Some(current), false) => current.saturating_sub(1),
			(None, _) => 0,
		};
		self.state.select(Some(next));
	}

	fn request(&self) -> ServiceCommand {
		ServiceCommand::LoadTemplates {
			manuscript_id: self.manuscript_id.clone(),
			query: self.query().to_string(),
			recent: self.recent,
		}
	}
}

impl<'a> App<'a> {
	pub(crate) fn open_template_picker(&mut self) {
		if !self.can_annotate() {
			self.status
				.error("Pick a manuscript with `m` before annotating; All Manuscripts is read only");
			return;
		}
		let Some(manuscript) = self.active_manuscript().cloned() else {
			return;
		};
		if self.display.selected().is_none() {
			self.status.error("Select part of the verse first");
			return;
		}
		let Some(span) = self.display.open_popup() else {
			self.display.close_popup();
			return;
		};
		self.caret.collapse();
		let picker = TemplatePicker::new(span, manuscript.manuscript_id);
		self.service.send(picker.request());
		self.overlay = Overlay::Templates(picker);
	}

	pub(crate) fn handle_template_key(&mut self, key: KeyEvent) {
		let Overlay::Templates(picker) = &mut self.overlay else {
			return;
		};
		match key.code {
			KeyCode::Esc => {
				self.close_overlay();
				self.status.info("Template not applied");
			}
			KeyCode::Enter => self.apply_selected_template(),
			KeyCode::Up => picker.move_selection(false),
			KeyCode::Down => picker.move_selection(true),
			KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				picker.recent = !picker.recent;
				let request = picker.request();
				self.service.send(request);
			}
			_ => {
				if picker.input.input(key) {
					let request = picker.request();
					self.service.send(request);
				}
			}
		}
	}

	fn apply_selected_template(&mut self) {
		let Overlay::Templates(picker) = &self.overlay else {
			return;
		};
		let Some(template) = picker.selected() else {
			self.status.error("No template selected");
			return;
		};
		let Some(verse_key) = self.verse_key() else {
			return;
		};
		let annotation = template.annotate(picker.manuscript_id.clone(), verse_key, &picker.span);
		let command = ServiceCommand::ApplyTemplate {
			template_id: template.id.clone(),
			annotation,
		};
		self.service.send(command);
		self.close_overlay();
	}
}

pub(crate) fn render_templates(
	frame: &mut Frame,
	area: Rect,
	picker: &mut TemplatePicker<'_>,
	theme: &Theme,
) {
	let popup = centered_rect(area, 64, 16);
	let title = format!("Apply template to \"{}\"", picker.span.text);
	let inner = render_popup(frame, popup, &title, theme);
	let [prompt, list_area, hints] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Fill(1),
		Constraint::Length(1),
	])
	.areas(inner);

	picker.input.render_textarea(frame, prompt);

	if picker.templates.is_empty() {
		frame.render_widget(
			Paragraph::new(Span::styled("No templates", theme.empty_style())),
			list_area,
		);
	} else {
		let items = picker
			.templates
			.iter()
			.map(|template| ListItem::new(template.label()))
			.collect::<Vec<_>>();
		let list = List::new(items)
			.highlight_style(theme.row_highlight)
			.highlight_symbol(HIGHLIGHT_SYMBOL);
		frame.render_stateful_widget(list, list_area, &mut picker.state);
	}

	let order = if picker.recent { "recent" } else { "popular" };
	let line = Line::from(vec![Span::styled(
		format!("Enter apply · Ctrl+R order ({order}) · Esc cancel"),
		theme.empty_style(),
	)]);
	frame.render_widget(Paragraph::new(line), hints);
}

#[cfg(test)]
mod tests {
	use ayat_core::SelectionRange;

	use super::*;

	fn picker() -> TemplatePicker<'static> {
		let span = SelectedSpan {
			text: "salaam".into(),
			range: SelectionRange::with_len(0, 6),
		};
		TemplatePicker::new(span, "1".into())
	}

	fn template(id: &str) -> Template {
		Template {
			id: id.into(),
			annotation: format!("t{id}"),
			..Template::default()
		}
	}

	#[test]
	fn replies_select_the_first_template() {
		let mut picker = picker();
		assert!(picker.selected().is_none());
		picker.set_templates(vec![template("1"), template("2")]);
		assert_eq!(picker.selected().map(|t| t.id.as_str()), Some("1"));
		picker.move_selection(true);
		picker.move_selection(true);
		assert_eq!(picker.selected().map(|t| t.id.as_str()), Some("2"));
		picker.move_selection(false);
		assert_eq!(picker.selected().map(|t| t.id.as_str()), Some("1"));
	}

	#[test]
	fn requests_carry_query_and_order() {
		let mut picker = picker();
		picker.recent = true;
		match picker.request() {
			ServiceCommand::LoadTemplates {
				manuscript_id,
				query,
				recent,
			} => {
				assert_eq!(manuscript_id, "1");
				assert_eq!(query, "");
				assert!(recent);
			}
			other => panic!("unexpected {other:?}"),
		}
	}
}
