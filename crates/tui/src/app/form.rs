//! Popup form for creating and editing annotations.

use ayat_core::{Annotation, AnnotationField, ServiceCommand, Template};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{App, Overlay, Vocabulary};
use crate::components::{centered_rect, render_popup};
use crate::input::QueryInput;
use crate::style::Theme;

const LABEL_WIDTH: u16 = 17;
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug)]
pub(crate) struct AnnotationForm<'a> {
	draft: Annotation,
	inputs: Vec<(AnnotationField, QueryInput<'a>)>,
	flag: bool,
	/// Index into `inputs`; one past the end is the flag.
	focus: usize,
}

impl<'a> AnnotationForm<'a> {
	pub(crate) fn new(draft: Annotation) -> Self {
		let inputs = AnnotationField::FORM
			.into_iter()
			.filter(|field| *field != AnnotationField::Flag)
			.map(|field| (field, QueryInput::new(draft.field_text(field))))
			.collect();
		let mut form = Self {
			flag: draft.flag,
			draft,
			inputs,
			focus: 0,
		};
		form.sync_focus();
		form
	}

	pub(crate) fn is_new(&self) -> bool {
		!self.draft.is_saved()
	}

	pub(crate) fn focused_field(&self) -> AnnotationField {
		self.inputs
			.get(self.focus)
			.map_or(AnnotationField::Flag, |(field, _)| *field)
	}

	pub(crate) fn focus_next(&mut self) {
		self.focus = (self.focus + 1) % (self.inputs.len() + 1);
		self.sync_focus();
	}

	pub(crate) fn focus_previous(&mut self) {
		let fields = self.inputs.len() + 1;
		self.focus = (self.focus + fields - 1) % fields;
		self.sync_focus();
	}

	pub(crate) fn toggle_flag(&mut self) {
		self.flag = !self.flag;
	}

	/// Type into the focused input. The flag reacts to space only.
	pub(crate) fn input(&mut self, key: KeyEvent) -> bool {
		match self.inputs.get_mut(self.focus) {
			Some((_, input)) => input.input(key),
			None if key.code == KeyCode::Char(' ') => {
				self.toggle_flag();
				true
			}
			None => false,
		}
	}

	pub(crate) fn text(&self, field: AnnotationField) -> &str {
		self.inputs
			.iter()
			.find(|(candidate, _)| *candidate == field)
			.map_or("", |(_, input)| input.text())
	}

	/// Known values for the focused field that extend what was typed.
	pub(crate) fn suggestions<'v>(&self, vocabulary: &'v Vocabulary) -> Vec<&'v str> {
		let source = match self.focused_field() {
			AnnotationField::Language => &vocabulary.languages,
			AnnotationField::Type => &vocabulary.types,
			_ => return Vec::new(),
		};
		let typed = self.text(self.focused_field()).to_lowercase();
		source
			.iter()
			.map(String::as_str)
			.filter(|value| value.to_lowercase().starts_with(&typed) && value.to_lowercase() != typed)
			.take(MAX_SUGGESTIONS)
			.collect()
	}

	/// Replace the focused input with its first suggestion.
	pub(crate) fn complete(&mut self, vocabulary: &Vocabulary) -> bool {
		let Some(first) = self.suggestions(vocabulary).first().map(|value| value.to_string()) else {
			return false;
		};
		match self.inputs.get_mut(self.focus) {
			Some((_, input)) => {
				input.set_text(first);
				true
			}
			None => false,
		}
	}

	/// The draft with the form's values applied.
	pub(crate) fn annotation(&self) -> Annotation {
		let mut annotation = self.draft.clone();
		for (field, input) in &self.inputs {
			if let Some(value) = annotation.field_mut(*field) {
				*value = input.text().trim().to_string();
			}
		}
		annotation.flag = self.flag;
		annotation
	}

	fn sync_focus(&mut self) {
		let focus = self.focus;
		for (index, (_, input)) in self.inputs.iter_mut().enumerate() {
			input.set_focused(index == focus);
		}
	}
}

impl<'a> App<'a> {
	/// Open the form for the pending selection.
	pub(crate) fn open_annotation_form(&mut self) {
		if !self.can_annotate() {
			self.status
				.error("Pick a manuscript with `m` before annotating; All Manuscripts is read only");
			return;
		}
		let (Some(verse_key), Some(manuscript)) = (
			self.verse_key().map(str::to_string),
			self.active_manuscript().cloned(),
		) else {
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
		let draft = Annotation::for_span(manuscript.manuscript_id, verse_key, &span);
		self.overlay = Overlay::Form(AnnotationForm::new(draft));
	}

	/// Open the form on the annotation under the list cursor.
	pub(crate) fn edit_selected_annotation(&mut self) {
		let Some(annotation) = self.annotations.selected_annotation().cloned() else {
			self.status.error("Move to an annotation in the list first");
			return;
		};
		self.display.leave_annotation();
		// the pending selection is not used when editing
		let _ = self.display.open_popup();
		self.caret.collapse();
		self.overlay = Overlay::Form(AnnotationForm::new(annotation));
	}

	pub(crate) fn handle_form_key(&mut self, key: KeyEvent) {
		let Overlay::Form(form) = &mut self.overlay else {
			return;
		};
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => {
				self.close_overlay();
				self.status.info("Annotation discarded");
			}
			KeyCode::Char('s') if ctrl => self.submit_form(false),
			KeyCode::Char('t') if ctrl => self.submit_form(true),
			KeyCode::Enter => self.submit_form(false),
			KeyCode::Char('n') if ctrl => {
				form.complete(&self.vocabulary);
			}
			KeyCode::Tab | KeyCode::Down => form.focus_next(),
			KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
			_ => {
				form.input(key);
			}
		}
	}

	fn submit_form(&mut self, as_template: bool) {
		let Overlay::Form(form) = &self.overlay else {
			return;
		};
		let annotation = form.annotation();
		if annotation.annotation.is_empty() {
			self.status.error("An annotation needs some text");
			return;
		}
		if as_template {
			let template = Template::from_annotation(String::new(), &annotation);
			self.service.send(ServiceCommand::SaveTemplate { template });
		}
		self.service.send(ServiceCommand::SaveAnnotation { annotation });
		self.close_overlay();
	}
}

/// Draw the annotation form centred over `area`.
pub(crate) fn render_form(
	frame: &mut Frame,
	area: Rect,
	form: &AnnotationForm<'_>,
	vocabulary: &Vocabulary,
	theme: &Theme,
) {
	let height = form.inputs.len() as u16 + 7;
	let popup = centered_rect(area, 72, height);
	let title = if form.is_new() {
		format!("New annotation {}", form.draft.annotated_range)
	} else {
		format!("Edit annotation {}", form.draft.annotated_range)
	};
	let inner = render_popup(frame, popup, &title, theme);

	let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
	constraints.extend(form.inputs.iter().map(|_| Constraint::Length(1)));
	constraints.extend([
		Constraint::Length(1),
		Constraint::Length(1),
		Constraint::Fill(1),
		Constraint::Length(1),
	]);
	let rows = Layout::vertical(constraints).split(inner);

	let object = Line::from(vec![
		Span::styled(format!("{:<width$}", "Text", width = LABEL_WIDTH as usize), theme.empty_style()),
		Span::raw(form.draft.annotated_object.clone()),
	]);
	frame.render_widget(Paragraph::new(object), rows[0]);

	for (index, (field, input)) in form.inputs.iter().enumerate() {
		let row = rows[index + 2];
		let [label, value] =
			Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(row);
		let label_style = if index == form.focus {
			theme.prompt.add_modifier(Modifier::BOLD)
		} else {
			theme.empty_style()
		};
		frame.render_widget(Paragraph::new(Span::styled(field.label(), label_style)), label);
		input.render_textarea(frame, value);
	}

	let flag_row = rows[form.inputs.len() + 2];
	let flag_style = if form.focused_field() == AnnotationField::Flag {
		theme.prompt.add_modifier(Modifier::BOLD)
	} else {
		theme.empty_style()
	};
	let mark = if form.flag { "[x]" } else { "[ ]" };
	frame.render_widget(
		Paragraph::new(Line::from(vec![
			Span::styled(
				format!("{:<width$}", AnnotationField::Flag.label(), width = LABEL_WIDTH as usize),
				flag_style,
			),
			Span::raw(mark),
		])),
		flag_row,
	);

	let suggestions = form.suggestions(vocabulary);
	if !suggestions.is_empty() {
		let line = Line::from(vec![
			Span::styled("Ctrl+N: ", theme.empty_style()),
			Span::styled(suggestions.join("  "), theme.highlight),
		]);
		frame.render_widget(Paragraph::new(line), rows[form.inputs.len() + 3]);
	}

	let hints = "Enter/Ctrl+S save · Ctrl+T save as template · Tab next field · Esc cancel";
	frame.render_widget(
		Paragraph::new(Span::styled(hints, theme.empty_style())),
		rows[rows.len() - 1],
	);
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

	fn draft() -> Annotation {
		Annotation {
			manuscript_id: "1".into(),
			verse_id: "1:1".into(),
			annotated_object: "بِسْمِ".into(),
			annotated_range: "0 - 6".into(),
			..Annotation::default()
		}
	}

	#[test]
	fn typed_values_land_in_the_annotation() {
		let mut form = AnnotationForm::new(draft());
		assert!(form.is_new());
		for c in "name".chars() {
			form.input(key(KeyCode::Char(c)));
		}
		form.focus_next();
		assert_eq!(form.focused_field(), AnnotationField::Language);
		form.input(key(KeyCode::Char('e')));
		form.input(key(KeyCode::Char('n')));

		let annotation = form.annotation();
		assert_eq!(annotation.annotation, "name");
		assert_eq!(annotation.annotation_language, "en");
		assert_eq!(annotation.annotated_range, "0 - 6");
		assert!(!annotation.flag);
	}

	#[test]
	fn space_toggles_the_flag_only_when_it_has_focus() {
		let mut form = AnnotationForm::new(draft());
		form.focus_previous();
		assert_eq!(form.focused_field(), AnnotationField::Flag);
		assert!(form.input(key(KeyCode::Char(' '))));
		assert!(form.annotation().flag);
		form.focus_next();
		assert_eq!(form.focused_field(), AnnotationField::Annotation);
	}

	#[test]
	fn completion_uses_the_manuscript_vocabulary() {
		let vocabulary = Vocabulary {
			manuscript_id: "1".into(),
			languages: vec!["ar".into(), "en".into(), "en-GB".into()],
			types: vec!["gloss".into()],
		};
		let mut form = AnnotationForm::new(draft());
		assert!(form.suggestions(&vocabulary).is_empty());

		form.focus_next();
		form.input(key(KeyCode::Char('e')));
		assert_eq!(form.suggestions(&vocabulary), vec!["en", "en-GB"]);
		assert!(form.complete(&vocabulary));
		assert_eq!(form.text(AnnotationField::Language), "en");
		assert_eq!(form.suggestions(&vocabulary), vec!["en-GB"]);
	}

	#[test]
	fn editing_keeps_the_identity_of_the_record() {
		let mut existing = draft();
		existing.annotation_id = "9".into();
		existing.annotation = "old".into();
		let form = AnnotationForm::new(existing);
		assert!(!form.is_new());
		assert_eq!(form.annotation().annotation_id, "9");
		assert_eq!(form.text(AnnotationField::Annotation), "old");
	}
}
