pub(crate) mod layout;

use layout::{split_screen, split_verse_tab};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::form::render_form;
use super::grid::render_grid;
use super::search::render_search;
use super::state::{App, Focus, Overlay, Tab};
use super::templates::render_templates;
use crate::components::annotations::annotation_summary;
use crate::components::verse::{VerseContext, render_verse};
use crate::components::{StatusContext, centered_rect, render_annotations, render_popup, render_status};

const VERSE_HINTS: &str =
	"←→ caret · Shift+←→ select · a annotate · t template · ↓ annotations · n/p verse · m manuscript · / search · Tab grid · q quit";
const LIST_HINTS: &str = "↑↓ move · e edit · d delete · Esc back to verse";

impl App<'_> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let areas = split_screen(frame.area(), self.logs.visible);

		self.render_header(frame, areas.header);
		match self.tab {
			Tab::Verse => self.render_verse_tab(frame, areas.body),
			Tab::Grid => render_grid(frame, areas.body, &mut self.grid, &self.style.theme),
		}
		if let Some(logs) = areas.logs {
			self.logs.render(frame, logs, &self.style.theme);
		}

		let hints = match (self.tab, self.focus) {
			(Tab::Grid, _) => "",
			(Tab::Verse, Focus::Verse) => VERSE_HINTS,
			(Tab::Verse, Focus::Annotations) => LIST_HINTS,
		};
		render_status(frame, areas.status, StatusContext {
			message: &self.status.message,
			is_error: self.status.is_error,
			hints,
			in_flight: self.service.in_flight(),
			throbber_state: &self.throbber_state,
			theme: &self.style.theme,
		});

		self.render_overlay(frame, areas.body);
	}

	fn render_header(&self, frame: &mut Frame, area: Rect) {
		let theme = &self.style.theme;
		let tab = |label: &'static str, active: bool| {
			let style = if active {
				theme.tab_highlight_style()
			} else {
				theme.tab_inactive_style()
			};
			Span::styled(format!(" {label} "), style)
		};
		let manuscript = self
			.active_manuscript()
			.map(|manuscript| manuscript.manuscript_name.clone())
			.unwrap_or_default();
		let line = Line::from(vec![
			tab("Verse", self.tab == Tab::Verse),
			tab("Grid", self.tab == Tab::Grid),
			Span::raw("  "),
			Span::styled(manuscript, theme.prompt),
		]);
		frame.render_widget(Paragraph::new(line), area);
	}

	fn render_verse_tab(&mut self, frame: &mut Frame, area: Rect) {
		if self.verse.is_none() {
			self.pane.area = None;
			let message = if self.pending_verse.is_some() {
				"Loading verse…"
			} else {
				"No verse loaded. Press / to search."
			};
			frame.render_widget(
				Paragraph::new(Span::styled(message, self.style.theme.empty_style()))
					.alignment(Alignment::Center),
				area,
			);
			return;
		}

		self.pane
			.relayout(self.display.verse(), area.width.saturating_sub(2));
		let (verse_area, list_area) = split_verse_tab(area, self.pane.layout.height());

		let title = self
			.verse
			.as_ref()
			.map(|verse| verse.label())
			.unwrap_or_default();
		let caret = (self.focus == Focus::Verse && matches!(self.overlay, Overlay::None))
			.then(|| self.caret.focus());
		render_verse(frame, verse_area, &mut self.pane, VerseContext {
			display: &self.display,
			title,
			caret,
			theme: &self.style.theme,
		});

		if self.annotations.is_empty() {
			self.annotations.view.body = None;
			frame.render_widget(
				Paragraph::new(Span::styled(
					"No annotations on this verse",
					self.style.theme.empty_style(),
				))
				.alignment(Alignment::Center),
				list_area,
			);
		} else {
			render_annotations(
				frame,
				list_area,
				&mut self.annotations,
				self.focus == Focus::Annotations,
				&self.style.theme,
			);
		}
	}

	fn render_overlay(&mut self, frame: &mut Frame, area: Rect) {
		let theme = &self.style.theme;
		match &mut self.overlay {
			Overlay::None => {}
			Overlay::Form(form) => render_form(frame, area, form, &self.vocabulary, theme),
			Overlay::Templates(picker) => render_templates(frame, area, picker, theme),
			Overlay::Search(prompt) => render_search(frame, area, prompt, theme),
			Overlay::ConfirmDelete(annotation) => {
				let popup = centered_rect(area, 56, 6);
				let inner = render_popup(frame, popup, "Delete annotation?", theme);
				let text = vec![
					Line::from(format!(
						"{}  {}",
						annotation.annotated_range, annotation.annotated_object
					)),
					Line::from(annotation_summary(annotation)),
					Line::from(Span::styled("y delete · n keep", theme.empty_style())),
				];
				frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
			}
		}
	}
}
