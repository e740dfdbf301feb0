use ayat_core::ServiceCommand;
use log::{debug, warn};
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::state::{App, Focus, Overlay, Tab};
use crate::components::verse::selection::{ClipboardRoute, PaneSelection, copy_to_clipboard};

impl<'a> App<'a> {
	/// Process a keyboard event. Returns `true` when the user asked to quit.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('c') if ctrl => return true,
			KeyCode::Char('l') if ctrl => {
				self.logs.toggle();
				return false;
			}
			_ => {}
		}
		if self.logs.visible && self.logs.handle_key(key) {
			return false;
		}

		match self.overlay {
			Overlay::Form(_) => self.handle_form_key(key),
			Overlay::Templates(_) => self.handle_template_key(key),
			Overlay::Search(_) => self.handle_search_key(key),
			Overlay::ConfirmDelete(_) => self.handle_confirm_key(key),
			Overlay::None => match self.tab {
				Tab::Grid => self.handle_grid_key(key),
				Tab::Verse => return self.handle_verse_key(key),
			},
		}
		false
	}

	fn handle_verse_key(&mut self, key: KeyEvent) -> bool {
		let shift = key.modifiers.contains(KeyModifiers::SHIFT);
		match key.code {
			KeyCode::Esc | KeyCode::Char('q') => {
				if self.focus == Focus::Annotations {
					self.focus_verse();
				} else if self.display.selected().is_some() {
					self.clear_selection();
				} else {
					return true;
				}
			}
			KeyCode::Right if self.focus == Focus::Verse => {
				let offset = self.pane.layout.next_boundary(self.caret.focus());
				self.move_caret(offset, shift);
			}
			KeyCode::Left if self.focus == Focus::Verse => {
				let offset = self.pane.layout.previous_boundary(self.caret.focus());
				self.move_caret(offset, shift);
			}
			KeyCode::Home if self.focus == Focus::Verse => self.move_caret(0, shift),
			KeyCode::End if self.focus == Focus::Verse => {
				let end = self.display.verse().len();
				self.move_caret(end, shift);
			}
			KeyCode::Down | KeyCode::Char('j') => self.move_list_cursor(true),
			KeyCode::Up | KeyCode::Char('k') => self.move_list_cursor(false),
			KeyCode::Char('n') | KeyCode::Char(']') => self.navigate(true),
			KeyCode::Char('p') | KeyCode::Char('[') => self.navigate(false),
			KeyCode::Char('a') => self.open_annotation_form(),
			KeyCode::Char('t') => self.open_template_picker(),
			KeyCode::Char('e') if self.focus == Focus::Annotations => self.edit_selected_annotation(),
			KeyCode::Char('d') if self.focus == Focus::Annotations => self.confirm_delete(),
			KeyCode::Char('m') => self.cycle_manuscript(),
			KeyCode::Char('y') => self.copy_selection(),
			KeyCode::Char('/') => self.open_search(),
			KeyCode::Tab => self.toggle_tab(),
			_ => {}
		}
		false
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
		if !matches!(self.overlay, Overlay::None) || self.tab != Tab::Verse {
			return;
		}

		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => {
				if let Some(offset) = self.pane.offset_at(mouse.column, mouse.row, false) {
					self.focus_verse();
					self.caret.start_drag(offset);
					self.capture_selection();
				} else if let Some(row) = self.annotations.entry_at(mouse.column, mouse.row) {
					self.focus = Focus::Annotations;
					self.annotations.select(Some(row));
					self.preview_selected_annotation();
				}
			}
			MouseEventKind::Drag(MouseButton::Left) if self.caret.is_dragging() => {
				if let Some(offset) = self.pane.offset_at(mouse.column, mouse.row, true)
					&& self.caret.drag_to(offset)
				{
					self.capture_selection();
				}
			}
			MouseEventKind::Up(MouseButton::Left) => {
				if self.caret.finish_drag() {
					self.capture_selection();
				}
			}
			MouseEventKind::Moved => self.hover(mouse.column, mouse.row),
			MouseEventKind::ScrollDown if self.annotations.view.contains(mouse.column, mouse.row) => {
				self.move_list_cursor(true);
			}
			MouseEventKind::ScrollUp if self.annotations.view.contains(mouse.column, mouse.row) => {
				self.move_list_cursor(false);
			}
			_ => {}
		}
	}

	/// Preview an annotation while the pointer rests on it.
	fn hover(&mut self, column: u16, row: u16) {
		if self.focus == Focus::Annotations {
			return;
		}
		match self.annotations.entry_at(column, row) {
			Some(row) => {
				if let Some(annotation) = self.annotations.annotation(row)
					&& let Err(err) = self.display.hover_annotation(&annotation.annotated_range)
				{
					debug!("cannot preview {:?}: {err}", annotation.annotated_range);
				}
			}
			None => self.display.leave_annotation(),
		}
	}

	fn move_caret(&mut self, offset: usize, extend: bool) {
		if extend {
			self.caret.extend_to(offset);
		} else {
			self.caret.move_to(offset);
		}
		self.capture_selection();
	}

	/// Hand the pane's current selection to the tracker.
	pub(crate) fn capture_selection(&mut self) {
		let provider = PaneSelection::new(
			self.display.segments(),
			self.display.verse(),
			self.caret.bounds(),
		);
		match self.display.capture(&provider) {
			Ok(Some(span)) => {
				debug!("selected {:?} at {}", span.text, span.range);
				self.status.clear();
			}
			Ok(None) => {}
			Err(err) => {
				warn!("selection rejected: {err}");
				self.status.error(format!("Selection rejected: {err}"));
			}
		}
	}

	pub(crate) fn clear_selection(&mut self) {
		self.caret.collapse();
		self.display.clear_selection();
	}

	fn focus_verse(&mut self) {
		self.focus = Focus::Verse;
		self.annotations.select(None);
		self.display.leave_annotation();
	}

	/// Walk the annotation list; leaving it at the top hands focus back to
	/// the verse.
	fn move_list_cursor(&mut self, forward: bool) {
		if self.annotations.is_empty() {
			return;
		}
		match (self.focus, forward) {
			(Focus::Verse, true) => {
				self.focus = Focus::Annotations;
				self.annotations.select(None);
				self.annotations.select_next();
			}
			(Focus::Verse, false) => return,
			(Focus::Annotations, true) => {
				self.annotations.select_next();
			}
			(Focus::Annotations, false) => {
				if self.annotations.select_previous().is_none() {
					self.focus_verse();
					return;
				}
			}
		}
		self.preview_selected_annotation();
	}

	fn preview_selected_annotation(&mut self) {
		let Some(range) = self
			.annotations
			.selected_annotation()
			.map(|annotation| annotation.annotated_range.clone())
		else {
			self.display.leave_annotation();
			return;
		};
		if let Err(err) = self.display.hover_annotation(&range) {
			self.status
				.error(format!("Cannot preview range {range:?}: {err}"));
		}
	}

	fn navigate(&mut self, forward: bool) {
		let Some(current) = self.verse_key().map(str::to_string) else {
			return;
		};
		let command = if forward {
			ServiceCommand::NextVerse { current }
		} else {
			ServiceCommand::PreviousVerse { current }
		};
		self.service.send(command);
	}

	fn confirm_delete(&mut self) {
		if let Some(annotation) = self.annotations.selected_annotation().cloned() {
			self.overlay = Overlay::ConfirmDelete(annotation);
		}
	}

	fn handle_confirm_key(&mut self, key: KeyEvent) {
		let Overlay::ConfirmDelete(annotation) = &self.overlay else {
			return;
		};
		match key.code {
			KeyCode::Char('y') | KeyCode::Enter => {
				let command = ServiceCommand::DeleteAnnotation {
					verse_key: annotation.verse_id.clone(),
					annotation_id: annotation.annotation_id.clone(),
					manuscript_id: annotation.manuscript_id.clone(),
				};
				self.service.send(command);
				self.close_overlay();
			}
			KeyCode::Char('n') | KeyCode::Esc => self.close_overlay(),
			_ => {}
		}
	}

	fn copy_selection(&mut self) {
		let Some(span) = self.display.selected() else {
			self.status.error("Nothing selected to copy");
			return;
		};
		match copy_to_clipboard(&span.text) {
			Ok(ClipboardRoute::Tool(tool)) => self.status.info(format!("Copied with {tool}")),
			Ok(ClipboardRoute::Osc52) => self.status.info("Copied to the terminal clipboard"),
			Err(err) => self.status.error(format!("Copy failed: {err}")),
		}
	}

	/// Dismiss any overlay and let the tracker capture selections again.
	pub(crate) fn close_overlay(&mut self) {
		self.overlay = Overlay::None;
		self.display.close_popup();
	}
}
