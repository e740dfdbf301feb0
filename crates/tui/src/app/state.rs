//! Core state container for the terminal front-end.

use ayat_core::{
	Annotation, AnnotationResult, AnnotationService, Manuscript, ServiceCommand, Verse,
	VerseDisplay,
};
use log::{debug, info};
use serde::Serialize;
use throbber_widgets_tui::ThrobberState;

use super::ServiceLink;
use super::form::AnnotationForm;
use super::grid::GridState;
use super::search::SearchPrompt;
use super::templates::TemplatePicker;
use crate::components::AnnotationList;
use crate::components::verse::VersePane;
use crate::components::verse::selection::Caret;
use crate::logging::LogPane;
use crate::style::{StyleConfig, Theme};

/// Verse shown when nothing else is requested.
pub const DEFAULT_VERSE: &str = "1:1";

/// How an interactive session starts.
#[derive(Debug, Clone)]
pub struct SessionOptions {
	/// Manuscript to annotate; the first one the service lists otherwise.
	pub manuscript: Option<String>,
	/// Key of the first verse to display.
	pub verse: String,
	pub theme: Theme,
	pub show_logs: bool,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			manuscript: None,
			verse: DEFAULT_VERSE.to_string(),
			theme: Theme::default(),
			show_logs: false,
		}
	}
}

/// What happened during a session, reported when the UI exits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
	pub last_verse: Option<String>,
	pub verses_visited: usize,
	pub annotations_saved: usize,
	pub annotations_deleted: usize,
	pub templates_saved: usize,
	pub bulk_saves: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Focus {
	#[default]
	Verse,
	Annotations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Tab {
	#[default]
	Verse,
	Grid,
}

/// Modal layer drawn over the verse tab.
#[derive(Debug, Default)]
pub(crate) enum Overlay<'a> {
	#[default]
	None,
	Form(AnnotationForm<'a>),
	Templates(TemplatePicker<'a>),
	Search(SearchPrompt<'a>),
	ConfirmDelete(Annotation),
}

/// Values already used in a manuscript, offered while filling the form.
#[derive(Debug, Clone, Default)]
pub(crate) struct Vocabulary {
	pub(crate) manuscript_id: String,
	pub(crate) languages: Vec<String>,
	pub(crate) types: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Status {
	pub(crate) message: String,
	pub(crate) is_error: bool,
}

impl Status {
	pub(crate) fn info(&mut self, message: impl Into<String>) {
		self.message = message.into();
		self.is_error = false;
	}

	pub(crate) fn error(&mut self, message: impl Into<String>) {
		self.message = message.into();
		self.is_error = true;
	}

	pub(crate) fn clear(&mut self) {
		self.message.clear();
		self.is_error = false;
	}
}

impl<'a> Drop for App<'a> {
	fn drop(&mut self) {
		self.service.shutdown();
	}
}

/// Aggregate state shared across the terminal UI.
pub struct App<'a> {
	/// Current style and theme configuration.
	pub style: StyleConfig,
	pub(crate) service: ServiceLink,
	pub(crate) verse: Option<Verse>,
	pub(crate) display: VerseDisplay,
	pub(crate) caret: Caret,
	pub(crate) pane: VersePane,
	/// Starts with the aggregate pseudo-manuscript.
	pub(crate) manuscripts: Vec<Manuscript>,
	pub(crate) active_manuscript: usize,
	pub(crate) preferred_manuscript: Option<String>,
	pub(crate) annotation_groups: Vec<AnnotationResult>,
	pub(crate) annotations: AnnotationList,
	pub(crate) focus: Focus,
	pub(crate) tab: Tab,
	pub(crate) overlay: Overlay<'a>,
	pub(crate) grid: GridState<'a>,
	pub(crate) vocabulary: Vocabulary,
	pub(crate) status: Status,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) logs: LogPane,
	/// Verse requested at startup, resolved when the search reply arrives.
	pub(crate) pending_verse: Option<String>,
	pub(crate) outcome: SessionOutcome,
}

impl<'a> App<'a> {
	/// Start the service worker and request the initial verse and manuscripts.
	pub fn new<S>(service: S, options: SessionOptions) -> Self
	where
		S: AnnotationService + 'static,
	{
		let (tx, rx) = ayat_core::spawn(service);
		Self::with_link(ServiceLink::new(tx, rx), options)
	}

	pub(crate) fn with_link(service: ServiceLink, options: SessionOptions) -> Self {
		let mut app = Self {
			style: StyleConfig::with_theme(options.theme),
			service,
			verse: None,
			display: VerseDisplay::default(),
			caret: Caret::default(),
			pane: VersePane::default(),
			manuscripts: vec![Manuscript::all()],
			active_manuscript: 0,
			preferred_manuscript: options.manuscript,
			annotation_groups: Vec::new(),
			annotations: AnnotationList::default(),
			focus: Focus::default(),
			tab: Tab::default(),
			overlay: Overlay::default(),
			grid: GridState::default(),
			vocabulary: Vocabulary::default(),
			status: Status::default(),
			throbber_state: ThrobberState::default(),
			logs: LogPane::new(options.show_logs),
			pending_verse: Some(options.verse.clone()),
			outcome: SessionOutcome::default(),
		};
		app.service.send(ServiceCommand::LoadManuscripts);
		app.service.send(ServiceCommand::SearchVerses {
			query: options.verse,
		});
		app
	}

	pub(crate) fn verse_key(&self) -> Option<&str> {
		self.verse.as_ref().map(|verse| verse.key.as_str())
	}

	pub(crate) fn active_manuscript(&self) -> Option<&Manuscript> {
		self.manuscripts.get(self.active_manuscript)
	}

	/// New annotations need a concrete manuscript.
	pub(crate) fn can_annotate(&self) -> bool {
		self.active_manuscript()
			.is_some_and(|manuscript| !manuscript.is_all())
	}

	/// Replace the displayed verse. The tracker is reset before the new
	/// segments are computed, so no selection or preview carries over.
	pub(crate) fn show_verse(&mut self, verse: Verse) {
		info!("showing verse {}", verse.key);
		self.display.load_verse(verse.text());
		self.caret.reset();
		self.annotation_groups.clear();
		self.annotations.clear();
		self.focus = Focus::Verse;
		self.outcome.verses_visited += 1;
		self.outcome.last_verse = Some(verse.key.clone());
		self.service.send(ServiceCommand::LoadAnnotations {
			verse_key: verse.key.clone(),
		});
		self.verse = Some(verse);
	}

	/// Ask the service for the current verse's annotations again.
	pub(crate) fn reload_annotations(&mut self) {
		if let Some(verse_key) = self.verse_key().map(str::to_string) {
			self.service
				.send(ServiceCommand::LoadAnnotations { verse_key });
		}
	}

	/// Rebuild the list from the cached groups for the active manuscript.
	pub(crate) fn refresh_annotation_list(&mut self) {
		let active = self.active_manuscript().cloned();
		let groups = self
			.annotation_groups
			.iter()
			.filter(|group| match &active {
				Some(manuscript) if !manuscript.is_all() => {
					group.manuscript_id == manuscript.manuscript_id
				}
				_ => true,
			})
			.cloned()
			.collect();
		self.annotations.set_groups(groups);
		self.display.leave_annotation();
		if self.focus == Focus::Annotations && self.annotations.is_empty() {
			self.focus = Focus::Verse;
		}
	}

	/// Make `index` the active manuscript and fetch its vocabulary.
	pub(crate) fn activate_manuscript(&mut self, index: usize) {
		if index >= self.manuscripts.len() {
			return;
		}
		self.active_manuscript = index;
		let Some(manuscript) = self.active_manuscript().cloned() else {
			return;
		};
		debug!("active manuscript {}", manuscript.manuscript_id);
		self.status
			.info(format!("Manuscript: {}", manuscript.manuscript_name));
		self.refresh_annotation_list();
		if !manuscript.is_all() && self.vocabulary.manuscript_id != manuscript.manuscript_id {
			self.service.send(ServiceCommand::LoadVocabulary {
				manuscript_id: manuscript.manuscript_id,
			});
		}
	}

	pub(crate) fn cycle_manuscript(&mut self) {
		let next = (self.active_manuscript + 1) % self.manuscripts.len().max(1);
		self.activate_manuscript(next);
	}

	/// Session statistics collected so far.
	#[must_use]
	pub fn outcome(&self) -> &SessionOutcome {
		&self.outcome
	}
}
