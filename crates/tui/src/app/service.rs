//! Link to the service worker and handling of its replies.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use ayat_core::{Manuscript, ServiceCommand, ServiceError, ServiceReply, Verse};
use log::{debug, warn};

use super::state::{App, Overlay};

/// Command channel to the worker plus a count of unanswered requests.
#[derive(Debug)]
pub(crate) struct ServiceLink {
	tx: Sender<ServiceCommand>,
	rx: Receiver<ServiceReply>,
	in_flight: usize,
}

impl ServiceLink {
	pub(crate) fn new(tx: Sender<ServiceCommand>, rx: Receiver<ServiceReply>) -> Self {
		Self { tx, rx, in_flight: 0 }
	}

	pub(crate) fn send(&mut self, command: ServiceCommand) -> bool {
		debug!("service request {command:?}");
		match self.tx.send(command) {
			Ok(()) => {
				self.in_flight += 1;
				true
			}
			Err(err) => {
				warn!("service worker is gone, dropped {:?}", err.0);
				false
			}
		}
	}

	pub(crate) fn in_flight(&self) -> usize {
		self.in_flight
	}

	pub(crate) fn try_recv(&mut self) -> Result<ServiceReply, TryRecvError> {
		let reply = self.rx.try_recv()?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Ok(reply)
	}

	pub(crate) fn shutdown(&self) {
		let _ = self.tx.send(ServiceCommand::Shutdown);
	}
}

impl<'a> App<'a> {
	/// Drain every reply waiting on the worker channel.
	pub(crate) fn pump_service_replies(&mut self) {
		loop {
			match self.service.try_recv() {
				Ok(reply) => self.handle_reply(reply),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					if self.service.in_flight() > 0 {
						self.status.error("Service worker stopped");
					}
					break;
				}
			}
		}
	}

	pub(crate) fn handle_reply(&mut self, reply: ServiceReply) {
		match reply {
			ServiceReply::Verses(result) => match result {
				Ok(verses) => self.receive_verses(verses),
				Err(err) => {
					self.pending_verse = None;
					self.report("Verse search failed", &err);
				}
			},
			ServiceReply::Navigated(result) => match result {
				Ok(Some(verse)) => self.show_verse(verse),
				Ok(None) => self.status.info("No further verse in that direction"),
				Err(err) => self.report("Navigation failed", &err),
			},
			ServiceReply::Manuscripts(result) => match result {
				Ok(manuscripts) => self.receive_manuscripts(manuscripts),
				Err(err) => self.report("Could not load manuscripts", &err),
			},
			ServiceReply::Annotations { verse_key, result } => {
				if self.verse_key() != Some(verse_key.as_str()) {
					debug!("discarding annotations for {verse_key}, no longer displayed");
					return;
				}
				match result {
					Ok(groups) => {
						self.annotation_groups = groups;
						self.refresh_annotation_list();
					}
					Err(err) => self.report("Could not load annotations", &err),
				}
			}
			ServiceReply::AnnotationSaved { verse_key, result } => match result {
				Ok(()) => {
					self.outcome.annotations_saved += 1;
					self.status.info(format!("Annotation saved on {verse_key}"));
					self.after_annotation_change(&verse_key);
				}
				Err(err) => self.report("Saving the annotation failed", &err),
			},
			ServiceReply::AnnotationDeleted { verse_key, result } => match result {
				Ok(true) => {
					self.outcome.annotations_deleted += 1;
					self.status.info("Annotation deleted");
					self.after_annotation_change(&verse_key);
				}
				Ok(false) => self.status.error("The service refused to delete the annotation"),
				Err(err) => self.report("Deleting the annotation failed", &err),
			},
			ServiceReply::Templates { query, result } => {
				let Overlay::Templates(picker) = &mut self.overlay else {
					debug!("template reply arrived after the picker closed");
					return;
				};
				if picker.query() != query {
					return;
				}
				match result {
					Ok(templates) => picker.set_templates(templates),
					Err(err) => self.report("Could not load templates", &err),
				}
			}
			ServiceReply::TemplateSaved(result) => match result {
				Ok(template) => {
					self.outcome.templates_saved += 1;
					self.status
						.info(format!("Annotation saved, template \"{}\" stored", template.label()));
				}
				Err(err) => self.report("Saving the template failed", &err),
			},
			ServiceReply::Vocabulary {
				manuscript_id,
				languages,
				types,
			} => {
				let active = self
					.active_manuscript()
					.is_some_and(|manuscript| manuscript.manuscript_id == manuscript_id);
				if !active {
					return;
				}
				self.vocabulary.manuscript_id = manuscript_id;
				match languages {
					Ok(languages) => self.vocabulary.languages = languages,
					Err(err) => warn!("could not load languages: {}", err.summary()),
				}
				match types {
					Ok(types) => self.vocabulary.types = types,
					Err(err) => warn!("could not load annotation types: {}", err.summary()),
				}
			}
			ServiceReply::Filtered(result) => match result {
				Ok(rows) => {
					self.status
						.info(format!("{} annotation(s) match the filter", rows.len()));
					self.grid.load(rows);
				}
				Err(err) => self.report("Filtering failed", &err),
			},
			ServiceReply::BulkSaved(result) => match result {
				Ok(()) => {
					self.outcome.bulk_saves += 1;
					self.grid.edit.commit();
					self.grid.clamp_cursor();
					self.status.info("Bulk changes saved");
					self.reload_annotations();
				}
				Err(err) => self.report("Saving bulk changes failed", &err),
			},
		}
	}

	fn receive_verses(&mut self, verses: Vec<Verse>) {
		if let Some(wanted) = self.pending_verse.take() {
			let verse = verses
				.iter()
				.find(|verse| verse.key == wanted)
				.or_else(|| verses.first())
				.cloned();
			match verse {
				Some(verse) => self.show_verse(verse),
				None => self.status.error(format!("Verse {wanted} not found")),
			}
			return;
		}
		if let Overlay::Search(prompt) = &mut self.overlay {
			prompt.set_results(verses);
		}
	}

	fn receive_manuscripts(&mut self, manuscripts: Vec<Manuscript>) {
		self.manuscripts = std::iter::once(Manuscript::all())
			.chain(manuscripts.into_iter().filter(|manuscript| !manuscript.is_all()))
			.collect();
		let preferred = self.preferred_manuscript.as_deref().and_then(|wanted| {
			self.manuscripts.iter().position(|manuscript| {
				manuscript.manuscript_id == wanted || manuscript.manuscript_name == wanted
			})
		});
		if let Some(wanted) = &self.preferred_manuscript
			&& preferred.is_none()
		{
			warn!("manuscript {wanted} is not known to the service");
		}
		let index = preferred.unwrap_or(if self.manuscripts.len() > 1 { 1 } else { 0 });
		self.activate_manuscript(index);
	}

	fn after_annotation_change(&mut self, verse_key: &str) {
		if self.verse_key() == Some(verse_key) {
			self.reload_annotations();
		}
		if let Some(manuscript_id) = self
			.active_manuscript()
			.filter(|manuscript| !manuscript.is_all())
			.map(|manuscript| manuscript.manuscript_id.clone())
		{
			self.service
				.send(ServiceCommand::LoadVocabulary { manuscript_id });
		}
	}

	fn report(&mut self, context: &str, err: &ServiceError) {
		warn!("{context}: {err}");
		self.status.error(format!("{context}: {}", err.summary()));
	}
}
