//! Background thread that owns the service and answers UI commands.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};

use super::{AnnotationService, ServiceResult};
use crate::annotation::{Annotation, AnnotationResult, Manuscript, Template};
use crate::filter::{AnnotationFilter, BulkChanges};
use crate::verse::Verse;

/// Requests the UI sends to the worker.
#[derive(Debug, Clone)]
pub enum ServiceCommand {
	SearchVerses { query: String },
	NextVerse { current: String },
	PreviousVerse { current: String },
	LoadManuscripts,
	LoadAnnotations { verse_key: String },
	/// Create or update depending on whether the annotation has an id.
	SaveAnnotation { annotation: Annotation },
	DeleteAnnotation {
		verse_key: String,
		annotation_id: String,
		manuscript_id: String,
	},
	LoadTemplates {
		manuscript_id: String,
		query: String,
		recent: bool,
	},
	/// Bump the template's popularity, then save the annotation built from it.
	ApplyTemplate {
		template_id: String,
		annotation: Annotation,
	},
	SaveTemplate { template: Template },
	LoadVocabulary { manuscript_id: String },
	FilterAnnotations { filter: AnnotationFilter },
	SaveBulk { changes: BulkChanges },
	Shutdown,
}

/// Worker answers, tagged with whatever the UI needs to tell stale ones apart.
#[derive(Debug)]
pub enum ServiceReply {
	Verses(ServiceResult<Vec<Verse>>),
	Navigated(ServiceResult<Option<Verse>>),
	Manuscripts(ServiceResult<Vec<Manuscript>>),
	Annotations {
		verse_key: String,
		result: ServiceResult<Vec<AnnotationResult>>,
	},
	AnnotationSaved {
		verse_key: String,
		result: ServiceResult<()>,
	},
	AnnotationDeleted {
		verse_key: String,
		result: ServiceResult<bool>,
	},
	Templates {
		query: String,
		result: ServiceResult<Vec<Template>>,
	},
	TemplateSaved(ServiceResult<Template>),
	Vocabulary {
		manuscript_id: String,
		languages: ServiceResult<Vec<String>>,
		types: ServiceResult<Vec<String>>,
	},
	Filtered(ServiceResult<Vec<Annotation>>),
	BulkSaved(ServiceResult<()>),
}

/// Launch the worker thread and return its command and reply channels.
pub fn spawn<S>(mut service: S) -> (Sender<ServiceCommand>, Receiver<ServiceReply>)
where
	S: AnnotationService + 'static,
{
	let (command_tx, command_rx) = mpsc::channel();
	let (reply_tx, reply_rx) = mpsc::channel();

	thread::spawn(move || worker_loop(&mut service, command_rx, reply_tx));

	(command_tx, reply_rx)
}

fn worker_loop(
	service: &mut impl AnnotationService,
	command_rx: Receiver<ServiceCommand>,
	reply_tx: Sender<ServiceReply>,
) {
	while let Ok(command) = command_rx.recv() {
		let Some(reply) = handle_command(service, command) else {
			break;
		};
		if reply_tx.send(reply).is_err() {
			break;
		}
	}
	debug!("service worker stopped");
}

pub(crate) fn handle_command(
	service: &mut impl AnnotationService,
	command: ServiceCommand,
) -> Option<ServiceReply> {
	let reply = match command {
		ServiceCommand::SearchVerses { query } => ServiceReply::Verses(service.search_verses(&query)),
		ServiceCommand::NextVerse { current } => ServiceReply::Navigated(service.next_verse(&current)),
		ServiceCommand::PreviousVerse { current } => {
			ServiceReply::Navigated(service.previous_verse(&current))
		}
		ServiceCommand::LoadManuscripts => ServiceReply::Manuscripts(service.manuscripts()),
		ServiceCommand::LoadAnnotations { verse_key } => {
			let result = service.annotations(&verse_key);
			ServiceReply::Annotations { verse_key, result }
		}
		ServiceCommand::SaveAnnotation { annotation } => {
			let result = if annotation.is_saved() {
				service.update_annotation(&annotation)
			} else {
				service.save_annotation(&annotation)
			};
			ServiceReply::AnnotationSaved {
				verse_key: annotation.verse_id,
				result,
			}
		}
		ServiceCommand::DeleteAnnotation {
			verse_key,
			annotation_id,
			manuscript_id,
		} => {
			let result = service.delete_annotation(&annotation_id, &manuscript_id);
			ServiceReply::AnnotationDeleted { verse_key, result }
		}
		ServiceCommand::LoadTemplates {
			manuscript_id,
			query,
			recent,
		} => {
			let result = service.templates(&manuscript_id, &query, recent);
			ServiceReply::Templates { query, result }
		}
		ServiceCommand::ApplyTemplate {
			template_id,
			annotation,
		} => {
			if let Err(err) = service.increment_template_popularity(&template_id) {
				warn!("failed to bump popularity of template {template_id}: {err}");
			}
			ServiceReply::AnnotationSaved {
				result: service.save_annotation(&annotation),
				verse_key: annotation.verse_id,
			}
		}
		ServiceCommand::SaveTemplate { mut template } => {
			if template.id.is_empty() {
				template.id = service.next_template_id().unwrap_or_else(|err| {
					warn!("falling back to a timestamp template id: {err}");
					timestamp_id()
				});
			}
			let result = service.save_template(&template).map(|()| template);
			ServiceReply::TemplateSaved(result)
		}
		ServiceCommand::LoadVocabulary { manuscript_id } => ServiceReply::Vocabulary {
			languages: service.languages(&manuscript_id),
			types: service.annotation_types(&manuscript_id),
			manuscript_id,
		},
		ServiceCommand::FilterAnnotations { filter } => {
			ServiceReply::Filtered(service.filter_annotations(&filter))
		}
		ServiceCommand::SaveBulk { changes } => ServiceReply::BulkSaved(service.save_annotations(&changes)),
		ServiceCommand::Shutdown => return None,
	};
	Some(reply)
}

fn timestamp_id() -> String {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_millis().to_string())
		.unwrap_or_default()
}
