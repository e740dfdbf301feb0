//! Contracts with the external annotation service.
//!
//! [`AnnotationService`] is what the rest of the crate talks to.
//! [`HttpService`] speaks the service's JSON-over-HTTP dialect and
//! [`MemoryService`] keeps everything in process for offline sessions.
//! The UI never calls either directly; it goes through [`worker::spawn`].

mod error;
mod http;
mod memory;
pub mod worker;

pub use error::ServiceError;
pub use http::{DEFAULT_SERVICE_URL, HttpService};
pub use memory::{MemoryService, Snapshot};
pub use worker::{ServiceCommand, ServiceReply, spawn};

use crate::annotation::{Annotation, AnnotationResult, Manuscript, Template};
use crate::filter::{AnnotationFilter, BulkChanges};
use crate::verse::Verse;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operations offered by the annotation service.
pub trait AnnotationService: Send {
	/// Verses whose key starts with a numeric query, or whose text contains it.
	fn search_verses(&self, query: &str) -> ServiceResult<Vec<Verse>>;

	/// The verse after `current`, if any.
	fn next_verse(&self, current: &str) -> ServiceResult<Option<Verse>>;

	/// The verse before `current`, if any.
	fn previous_verse(&self, current: &str) -> ServiceResult<Option<Verse>>;

	fn manuscripts(&self) -> ServiceResult<Vec<Manuscript>>;

	/// Annotations on `verse_key`, grouped by manuscript.
	fn annotations(&self, verse_key: &str) -> ServiceResult<Vec<AnnotationResult>>;

	fn save_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()>;

	fn update_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()>;

	/// Returns whether the service removed the annotation.
	fn delete_annotation(&mut self, annotation_id: &str, manuscript_id: &str) -> ServiceResult<bool>;

	/// Template suggestions for a manuscript. `recent` orders by last use
	/// instead of popularity.
	fn templates(&self, manuscript_id: &str, query: &str, recent: bool) -> ServiceResult<Vec<Template>>;

	fn increment_template_popularity(&mut self, template_id: &str) -> ServiceResult<()>;

	fn save_template(&mut self, template: &Template) -> ServiceResult<()>;

	fn next_template_id(&self) -> ServiceResult<String>;

	fn languages(&self, manuscript_id: &str) -> ServiceResult<Vec<String>>;

	fn annotation_types(&self, manuscript_id: &str) -> ServiceResult<Vec<String>>;

	fn filter_annotations(&self, filter: &AnnotationFilter) -> ServiceResult<Vec<Annotation>>;

	fn save_annotations(&mut self, changes: &BulkChanges) -> ServiceResult<()>;
}

impl<S: AnnotationService + ?Sized> AnnotationService for Box<S> {
	fn search_verses(&self, query: &str) -> ServiceResult<Vec<Verse>> {
		(**self).search_verses(query)
	}

	fn next_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		(**self).next_verse(current)
	}

	fn previous_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		(**self).previous_verse(current)
	}

	fn manuscripts(&self) -> ServiceResult<Vec<Manuscript>> {
		(**self).manuscripts()
	}

	fn annotations(&self, verse_key: &str) -> ServiceResult<Vec<AnnotationResult>> {
		(**self).annotations(verse_key)
	}

	fn save_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		(**self).save_annotation(annotation)
	}

	fn update_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		(**self).update_annotation(annotation)
	}

	fn delete_annotation(&mut self, annotation_id: &str, manuscript_id: &str) -> ServiceResult<bool> {
		(**self).delete_annotation(annotation_id, manuscript_id)
	}

	fn templates(&self, manuscript_id: &str, query: &str, recent: bool) -> ServiceResult<Vec<Template>> {
		(**self).templates(manuscript_id, query, recent)
	}

	fn increment_template_popularity(&mut self, template_id: &str) -> ServiceResult<()> {
		(**self).increment_template_popularity(template_id)
	}

	fn save_template(&mut self, template: &Template) -> ServiceResult<()> {
		(**self).save_template(template)
	}

	fn next_template_id(&self) -> ServiceResult<String> {
		(**self).next_template_id()
	}

	fn languages(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		(**self).languages(manuscript_id)
	}

	fn annotation_types(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		(**self).annotation_types(manuscript_id)
	}

	fn filter_annotations(&self, filter: &AnnotationFilter) -> ServiceResult<Vec<Annotation>> {
		(**self).filter_annotations(filter)
	}

	fn save_annotations(&mut self, changes: &BulkChanges) -> ServiceResult<()> {
		(**self).save_annotations(changes)
	}
}
