//! Core crate for the `ayat` annotation workbench.
//!
//! Everything that does not need a terminal lives here: the selection tracker
//! that maps a text selection onto UTF-16 offsets of a verse, the records
//! exchanged with the annotation service, the service client itself, and the
//! bookkeeping behind the bulk editor. The root re-exports the types embedders
//! reach for most often.

pub mod annotation;
pub mod app_dirs;
pub mod filter;
pub mod selection;
pub mod service;
pub mod verse;

pub use crate::annotation::{
	ALL_MANUSCRIPTS_ID, ALL_MANUSCRIPTS_NAME, Annotation, AnnotationField, AnnotationResult,
	Manuscript, Template,
};
pub use crate::filter::{AnnotationFilter, BulkChanges, BulkEdit, FilterError, MatchType};
pub use crate::selection::{
	DisplaySegments, FormatError, HighlightState, PreviewError, RangeError, RawSelection,
	SelectedSpan, SelectionProvider, SelectionRange, VerseDisplay, parse_range, serialize_range,
};
pub use crate::service::{
	AnnotationService, DEFAULT_SERVICE_URL, HttpService, MemoryService, ServiceCommand, ServiceError,
	ServiceReply, Snapshot, spawn,
};
pub use crate::verse::{Verse, VerseText};
