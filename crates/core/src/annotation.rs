//! Annotation, manuscript and template records exchanged with the service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::selection::{FormatError, SelectedSpan, SelectionRange, parse_range};

/// Identifier of the pseudo-manuscript that aggregates every manuscript.
pub const ALL_MANUSCRIPTS_ID: &str = "all";
/// Display name of the aggregate pseudo-manuscript.
pub const ALL_MANUSCRIPTS_NAME: &str = "All Manuscripts";

/// One annotation on a span of a verse in a given manuscript.
///
/// The record is round-tripped verbatim; `annotated_range` is kept as the
/// literal string the service stores and is only parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotation {
	#[serde(default, deserialize_with = "string_or_number")]
	pub annotation_id: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub manuscript_id: String,
	#[serde(default)]
	pub verse_id: String,
	#[serde(default)]
	pub annotated_object: String,
	#[serde(default)]
	pub annotated_range: String,
	#[serde(default)]
	pub annotation: String,
	#[serde(rename = "annotation_Language", default)]
	pub annotation_language: String,
	#[serde(default)]
	pub annotation_transliteration: String,
	#[serde(default)]
	pub annotation_type: String,
	#[serde(default)]
	pub other: String,
	#[serde(default)]
	pub flag: bool,
}

impl Annotation {
	/// A new, unsaved annotation for the selected span.
	pub fn for_span(
		manuscript_id: impl Into<String>,
		verse_id: impl Into<String>,
		span: &SelectedSpan,
	) -> Self {
		Self {
			manuscript_id: manuscript_id.into(),
			verse_id: verse_id.into(),
			annotated_object: span.text.clone(),
			annotated_range: span.range_string(),
			..Self::default()
		}
	}

	/// Parse the stored range string.
	pub fn range(&self) -> Result<SelectionRange, FormatError> {
		parse_range(&self.annotated_range)
	}

	/// Whether the service has assigned an id yet.
	#[must_use]
	pub fn is_saved(&self) -> bool {
		!self.annotation_id.is_empty()
	}

	/// Copy the descriptive fields of `template` onto this annotation.
	pub fn apply_template(&mut self, template: &Template) {
		self.annotation = template.annotation.clone();
		self.annotation_language = template.annotation_language.clone();
		self.annotation_transliteration = template.annotation_transliteration.clone();
		self.annotation_type = template.annotation_type.clone();
		self.other = template.other.clone();
	}

	/// Mutable access to an editable text field by its wire name.
	pub fn field_mut(&mut self, field: AnnotationField) -> Option<&mut String> {
		match field {
			AnnotationField::AnnotatedObject => Some(&mut self.annotated_object),
			AnnotationField::AnnotatedRange => Some(&mut self.annotated_range),
			AnnotationField::Annotation => Some(&mut self.annotation),
			AnnotationField::Language => Some(&mut self.annotation_language),
			AnnotationField::Transliteration => Some(&mut self.annotation_transliteration),
			AnnotationField::Type => Some(&mut self.annotation_type),
			AnnotationField::Other => Some(&mut self.other),
			AnnotationField::Flag => None,
		}
	}

	/// The value of `field` rendered as text.
	#[must_use]
	pub fn field_text(&self, field: AnnotationField) -> String {
		match field {
			AnnotationField::AnnotatedObject => self.annotated_object.clone(),
			AnnotationField::AnnotatedRange => self.annotated_range.clone(),
			AnnotationField::Annotation => self.annotation.clone(),
			AnnotationField::Language => self.annotation_language.clone(),
			AnnotationField::Transliteration => self.annotation_transliteration.clone(),
			AnnotationField::Type => self.annotation_type.clone(),
			AnnotationField::Other => self.other.clone(),
			AnnotationField::Flag => self.flag.to_string(),
		}
	}
}

/// The user editable columns of an [`Annotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationField {
	AnnotatedObject,
	AnnotatedRange,
	Annotation,
	Language,
	Transliteration,
	Type,
	Other,
	Flag,
}

impl AnnotationField {
	pub const ALL: [AnnotationField; 8] = [
		AnnotationField::AnnotatedObject,
		AnnotationField::AnnotatedRange,
		AnnotationField::Annotation,
		AnnotationField::Language,
		AnnotationField::Transliteration,
		AnnotationField::Type,
		AnnotationField::Other,
		AnnotationField::Flag,
	];

	/// Fields shown in the annotation form, in order.
	pub const FORM: [AnnotationField; 6] = [
		AnnotationField::Annotation,
		AnnotationField::Language,
		AnnotationField::Transliteration,
		AnnotationField::Type,
		AnnotationField::Other,
		AnnotationField::Flag,
	];

	/// Name of the field on the wire.
	#[must_use]
	pub fn wire_name(self) -> &'static str {
		match self {
			AnnotationField::AnnotatedObject => "annotated_object",
			AnnotationField::AnnotatedRange => "annotated_range",
			AnnotationField::Annotation => "annotation",
			AnnotationField::Language => "annotation_Language",
			AnnotationField::Transliteration => "annotation_transliteration",
			AnnotationField::Type => "annotation_type",
			AnnotationField::Other => "other",
			AnnotationField::Flag => "flag",
		}
	}

	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			AnnotationField::AnnotatedObject => "Annotated object",
			AnnotationField::AnnotatedRange => "Range",
			AnnotationField::Annotation => "Annotation",
			AnnotationField::Language => "Language",
			AnnotationField::Transliteration => "Transliteration",
			AnnotationField::Type => "Type",
			AnnotationField::Other => "Other notes",
			AnnotationField::Flag => "Flag",
		}
	}
}

/// Annotations for one verse within one manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationResult {
	#[serde(default)]
	pub manuscript_name: String,
	#[serde(deserialize_with = "string_or_number")]
	pub manuscript_id: String,
	#[serde(default)]
	pub annotations: Vec<Annotation>,
}

/// A manuscript that annotations can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manuscript {
	#[serde(deserialize_with = "string_or_number")]
	pub manuscript_id: String,
	pub manuscript_name: String,
}

impl Manuscript {
	/// The aggregate pseudo-manuscript; annotating is disabled while it is active.
	#[must_use]
	pub fn all() -> Self {
		Self {
			manuscript_id: ALL_MANUSCRIPTS_ID.to_string(),
			manuscript_name: ALL_MANUSCRIPTS_NAME.to_string(),
		}
	}

	#[must_use]
	pub fn is_all(&self) -> bool {
		self.manuscript_id == ALL_MANUSCRIPTS_ID || self.manuscript_name == ALL_MANUSCRIPTS_NAME
	}
}

/// Reusable annotation content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Template {
	#[serde(default, deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub manuscript_id: Option<String>,
	#[serde(default)]
	pub annotation: String,
	#[serde(rename = "annotation_Language", default)]
	pub annotation_language: String,
	#[serde(default)]
	pub annotation_transliteration: String,
	#[serde(default)]
	pub annotation_type: String,
	#[serde(default)]
	pub other: String,
	#[serde(rename = "displayText", default, skip_serializing)]
	pub display_text: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template_name: Option<String>,
}

impl Template {
	/// Capture the descriptive fields of an annotation as a template.
	pub fn from_annotation(id: impl Into<String>, annotation: &Annotation) -> Self {
		let mut template = Self {
			id: id.into(),
			manuscript_id: Some(annotation.manuscript_id.clone()),
			annotation: annotation.annotation.clone(),
			annotation_language: annotation.annotation_language.clone(),
			annotation_transliteration: annotation.annotation_transliteration.clone(),
			annotation_type: annotation.annotation_type.clone(),
			other: annotation.other.clone(),
			display_text: String::new(),
			template_name: None,
		};
		template.template_name = Some(template.default_name());
		template
	}

	/// `annotation-language-transliteration-type-other`, skipping empty
	/// fields, whitespace removed, lowercased.
	#[must_use]
	pub fn default_name(&self) -> String {
		let squash = |value: &str| value.split_whitespace().collect::<String>();
		[
			squash(&self.annotation),
			self.annotation_language.clone(),
			squash(&self.annotation_transliteration),
			squash(&self.annotation_type),
			squash(&self.other),
		]
		.into_iter()
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("-")
		.to_lowercase()
	}

	/// Text used when listing the template.
	#[must_use]
	pub fn label(&self) -> String {
		if !self.display_text.is_empty() {
			return self.display_text.clone();
		}
		match &self.template_name {
			Some(name) if !name.is_empty() => name.clone(),
			_ => self.default_name(),
		}
	}

	/// Build the annotation this template produces for a selected span.
	pub fn annotate(
		&self,
		manuscript_id: impl Into<String>,
		verse_id: impl Into<String>,
		span: &SelectedSpan,
	) -> Annotation {
		let mut annotation = Annotation::for_span(manuscript_id, verse_id, span);
		annotation.apply_template(self);
		annotation
	}
}

/// Ids arrive as strings from some endpoints and as integers from others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Id {
		Text(String),
		Number(i64),
		Missing(()),
	}

	Ok(match Id::deserialize(deserializer)? {
		Id::Text(text) => text,
		Id::Number(number) => number.to_string(),
		Id::Missing(()) => String::new(),
	})
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn span(text: &str, start: usize, end: usize) -> SelectedSpan {
		SelectedSpan {
			text: text.to_string(),
			range: SelectionRange::new(start, end).expect("range"),
		}
	}

	#[test]
	fn round_trips_wire_field_names() {
		let value = json!({
			"annotation_id": "a1",
			"manuscript_id": "3",
			"verse_id": "1:1",
			"annotated_object": "salaam",
			"annotated_range": "0 - 6",
			"annotation": "peace",
			"annotation_Language": "en",
			"annotation_transliteration": "salām",
			"annotation_type": "gloss",
			"other": "",
			"flag": true
		});

		let annotation: Annotation = serde_json::from_value(value.clone()).expect("annotation");
		assert_eq!(annotation.annotation_language, "en");
		assert_eq!(serde_json::to_value(&annotation).expect("json"), value);
	}

	#[test]
	fn numeric_manuscript_ids_become_strings() {
		let result: AnnotationResult = serde_json::from_value(json!({
			"manuscript_name": "Manuscript_2",
			"manuscript_id": 2,
			"annotations": []
		}))
		.expect("result");
		assert_eq!(result.manuscript_id, "2");
	}

	#[test]
	fn new_annotation_carries_span_text_and_range() {
		let annotation = Annotation::for_span("3", "1:1", &span("salaam", 0, 6));
		assert_eq!(annotation.annotated_object, "salaam");
		assert_eq!(annotation.annotated_range, "0 - 6");
		assert!(!annotation.is_saved());
		assert!(!annotation.flag);
		assert_eq!(annotation.range(), Ok(SelectionRange::new(0, 6).expect("range")));
	}

	#[test]
	fn template_default_name_joins_non_empty_fields() {
		let template = Template {
			annotation: "Divine Name".into(),
			annotation_language: "EN".into(),
			annotation_type: "proper noun".into(),
			..Template::default()
		};
		assert_eq!(template.default_name(), "divinename-en-propernoun");
	}

	#[test]
	fn applying_a_template_keeps_the_selection() {
		let template = Template {
			id: "7".into(),
			annotation: "name of God".into(),
			annotation_type: "gloss".into(),
			..Template::default()
		};
		let annotation = template.annotate("2", "1:1", &span("اللَّهِ", 7, 14));
		assert_eq!(annotation.annotated_range, "7 - 14");
		assert_eq!(annotation.annotation, "name of God");
		assert_eq!(annotation.annotation_type, "gloss");
		assert_eq!(annotation.manuscript_id, "2");
		assert!(annotation.annotation_id.is_empty());
	}

	#[test]
	fn all_manuscripts_is_recognised() {
		assert!(Manuscript::all().is_all());
		let named = Manuscript {
			manuscript_id: "4".into(),
			manuscript_name: "Manuscript_4".into(),
		};
		assert!(!named.is_all());
	}
}
