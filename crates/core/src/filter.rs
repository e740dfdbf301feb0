//! Annotation filters and the pending-change bookkeeping of the bulk editor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annotation::{Annotation, AnnotationField};

/// How a text filter compares against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
	#[default]
	Full,
	Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextFilter {
	pub value: String,
	#[serde(rename = "matchType")]
	pub match_type: MatchType,
}

impl TextFilter {
	fn matches(&self, candidate: &str) -> bool {
		if self.value.is_empty() {
			return true;
		}
		match self.match_type {
			MatchType::Full => candidate == self.value,
			MatchType::Partial => candidate.to_lowercase().contains(&self.value.to_lowercase()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueFilter<T> {
	pub value: T,
}

/// Payload accepted by the service's `filter_annotations` endpoint.
///
/// Empty values do not constrain the result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationFilter {
	pub annotation: TextFilter,
	pub annotated_object: TextFilter,
	pub annotation_type: TextFilter,
	#[serde(rename = "annotation_Language")]
	pub annotation_language: TextFilter,
	pub annotation_transliteration: TextFilter,
	pub other: TextFilter,
	pub annotation_id: ValueFilter<String>,
	pub annotation_range: ValueFilter<String>,
	pub manuscript_id: ValueFilter<String>,
	pub verse_id: ValueFilter<String>,
	pub flag: ValueFilter<Option<bool>>,
}

/// A filter expression that could not be understood.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
	#[error("filter term `{term}` needs `field=value` or `field~value`")]
	MissingOperator { term: String },
	#[error("unknown filter field `{field}`")]
	UnknownField { field: String },
	#[error("field `{field}` only supports exact matches")]
	PartialNotSupported { field: String },
	#[error("flag filter must be `true` or `false`, got `{value}`")]
	InvalidFlag { value: String },
}

impl AnnotationFilter {
	/// Parse `;` separated terms such as `annotation_type=gloss; annotation~peace`.
	///
	/// `=` requests a full match and `~` a partial one. Identifier fields and
	/// `flag` only accept `=`.
	pub fn parse(expression: &str) -> Result<Self, FilterError> {
		let mut filter = Self::default();
		for term in expression.split(';').map(str::trim).filter(|t| !t.is_empty()) {
			let (field, value, match_type) = split_term(term)?;
			filter.set(field, value, match_type)?;
		}
		Ok(filter)
	}

	/// Constrain `field` to `value`.
	pub fn set(&mut self, field: &str, value: &str, match_type: MatchType) -> Result<(), FilterError> {
		let text = |target: &mut TextFilter| {
			target.value = value.to_string();
			target.match_type = match_type;
		};
		let exact = |target: &mut ValueFilter<String>| {
			if match_type == MatchType::Partial {
				return Err(FilterError::PartialNotSupported {
					field: field.to_string(),
				});
			}
			target.value = value.to_string();
			Ok(())
		};

		match field {
			"annotation" => text(&mut self.annotation),
			"annotated_object" => text(&mut self.annotated_object),
			"annotation_type" => text(&mut self.annotation_type),
			"annotation_Language" | "annotation_language" | "language" => {
				text(&mut self.annotation_language);
			}
			"annotation_transliteration" | "transliteration" => {
				text(&mut self.annotation_transliteration);
			}
			"other" => text(&mut self.other),
			"annotation_id" => exact(&mut self.annotation_id)?,
			"annotation_range" | "annotated_range" => exact(&mut self.annotation_range)?,
			"manuscript_id" => exact(&mut self.manuscript_id)?,
			"verse_id" => exact(&mut self.verse_id)?,
			"flag" => {
				if match_type == MatchType::Partial {
					return Err(FilterError::PartialNotSupported {
						field: field.to_string(),
					});
				}
				self.flag.value = match value {
					"" => None,
					"true" => Some(true),
					"false" => Some(false),
					other => {
						return Err(FilterError::InvalidFlag {
							value: other.to_string(),
						});
					}
				};
			}
			other => {
				return Err(FilterError::UnknownField {
					field: other.to_string(),
				});
			}
		}
		Ok(())
	}

	/// Evaluate the filter locally.
	#[must_use]
	pub fn matches(&self, annotation: &Annotation) -> bool {
		let exact = |filter: &ValueFilter<String>, candidate: &str| {
			filter.value.is_empty() || filter.value == candidate
		};

		self.annotation.matches(&annotation.annotation)
			&& self.annotated_object.matches(&annotation.annotated_object)
			&& self.annotation_type.matches(&annotation.annotation_type)
			&& self.annotation_language.matches(&annotation.annotation_language)
			&& self
				.annotation_transliteration
				.matches(&annotation.annotation_transliteration)
			&& self.other.matches(&annotation.other)
			&& exact(&self.annotation_id, &annotation.annotation_id)
			&& exact(&self.annotation_range, &annotation.annotated_range)
			&& exact(&self.manuscript_id, &annotation.manuscript_id)
			&& exact(&self.verse_id, &annotation.verse_id)
			&& self.flag.value.is_none_or(|flag| flag == annotation.flag)
	}
}

fn split_term(term: &str) -> Result<(&str, &str, MatchType), FilterError> {
	let operator = term.find(['=', '~']).ok_or_else(|| FilterError::MissingOperator {
		term: term.to_string(),
	})?;
	let match_type = if term[operator..].starts_with('~') {
		MatchType::Partial
	} else {
		MatchType::Full
	};
	let field = term[..operator].trim();
	let value = term[operator + 1..].trim();
	Ok((field, value, match_type))
}

/// Rows changed by a bulk edit, in the shape `save_annotations` expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkChanges {
	#[serde(rename = "updatedRows")]
	pub updated_rows: Vec<Annotation>,
	#[serde(rename = "deletedRows")]
	pub deleted_rows: Vec<Annotation>,
}

impl BulkChanges {
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.updated_rows.is_empty() && self.deleted_rows.is_empty()
	}
}

/// Grid of filtered annotations with edits that have not been saved yet.
#[derive(Debug, Clone, Default)]
pub struct BulkEdit {
	rows: Vec<Annotation>,
	edited: BTreeSet<(usize, AnnotationField)>,
	deleted: BTreeSet<usize>,
}

impl BulkEdit {
	pub fn new(rows: Vec<Annotation>) -> Self {
		Self {
			rows,
			..Self::default()
		}
	}

	/// Replace the rows, discarding pending changes.
	pub fn load(&mut self, rows: Vec<Annotation>) {
		*self = Self::new(rows);
	}

	#[must_use]
	pub fn rows(&self) -> &[Annotation] {
		&self.rows
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Overwrite a text cell. Returns `false` when nothing changed.
	pub fn edit(&mut self, row: usize, field: AnnotationField, value: &str) -> bool {
		let Some(cell) = self.rows.get_mut(row).and_then(|r| r.field_mut(field)) else {
			return false;
		};
		if cell == value {
			return false;
		}
		value.clone_into(cell);
		self.edited.insert((row, field));
		true
	}

	/// Flip the flag of a row.
	pub fn toggle_flag(&mut self, row: usize) -> bool {
		let Some(annotation) = self.rows.get_mut(row) else {
			return false;
		};
		annotation.flag = !annotation.flag;
		self.edited.insert((row, AnnotationField::Flag));
		true
	}

	/// Mark or unmark a row for deletion.
	pub fn toggle_deleted(&mut self, row: usize) -> bool {
		if row >= self.rows.len() {
			return false;
		}
		if !self.deleted.remove(&row) {
			self.deleted.insert(row);
		}
		true
	}

	#[must_use]
	pub fn is_deleted(&self, row: usize) -> bool {
		self.deleted.contains(&row)
	}

	#[must_use]
	pub fn is_edited(&self, row: usize, field: AnnotationField) -> bool {
		self.edited.contains(&(row, field))
	}

	#[must_use]
	pub fn has_changes(&self) -> bool {
		!self.edited.is_empty() || !self.deleted.is_empty()
	}

	/// Updated rows exclude rows that are also marked for deletion.
	#[must_use]
	pub fn changes(&self) -> BulkChanges {
		let edited_rows: BTreeSet<usize> = self.edited.iter().map(|(row, _)| *row).collect();
		BulkChanges {
			updated_rows: edited_rows
				.difference(&self.deleted)
				.filter_map(|row| self.rows.get(*row).cloned())
				.collect(),
			deleted_rows: self
				.deleted
				.iter()
				.filter_map(|row| self.rows.get(*row).cloned())
				.collect(),
		}
	}

	/// Forget saved changes and drop the deleted rows.
	pub fn commit(&mut self) {
		let deleted = std::mem::take(&mut self.deleted);
		let mut index = 0usize;
		self.rows.retain(|_| {
			let keep = !deleted.contains(&index);
			index += 1;
			keep
		});
		self.edited.clear();
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn row(id: &str, kind: &str) -> Annotation {
		Annotation {
			annotation_id: id.into(),
			manuscript_id: "1".into(),
			verse_id: "1:1".into(),
			annotated_range: "0 - 6".into(),
			annotation_type: kind.into(),
			annotation: format!("note {id}"),
			..Annotation::default()
		}
	}

	#[test]
	fn serializes_the_service_payload_shape() {
		let filter = AnnotationFilter::parse("annotation_type~glo; flag=true; verse_id=1:1")
			.expect("filter");
		let value = serde_json::to_value(&filter).expect("json");
		assert_eq!(value["annotation_type"], json!({"value": "glo", "matchType": "partial"}));
		assert_eq!(value["annotation"], json!({"value": "", "matchType": "full"}));
		assert_eq!(value["flag"], json!({"value": true}));
		assert_eq!(value["verse_id"], json!({"value": "1:1"}));
		assert_eq!(value["annotation_range"], json!({"value": ""}));
	}

	#[test]
	fn rejects_bad_expressions() {
		assert!(matches!(
			AnnotationFilter::parse("annotation_type"),
			Err(FilterError::MissingOperator { .. })
		));
		assert!(matches!(
			AnnotationFilter::parse("colour=red"),
			Err(FilterError::UnknownField { .. })
		));
		assert!(matches!(
			AnnotationFilter::parse("verse_id~1:"),
			Err(FilterError::PartialNotSupported { .. })
		));
		assert!(matches!(
			AnnotationFilter::parse("flag=yes"),
			Err(FilterError::InvalidFlag { .. })
		));
	}

	#[test]
	fn local_matching_follows_match_types() {
		let gloss = row("a", "gloss");
		let filter = AnnotationFilter::parse("annotation_type=glo").expect("filter");
		assert!(!filter.matches(&gloss));
		let filter = AnnotationFilter::parse("annotation_type~GLO").expect("filter");
		assert!(filter.matches(&gloss));
		assert!(AnnotationFilter::default().matches(&gloss));
		let filter = AnnotationFilter::parse("flag=true").expect("filter");
		assert!(!filter.matches(&gloss));
	}

	#[test]
	fn tracks_edits_and_deletions() {
		let mut grid = BulkEdit::new(vec![row("a", "gloss"), row("b", "gloss"), row("c", "gloss")]);
		assert!(!grid.has_changes());

		assert!(grid.edit(0, AnnotationField::Type, "variant"));
		assert!(!grid.edit(0, AnnotationField::Type, "variant"));
		assert!(grid.toggle_flag(1));
		assert!(grid.toggle_deleted(1));
		assert!(grid.toggle_deleted(2));
		assert!(grid.toggle_deleted(2));
		assert!(!grid.toggle_deleted(9));

		let changes = grid.changes();
		let updated: Vec<_> = changes.updated_rows.iter().map(|r| r.annotation_id.as_str()).collect();
		let deleted: Vec<_> = changes.deleted_rows.iter().map(|r| r.annotation_id.as_str()).collect();
		assert_eq!(updated, ["a"]);
		assert_eq!(deleted, ["b"]);
		assert!(grid.is_edited(0, AnnotationField::Type));

		grid.commit();
		assert!(!grid.has_changes());
		let remaining: Vec<_> = grid.rows().iter().map(|r| r.annotation_id.as_str()).collect();
		assert_eq!(remaining, ["a", "c"]);
		assert_eq!(grid.rows()[0].annotation_type, "variant");
	}

	#[test]
	fn reloading_discards_pending_changes() {
		let mut grid = BulkEdit::new(vec![row("a", "gloss")]);
		grid.toggle_deleted(0);
		grid.load(vec![row("z", "gloss")]);
		assert!(!grid.has_changes());
		assert_eq!(grid.len(), 1);
	}
}
