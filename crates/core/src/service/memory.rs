use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{AnnotationService, ServiceError, ServiceResult};
use crate::annotation::{Annotation, AnnotationResult, Manuscript, Template};
use crate::filter::{AnnotationFilter, BulkChanges};
use crate::verse::Verse;

/// Serialized contents of an offline session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
	#[serde(default)]
	pub verses: Vec<Verse>,
	#[serde(default)]
	pub manuscripts: Vec<Manuscript>,
	#[serde(default)]
	pub annotations: Vec<Annotation>,
	#[serde(default)]
	pub templates: Vec<Template>,
}

impl Snapshot {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.with_context(|| format!("failed to read snapshot {}", path.display()))?;
		serde_json::from_str(&raw)
			.with_context(|| format!("failed to parse snapshot {}", path.display()))
	}

	/// The opening chapter with two manuscripts and a pair of templates.
	#[must_use]
	pub fn sample() -> Self {
		const FATIHA: [&str; 7] = [
			"بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
			"الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
			"الرَّحْمَٰنِ الرَّحِيمِ",
			"مَالِكِ يَوْمِ الدِّينِ",
			"إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
			"اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ",
			"صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
		];

		let verses = FATIHA
			.iter()
			.enumerate()
			.map(|(index, text)| {
				let number = index + 1;
				let mut verse = Verse::new(format!("1:{number}"), *text);
				verse.id = number.to_string();
				verse.sura_no = "1".into();
				verse.sura_name_en = "Al-Fatiha".into();
				verse.sura_name_ar = "الفاتحة".into();
				verse.aya_no = number.to_string();
				verse.page = "1".into();
				verse.jozz = "1".into();
				verse
			})
			.collect();

		let manuscripts = (1..=2)
			.map(|id| Manuscript {
				manuscript_id: id.to_string(),
				manuscript_name: format!("Manuscript_{id}"),
			})
			.collect();

		let annotations = vec![Annotation {
			annotation_id: "1".into(),
			manuscript_id: "1".into(),
			verse_id: "1:1".into(),
			annotated_object: "بِسْمِ".into(),
			annotated_range: "0 - 6".into(),
			annotation: "In the name".into(),
			annotation_language: "en".into(),
			annotation_transliteration: "bismi".into(),
			annotation_type: "gloss".into(),
			..Annotation::default()
		}];

		let templates = vec![
			Template {
				id: "1".into(),
				annotation: "Divine name".into(),
				annotation_language: "en".into(),
				annotation_type: "proper noun".into(),
				..Template::default()
			},
			Template {
				id: "2".into(),
				manuscript_id: Some("1".into()),
				annotation: "Scribal correction".into(),
				annotation_type: "variant".into(),
				..Template::default()
			},
		];

		Self {
			verses,
			manuscripts,
			annotations,
			templates,
		}
	}
}

#[derive(Debug, Clone)]
struct TemplateEntry {
	template: Template,
	popularity: u64,
	last_used: u64,
}

/// In-process service used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
	verses: Vec<Verse>,
	manuscripts: Vec<Manuscript>,
	annotations: Vec<Annotation>,
	templates: Vec<TemplateEntry>,
	clock: u64,
}

impl MemoryService {
	pub fn from_snapshot(snapshot: Snapshot) -> Self {
		Self {
			verses: snapshot.verses,
			manuscripts: snapshot.manuscripts,
			annotations: snapshot.annotations,
			templates: snapshot
				.templates
				.into_iter()
				.map(|template| TemplateEntry {
					template,
					popularity: 0,
					last_used: 0,
				})
				.collect(),
			clock: 0,
		}
	}

	#[must_use]
	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			verses: self.verses.clone(),
			manuscripts: self.manuscripts.clone(),
			annotations: self.annotations.clone(),
			templates: self.templates.iter().map(|e| e.template.clone()).collect(),
		}
	}

	fn position(&self, key: &str) -> Option<usize> {
		self.verses.iter().position(|verse| verse.key == key)
	}

	fn next_annotation_id(&self) -> String {
		next_numeric_id(self.annotations.iter().map(|a| a.annotation_id.as_str()))
	}

	fn vocabulary(&self, manuscript_id: &str, pick: impl Fn(&Annotation) -> &str) -> Vec<String> {
		let all = crate::annotation::ALL_MANUSCRIPTS_ID;
		self.annotations
			.iter()
			.filter(|a| manuscript_id == all || a.manuscript_id == manuscript_id)
			.map(pick)
			.filter(|value| !value.is_empty())
			.map(str::to_string)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	fn tick(&mut self) -> u64 {
		self.clock += 1;
		self.clock
	}
}

fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
	let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
	(max + 1).to_string()
}

fn starts_with_arabic(text: &str) -> bool {
	text.chars()
		.next()
		.is_some_and(|ch| matches!(ch, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}'))
}

impl AnnotationService for MemoryService {
	fn search_verses(&self, query: &str) -> ServiceResult<Vec<Verse>> {
		let query = query.trim();
		let Some(first) = query.chars().next() else {
			return Ok(Vec::new());
		};
		let needle = query.to_lowercase();
		let matches = |verse: &&Verse| {
			if first.is_ascii_digit() {
				verse.key.starts_with(query)
			} else if starts_with_arabic(query) {
				verse.aya_text.contains(query)
			} else {
				verse.sura_name_en.to_lowercase().contains(&needle)
			}
		};
		Ok(self.verses.iter().filter(matches).cloned().collect())
	}

	fn next_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		Ok(self
			.position(current)
			.and_then(|index| self.verses.get(index + 1))
			.cloned())
	}

	fn previous_verse(&self, current: &str) -> ServiceResult<Option<Verse>> {
		Ok(self
			.position(current)
			.and_then(|index| index.checked_sub(1))
			.and_then(|index| self.verses.get(index))
			.cloned())
	}

	fn manuscripts(&self) -> ServiceResult<Vec<Manuscript>> {
		Ok(self.manuscripts.clone())
	}

	fn annotations(&self, verse_key: &str) -> ServiceResult<Vec<AnnotationResult>> {
		Ok(self
			.manuscripts
			.iter()
			.filter(|manuscript| !manuscript.is_all())
			.map(|manuscript| AnnotationResult {
				manuscript_name: manuscript.manuscript_name.clone(),
				manuscript_id: manuscript.manuscript_id.clone(),
				annotations: self
					.annotations
					.iter()
					.filter(|a| a.verse_id == verse_key && a.manuscript_id == manuscript.manuscript_id)
					.cloned()
					.collect(),
			})
			.collect())
	}

	fn save_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		let mut annotation = annotation.clone();
		if !annotation.is_saved() {
			annotation.annotation_id = self.next_annotation_id();
		}
		self.annotations.push(annotation);
		Ok(())
	}

	fn update_annotation(&mut self, annotation: &Annotation) -> ServiceResult<()> {
		let existing = self
			.annotations
			.iter_mut()
			.find(|a| {
				a.annotation_id == annotation.annotation_id
					&& a.manuscript_id == annotation.manuscript_id
			})
			.ok_or_else(|| ServiceError::AnnotationNotFound {
				annotation_id: annotation.annotation_id.clone(),
				manuscript_id: annotation.manuscript_id.clone(),
			})?;
		*existing = annotation.clone();
		Ok(())
	}

	fn delete_annotation(&mut self, annotation_id: &str, manuscript_id: &str) -> ServiceResult<bool> {
		let before = self.annotations.len();
		self.annotations
			.retain(|a| !(a.annotation_id == annotation_id && a.manuscript_id == manuscript_id));
		Ok(self.annotations.len() != before)
	}

	fn templates(&self, manuscript_id: &str, query: &str, recent: bool) -> ServiceResult<Vec<Template>> {
		let all = crate::annotation::ALL_MANUSCRIPTS_ID;
		let needle = query.trim().to_lowercase();
		let mut entries: Vec<&TemplateEntry> = self
			.templates
			.iter()
			.filter(|entry| match &entry.template.manuscript_id {
				Some(id) => manuscript_id == all || id == manuscript_id,
				None => true,
			})
			.filter(|entry| needle.is_empty() || entry.template.label().to_lowercase().contains(&needle))
			.collect();

		if recent {
			entries.sort_by(|a, b| b.last_used.cmp(&a.last_used));
		} else {
			entries.sort_by(|a, b| b.popularity.cmp(&a.popularity));
		}

		Ok(entries
			.into_iter()
			.map(|entry| {
				let mut template = entry.template.clone();
				template.display_text = template.label();
				template
			})
			.collect())
	}

	fn increment_template_popularity(&mut self, template_id: &str) -> ServiceResult<()> {
		let now = self.tick();
		let entry = self
			.templates
			.iter_mut()
			.find(|entry| entry.template.id == template_id)
			.ok_or_else(|| ServiceError::TemplateNotFound {
				template_id: template_id.to_string(),
			})?;
		entry.popularity += 1;
		entry.last_used = now;
		Ok(())
	}

	fn save_template(&mut self, template: &Template) -> ServiceResult<()> {
		let mut template = template.clone();
		if template.id.is_empty() {
			template.id = self.next_template_id()?;
		}
		match self
			.templates
			.iter_mut()
			.find(|entry| entry.template.id == template.id)
		{
			Some(entry) => entry.template = template,
			None => self.templates.push(TemplateEntry {
				template,
				popularity: 0,
				last_used: 0,
			}),
		}
		Ok(())
	}

	fn next_template_id(&self) -> ServiceResult<String> {
		Ok(next_numeric_id(
			self.templates.iter().map(|entry| entry.template.id.as_str()),
		))
	}

	fn languages(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		Ok(self.vocabulary(manuscript_id, |a| a.annotation_language.as_str()))
	}

	fn annotation_types(&self, manuscript_id: &str) -> ServiceResult<Vec<String>> {
		Ok(self.vocabulary(manuscript_id, |a| a.annotation_type.as_str()))
	}

	fn filter_annotations(&self, filter: &AnnotationFilter) -> ServiceResult<Vec<Annotation>> {
		Ok(self
			.annotations
			.iter()
			.filter(|a| filter.matches(a))
			.cloned()
			.collect())
	}

	fn save_annotations(&mut self, changes: &BulkChanges) -> ServiceResult<()> {
		for row in &changes.updated_rows {
			self.update_annotation(row)?;
		}
		for row in &changes.deleted_rows {
			self.delete_annotation(&row.annotation_id, &row.manuscript_id)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn service() -> MemoryService {
		MemoryService::from_snapshot(Snapshot::sample())
	}

	#[test]
	fn searches_by_key_prefix_and_arabic_text() {
		let service = service();
		let by_key = service.search_verses("1:1").expect("search");
		assert_eq!(by_key.len(), 1);
		let by_text = service.search_verses("الرَّحِيمِ").expect("search");
		let keys: Vec<_> = by_text.iter().map(|v| v.key.as_str()).collect();
		assert_eq!(keys, ["1:1", "1:3"]);
		assert!(service.search_verses("  ").expect("search").is_empty());
	}

	#[test]
	fn navigation_stops_at_the_ends() {
		let service = service();
		assert_eq!(
			service.next_verse("1:1").expect("next").map(|v| v.key),
			Some("1:2".to_string())
		);
		assert_eq!(service.next_verse("1:7").expect("next"), None);
		assert_eq!(service.previous_verse("1:1").expect("previous"), None);
		assert_eq!(service.next_verse("9:99").expect("unknown"), None);
	}

	#[test]
	fn annotations_are_grouped_per_manuscript() {
		let mut service = service();
		let mut annotation = Annotation {
			manuscript_id: "2".into(),
			verse_id: "1:1".into(),
			annotated_range: "7 - 14".into(),
			..Annotation::default()
		};
		service.save_annotation(&annotation).expect("save");

		let groups = service.annotations("1:1").expect("annotations");
		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].annotations.len(), 1);
		assert_eq!(groups[1].annotations.len(), 1);
		let saved = &groups[1].annotations[0];
		assert_eq!(saved.annotation_id, "2");

		annotation = saved.clone();
		annotation.annotation = "edited".into();
		service.update_annotation(&annotation).expect("update");
		assert!(service.delete_annotation("2", "2").expect("delete"));
		assert!(!service.delete_annotation("2", "2").expect("delete twice"));
	}

	#[test]
	fn updating_a_missing_annotation_fails() {
		let mut service = service();
		let ghost = Annotation {
			annotation_id: "42".into(),
			manuscript_id: "1".into(),
			..Annotation::default()
		};
		assert!(matches!(
			service.update_annotation(&ghost),
			Err(ServiceError::AnnotationNotFound { .. })
		));
	}

	#[test]
	fn templates_rank_by_popularity_or_recency() {
		let mut service = service();
		service.increment_template_popularity("2").expect("bump");
		service.increment_template_popularity("2").expect("bump");
		service.increment_template_popularity("1").expect("bump");

		let popular: Vec<_> = service
			.templates("1", "", false)
			.expect("templates")
			.into_iter()
			.map(|t| t.id)
			.collect();
		assert_eq!(popular, ["2", "1"]);

		let recent: Vec<_> = service
			.templates("1", "", true)
			.expect("templates")
			.into_iter()
			.map(|t| t.id)
			.collect();
		assert_eq!(recent, ["1", "2"]);

		let other_manuscript = service.templates("2", "", false).expect("templates");
		assert_eq!(other_manuscript.len(), 1);
		assert_eq!(other_manuscript[0].display_text, "divinename-en-propernoun");

		assert!(matches!(
			service.increment_template_popularity("99"),
			Err(ServiceError::TemplateNotFound { .. })
		));
	}

	#[test]
	fn saved_templates_get_the_next_id() {
		let mut service = service();
		assert_eq!(service.next_template_id().expect("id"), "3");
		service
			.save_template(&Template {
				annotation: "new".into(),
				..Template::default()
			})
			.expect("save");
		assert_eq!(service.next_template_id().expect("id"), "4");
	}

	#[test]
	fn vocabulary_is_sorted_and_distinct() {
		let service = service();
		assert_eq!(service.languages("1").expect("languages"), ["en"]);
		assert!(service.annotation_types("2").expect("types").is_empty());
		assert_eq!(service.annotation_types("all").expect("types"), ["gloss"]);
	}

	#[test]
	fn bulk_save_applies_updates_and_deletions() {
		let mut service = service();
		let mut rows = service
			.filter_annotations(&AnnotationFilter::default())
			.expect("filter");
		rows[0].flag = true;
		service
			.save_annotations(&BulkChanges {
				updated_rows: rows.clone(),
				deleted_rows: Vec::new(),
			})
			.expect("save");
		let flagged = AnnotationFilter::parse("flag=true").expect("filter");
		assert_eq!(service.filter_annotations(&flagged).expect("filter").len(), 1);

		service
			.save_annotations(&BulkChanges {
				updated_rows: Vec::new(),
				deleted_rows: rows,
			})
			.expect("save");
		assert!(service.filter_annotations(&flagged).expect("filter").is_empty());
	}

	#[test]
	fn snapshot_loads_from_disk() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("snapshot.json");
		let snapshot = Snapshot::sample();
		fs::write(&path, serde_json::to_string(&snapshot).expect("json")).expect("write");

		let loaded = Snapshot::load(&path).expect("load");
		assert_eq!(loaded.verses.len(), 7);
		assert_eq!(loaded.annotations, snapshot.annotations);
		assert!(Snapshot::load(&dir.path().join("missing.json")).is_err());
	}
}
