//! Verse records and the UTF-16 addressed verse text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::string_or_number;
use crate::selection::{RangeError, SelectionRange};

/// A verse as returned by the annotation service.
///
/// Field names follow the service's wire format. Only `AyahKey` and `aya_text`
/// are required; the remaining metadata defaults to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
	#[serde(rename = "AyahKey")]
	pub key: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub jozz: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub page: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub sura_no: String,
	#[serde(default)]
	pub sura_name_en: String,
	#[serde(default)]
	pub sura_name_ar: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub line_start: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub line_end: String,
	#[serde(default, deserialize_with = "string_or_number")]
	pub aya_no: String,
	pub aya_text: String,
}

impl Verse {
	/// Minimal verse with only a key and text.
	pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			id: String::new(),
			jozz: String::new(),
			page: String::new(),
			sura_no: String::new(),
			sura_name_en: String::new(),
			sura_name_ar: String::new(),
			line_start: String::new(),
			line_end: String::new(),
			aya_no: String::new(),
			aya_text: text.into(),
		}
	}

	/// The display text bound to this verse's key.
	#[must_use]
	pub fn text(&self) -> VerseText {
		VerseText::new(self.key.clone(), self.aya_text.clone())
	}

	/// Short human readable label such as `Al-Fatiha 1:1`.
	#[must_use]
	pub fn label(&self) -> String {
		if self.sura_name_en.is_empty() {
			self.key.clone()
		} else {
			format!("{} {}", self.sura_name_en, self.key)
		}
	}
}

/// Immutable verse display text addressed in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerseText {
	key: String,
	text: String,
	utf16_len: usize,
}

impl VerseText {
	pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
		let text = text.into();
		let utf16_len = utf16_len(&text);
		Self {
			key: key.into(),
			text,
			utf16_len,
		}
	}

	/// Identifier of the verse this text belongs to.
	#[must_use]
	pub fn key(&self) -> &str {
		&self.key
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.text
	}

	/// Length in UTF-16 code units.
	#[must_use]
	pub fn len(&self) -> usize {
		self.utf16_len
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// Translate a UTF-16 offset into a byte index into the UTF-8 text.
	pub fn byte_index(&self, offset: usize) -> Result<usize, RangeError> {
		byte_index(&self.text, offset).ok_or_else(|| {
			if offset > self.utf16_len {
				RangeError::OutOfBounds {
					start: offset,
					end: offset,
					len: self.utf16_len,
				}
			} else {
				RangeError::SplitsCharacter { offset }
			}
		})
	}

	/// Borrow the text covered by `range`.
	pub fn slice(&self, range: SelectionRange) -> Result<&str, RangeError> {
		self.check(range)?;
		let start = self.byte_index(range.start())?;
		let end = self.byte_index(range.end())?;
		Ok(&self.text[start..end])
	}

	/// Ensure `range` lies within `[0, len]`.
	pub fn check(&self, range: SelectionRange) -> Result<(), RangeError> {
		if range.end() > self.utf16_len {
			return Err(RangeError::OutOfBounds {
				start: range.start(),
				end: range.end(),
				len: self.utf16_len,
			});
		}
		Ok(())
	}
}

impl fmt::Display for VerseText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

/// Number of UTF-16 code units needed to encode `text`.
#[must_use]
pub fn utf16_len(text: &str) -> usize {
	text.chars().map(char::len_utf16).sum()
}

/// Byte index of the character starting at UTF-16 `offset`, or `None` when the
/// offset is past the end or lands inside a surrogate pair.
#[must_use]
pub fn byte_index(text: &str, offset: usize) -> Option<usize> {
	let mut units = 0usize;
	for (index, ch) in text.char_indices() {
		if units == offset {
			return Some(index);
		}
		units += ch.len_utf16();
		if units > offset {
			return None;
		}
	}
	(units == offset).then_some(text.len())
}
