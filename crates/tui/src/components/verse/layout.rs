//! Word-wrapped placement of a verse on the terminal grid.
//!
//! Each grapheme cluster becomes a [`Glyph`] that knows both its screen cell
//! and its UTF-16 span in the verse, which is what lets mouse positions and
//! caret movement translate into tracker offsets.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One grapheme cluster placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph {
	pub(crate) start: usize,
	pub(crate) end: usize,
	pub(crate) byte_start: usize,
	pub(crate) byte_end: usize,
	pub(crate) column: u16,
	pub(crate) width: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VerseLayout {
	lines: Vec<Vec<Glyph>>,
	len: usize,
	width: u16,
}

impl VerseLayout {
	pub(crate) fn new(text: &str, width: u16) -> Self {
		let width = width.max(1);
		let mut lines: Vec<Vec<Glyph>> = Vec::new();
		let mut line: Vec<Glyph> = Vec::new();
		let mut column = 0u16;
		// index just past the last whitespace glyph on the current line
		let mut wrap_point: Option<usize> = None;
		let mut offset = 0usize;

		for (byte_start, grapheme) in text.grapheme_indices(true) {
			let units: usize = grapheme.chars().map(char::len_utf16).sum();
			let cells = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
			let glyph = Glyph {
				start: offset,
				end: offset + units,
				byte_start,
				byte_end: byte_start + grapheme.len(),
				column,
				width: cells,
			};
			offset += units;

			if column.saturating_add(cells) > width && !line.is_empty() {
				let carried = match wrap_point {
					Some(index) if index < line.len() => line.split_off(index),
					_ => Vec::new(),
				};
				lines.push(std::mem::take(&mut line));
				column = 0;
				for mut moved in carried {
					moved.column = column;
					column = column.saturating_add(moved.width);
					line.push(moved);
				}
				wrap_point = None;
			}

			let glyph = Glyph { column, ..glyph };
			column = column.saturating_add(cells);
			let is_space = grapheme.chars().all(char::is_whitespace);
			line.push(glyph);
			if is_space {
				wrap_point = Some(line.len());
			}
		}

		lines.push(line);
		Self {
			lines,
			len: offset,
			width,
		}
	}

	pub(crate) fn lines(&self) -> &[Vec<Glyph>] {
		&self.lines
	}

	pub(crate) fn height(&self) -> u16 {
		u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
	}

	pub(crate) fn width(&self) -> u16 {
		self.width
	}

	/// UTF-16 length of the laid out text.
	pub(crate) fn len(&self) -> usize {
		self.len
	}

	/// Offset of the grapheme boundary nearest to a cell relative to the
	/// layout's top-left corner.
	pub(crate) fn offset_at(&self, column: u16, row: u16) -> usize {
		let Some(line) = self.lines.get(usize::from(row)) else {
			return self.len;
		};
		for glyph in line {
			if column < glyph.column + glyph.width {
				// right half of a wide glyph snaps to its end
				let midpoint = glyph.column + glyph.width / 2;
				return if glyph.width > 1 && column >= midpoint {
					glyph.end
				} else {
					glyph.start
				};
			}
		}
		line_end(line).unwrap_or_else(|| self.line_start(usize::from(row)))
	}

	/// Cell at which a caret placed at `offset` is drawn.
	pub(crate) fn position_of(&self, offset: usize) -> (u16, u16) {
		for (row, line) in self.lines.iter().enumerate() {
			let row = u16::try_from(row).unwrap_or(u16::MAX);
			for glyph in line {
				if glyph.start >= offset {
					return (glyph.column, row);
				}
			}
			let is_last = usize::from(row) + 1 == self.lines.len();
			if let Some(last) = line.last()
				&& (last.end > offset || (is_last && last.end >= offset))
			{
				return (last.column + last.width, row);
			}
		}
		(0, 0)
	}

	/// The grapheme boundary after `offset`.
	pub(crate) fn next_boundary(&self, offset: usize) -> usize {
		self.glyphs()
			.find(|glyph| glyph.end > offset)
			.map_or(self.len, |glyph| glyph.end)
	}

	/// The grapheme boundary before `offset`.
	pub(crate) fn previous_boundary(&self, offset: usize) -> usize {
		self.glyphs()
			.take_while(|glyph| glyph.start < offset)
			.last()
			.map_or(0, |glyph| glyph.start)
	}

	fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
		self.lines.iter().flatten()
	}

	fn line_start(&self, row: usize) -> usize {
		self.lines[..row.min(self.lines.len())]
			.iter()
			.rev()
			.find_map(|line| line_end(line))
			.unwrap_or(0)
	}
}

/// Trailing whitespace stays on the line that wrapped, so clicking past the
/// end of a wrapped line lands before that whitespace.
fn line_end(line: &[Glyph]) -> Option<usize> {
	line.last().map(|glyph| glyph.end)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn columns(layout: &VerseLayout) -> Vec<Vec<(usize, u16)>> {
		layout
			.lines()
			.iter()
			.map(|line| line.iter().map(|g| (g.start, g.column)).collect())
			.collect()
	}

	#[test]
	fn wraps_at_whitespace() {
		let layout = VerseLayout::new("salaam alaikum", 10);
		assert_eq!(layout.height(), 2);
		let first: Vec<_> = layout.lines()[0].iter().map(|g| g.start).collect();
		assert_eq!(first, (0..7).collect::<Vec<_>>());
		assert_eq!(layout.lines()[1][0].column, 0);
		assert_eq!(layout.lines()[1][0].start, 7);
	}

	#[test]
	fn long_words_break_mid_word() {
		let layout = VerseLayout::new("abcdef", 4);
		assert_eq!(columns(&layout), vec![
			vec![(0, 0), (1, 1), (2, 2), (3, 3)],
			vec![(4, 0), (5, 1)],
		]);
	}

	#[test]
	fn combining_marks_stay_with_their_letter() {
		let word = "بِسْمِ";
		let layout = VerseLayout::new(word, 40);
		let glyphs = &layout.lines()[0];
		assert_eq!(glyphs.len(), 3);
		assert_eq!(glyphs[0].start, 0);
		assert_eq!(glyphs[0].end, 2);
		assert_eq!(layout.len(), 6);
		assert_eq!(layout.next_boundary(0), 2);
		assert_eq!(layout.previous_boundary(6), 4);
		assert_eq!(layout.previous_boundary(0), 0);
		assert_eq!(layout.next_boundary(6), 6);
	}

	#[test]
	fn hit_testing_maps_cells_to_offsets() {
		let layout = VerseLayout::new("salaam alaikum", 10);
		assert_eq!(layout.offset_at(0, 0), 0);
		assert_eq!(layout.offset_at(3, 0), 3);
		assert_eq!(layout.offset_at(9, 0), 7);
		assert_eq!(layout.offset_at(2, 1), 9);
		assert_eq!(layout.offset_at(9, 1), 14);
		assert_eq!(layout.offset_at(0, 5), 14);
	}

	#[test]
	fn wide_glyphs_snap_to_the_nearer_edge() {
		let layout = VerseLayout::new("a😀b", 10);
		assert_eq!(layout.offset_at(1, 0), 1);
		assert_eq!(layout.offset_at(2, 0), 3);
		assert_eq!(layout.offset_at(3, 0), 3);
	}

	#[test]
	fn caret_positions_follow_wrapping() {
		let layout = VerseLayout::new("salaam alaikum", 10);
		assert_eq!(layout.position_of(0), (0, 0));
		assert_eq!(layout.position_of(6), (6, 0));
		assert_eq!(layout.position_of(7), (0, 1));
		assert_eq!(layout.position_of(14), (7, 1));
	}

	#[test]
	fn empty_text_has_one_empty_line() {
		let layout = VerseLayout::new("", 10);
		assert_eq!(layout.height(), 1);
		assert_eq!(layout.offset_at(4, 0), 0);
		assert_eq!(layout.position_of(0), (0, 0));
	}
}
