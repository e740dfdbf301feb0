use super::*;
use crate::verse::{VerseText, utf16_len};

const BASMALA: &str = "بِسْمِ اللَّهِ";

fn verse(text: &str) -> VerseText {
	VerseText::new("1:1", text)
}

fn range(start: usize, end: usize) -> SelectionRange {
	SelectionRange::new(start, end).expect("valid range")
}

fn provider(raw: RawSelection) -> impl Fn() -> Option<RawSelection> {
	move || Some(raw.clone())
}

fn no_selection() -> Option<RawSelection> {
	None
}

#[test]
fn highlight_segments_reassemble_the_verse() {
	for text in ["hello", "salaam alaikum", BASMALA, "a😀b", ""] {
		let v = verse(text);
		for start in 0..=v.len() {
			for end in start..=v.len() {
				let Ok(segments) = apply_highlight(&v, range(start, end)) else {
					// offsets inside a surrogate pair
					continue;
				};
				assert_eq!(segments.joined(), text);
				assert_eq!(Ok(segments.between.as_str()), v.slice(range(start, end)));
			}
		}
	}
}

#[test]
fn clear_highlight_puts_everything_between() {
	let v = verse(BASMALA);
	let segments = clear_highlight(&v);
	assert_eq!(segments.before, "");
	assert_eq!(segments.between, BASMALA);
	assert_eq!(segments.after, "");
}

#[test]
fn highlight_past_the_end_is_a_range_error() {
	let err = apply_highlight(&verse("hello"), range(2, 10)).expect_err("out of bounds");
	assert_eq!(
		err,
		RangeError::OutOfBounds {
			start: 2,
			end: 10,
			len: 5
		}
	);
}

#[test]
fn previewing_a_stored_range_splits_the_verse() {
	let mut display = VerseDisplay::new(verse("salaam alaikum"));
	display.hover_annotation("0 - 6").expect("preview");

	let segments = display.segments();
	assert_eq!(segments.before, "");
	assert_eq!(segments.between, "salaam");
	assert_eq!(segments.after, " alaikum");
	assert_eq!(display.state(), HighlightState::AnnotationPreview);

	display.leave_annotation();
	assert_eq!(display.state(), HighlightState::None);
	assert_eq!(display.segments(), &clear_highlight(display.verse()));
}

#[test]
fn selecting_the_first_arabic_word() {
	let word = "بِسْمِ";
	let v = verse(BASMALA);
	let raw = RawSelection::single(BASMALA, 0, word);

	let span = capture_selection(&v, &raw).expect("capture").expect("span");
	assert_eq!(span.range, range(0, utf16_len(word)));
	assert_eq!(span.text, word);
	assert_eq!(span.range_string(), format!("0 - {}", utf16_len(word)));
	assert_eq!(parse_range(&span.range_string()), Ok(span.range));
}

#[test]
fn collapsed_selection_is_not_an_error() {
	let v = verse("hello");
	let raw = RawSelection::single("hello", 3, "");
	assert_eq!(capture_selection(&v, &raw), Ok(None));
}

#[test]
fn offsets_accumulate_across_rendered_nodes() {
	// Verse already rendered with an annotation preview over "salaam".
	let v = verse("salaam alaikum");
	let raw = RawSelection {
		nodes: vec!["".into(), "salaam".into(), " alaikum".into()],
		anchor: NodeOffset { node: 2, offset: 1 },
		text: "alaikum".into(),
	};

	let span = capture_selection(&v, &raw).expect("capture").expect("span");
	assert_eq!(span.range, range(7, 14));
}

#[test]
fn offsets_count_a_non_empty_before_segment() {
	let v = verse(BASMALA);
	let first = "بِسْمِ ";
	let raw = RawSelection {
		nodes: vec![first.into(), "اللَّهِ".into(), String::new()],
		anchor: NodeOffset { node: 1, offset: 0 },
		text: "اللَّهِ".into(),
	};

	let span = capture_selection(&v, &raw).expect("capture").expect("span");
	assert_eq!(span.range.start(), utf16_len(first));
	assert_eq!(span.range.end(), v.len());
}

#[test]
fn stale_rendering_is_rejected() {
	let v = verse("salaam alaikum");
	let raw = RawSelection::single("salaam alaikum", 0, "alaikum");
	assert!(matches!(
		capture_selection(&v, &raw),
		Err(RangeError::Mismatch { start: 0, end: 7, .. })
	));

	let raw = RawSelection::single("salaam alaikum wa rahmatullah", 15, "wa");
	assert!(matches!(
		capture_selection(&v, &raw),
		Err(RangeError::OutOfBounds { .. })
	));
}

#[test]
fn preview_overrides_but_keeps_the_pending_selection() {
	let mut display = VerseDisplay::new(verse("salaam alaikum"));
	display
		.capture(&provider(RawSelection::single("salaam alaikum", 7, "alaikum")))
		.expect("capture");
	assert_eq!(display.state(), HighlightState::Selected);
	assert_eq!(display.segments().between, "alaikum");

	display.hover_annotation("0 - 6").expect("preview");
	assert_eq!(display.state(), HighlightState::AnnotationPreview);
	assert_eq!(display.segments().between, "salaam");
	assert!(display.selected().is_some());

	display.leave_annotation();
	assert_eq!(display.state(), HighlightState::Selected);
	assert_eq!(display.segments().between, "alaikum");
}

#[test]
fn empty_selection_clears_the_pending_span() {
	let mut display = VerseDisplay::new(verse("hello world"));
	display
		.capture(&provider(RawSelection::single("hello world", 0, "hello")))
		.expect("capture");
	assert!(display.selected().is_some());

	display.capture(&no_selection).expect("capture");
	assert!(display.selected().is_none());
	assert_eq!(display.state(), HighlightState::None);
}

#[test]
fn navigating_resets_selection_before_new_segments() {
	let mut display = VerseDisplay::new(verse("salaam alaikum"));
	display
		.capture(&provider(RawSelection::single("salaam alaikum", 0, "salaam")))
		.expect("capture");
	display.hover_annotation("7 - 14").expect("preview");

	display.load_verse(VerseText::new("1:2", "hi"));
	assert!(display.selected().is_none());
	assert!(display.preview().is_none());
	assert_eq!(display.state(), HighlightState::None);
	assert_eq!(display.segments(), &clear_highlight(display.verse()));
}

#[test]
fn opening_the_popup_hands_over_the_selection() {
	let mut display = VerseDisplay::new(verse("hello world"));
	display
		.capture(&provider(RawSelection::single("hello world", 6, "world")))
		.expect("capture");

	let span = display.open_popup().expect("pending span");
	assert_eq!(span.range_string(), "6 - 11");
	assert_eq!(display.state(), HighlightState::None);

	let ignored = display
		.capture(&provider(RawSelection::single("hello world", 0, "hello")))
		.expect("ignored");
	assert!(ignored.is_none());
	assert!(display.selected().is_none());

	display.close_popup();
	display
		.capture(&provider(RawSelection::single("hello world", 0, "hello")))
		.expect("capture");
	assert_eq!(display.state(), HighlightState::Selected);
}

#[test]
fn malformed_or_stale_preview_is_discarded() {
	let mut display = VerseDisplay::new(verse("hello"));
	assert!(matches!(
		display.hover_annotation("5-10"),
		Err(PreviewError::Format(_))
	));
	assert!(matches!(
		display.hover_annotation("2 - 10"),
		Err(PreviewError::Range(RangeError::OutOfBounds { .. }))
	));
	assert_eq!(display.state(), HighlightState::None);
}
