use ayat_core::selection::{HighlightState, VerseDisplay};
use ayat_core::verse::VerseText;

use super::clipboard::osc52_sequence;
use super::*;
use crate::components::verse::layout::VerseLayout;

const BASMALA: &str = "بِسْمِ اللَّهِ";

fn capture(display: &mut VerseDisplay, caret: &Caret) -> Option<String> {
	let provider = PaneSelection::new(display.segments(), display.verse(), caret.bounds());
	display
		.capture(&provider)
		.expect("capture")
		.map(|span| span.range_string())
}

#[test]
fn caret_bounds_are_ordered() {
	let mut caret = Caret::default();
	caret.move_to(5);
	assert_eq!(caret.bounds(), None);
	caret.extend_to(2);
	assert_eq!(caret.bounds(), Some((2, 5)));
	caret.extend_to(8);
	assert_eq!(caret.bounds(), Some((5, 8)));
	caret.extend_to(5);
	assert_eq!(caret.bounds(), None);
	caret.collapse();
	assert_eq!(caret.focus(), 5);
}

#[test]
fn drag_only_moves_while_dragging() {
	let mut caret = Caret::default();
	assert!(!caret.drag_to(3));
	caret.start_drag(1);
	assert!(caret.is_dragging());
	assert!(caret.drag_to(4));
	assert!(caret.finish_drag());
	assert!(!caret.finish_drag());
	assert_eq!(caret.bounds(), Some((1, 4)));
}

#[test]
fn keyboard_selection_of_the_first_word() {
	let verse = VerseText::new("1:1", BASMALA);
	let layout = VerseLayout::new(BASMALA, 40);
	let mut display = VerseDisplay::new(verse);
	let mut caret = Caret::default();

	let mut offset = 0;
	for _ in 0..3 {
		offset = layout.next_boundary(offset);
		caret.extend_to(offset);
	}

	assert_eq!(capture(&mut display, &caret).as_deref(), Some("0 - 6"));
	assert_eq!(display.segments().between, "بِسْمِ");
	assert_eq!(display.state(), HighlightState::Selected);
}

#[test]
fn extending_inside_an_existing_highlight_counts_earlier_spans() {
	let verse = VerseText::new("1:1", "salaam alaikum");
	let mut display = VerseDisplay::new(verse);
	let mut caret = Caret::default();

	caret.move_to(7);
	caret.extend_to(10);
	assert_eq!(capture(&mut display, &caret).as_deref(), Some("7 - 10"));
	assert_eq!(display.segments().before, "salaam ");

	// the pane now renders three spans; growing the selection still maps
	// onto the whole verse
	caret.extend_to(14);
	assert_eq!(capture(&mut display, &caret).as_deref(), Some("7 - 14"));
	assert_eq!(display.segments().between, "alaikum");
}

#[test]
fn collapsing_the_caret_clears_the_selection() {
	let verse = VerseText::new("1:1", "salaam alaikum");
	let mut display = VerseDisplay::new(verse);
	let mut caret = Caret::default();
	caret.start_drag(0);
	caret.drag_to(6);
	assert_eq!(capture(&mut display, &caret).as_deref(), Some("0 - 6"));

	caret.collapse();
	assert_eq!(capture(&mut display, &caret), None);
	assert_eq!(display.state(), HighlightState::None);
}

#[test]
fn bounds_inside_a_surrogate_pair_report_nothing() {
	let verse = VerseText::new("x", "a😀b");
	let display = VerseDisplay::new(verse);
	let provider = PaneSelection::new(display.segments(), display.verse(), Some((0, 2)));
	assert!(ayat_core::SelectionProvider::current_selection(&provider).is_none());
}

#[test]
fn osc52_wraps_base64_payload() {
	assert_eq!(osc52_sequence("hi", false), "\x1b]52;c;aGk=\x07");
	assert!(osc52_sequence("hi", true).starts_with("\x1bPtmux;"));
}
