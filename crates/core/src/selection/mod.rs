//! Character-offset selection tracking for a displayed verse.
//!
//! Offsets are UTF-16 code units into the logical verse text, never into
//! whatever markup the verse happens to be rendered with. Ranges travel to and
//! from the annotation service as `"<start> - <end>"` strings.

mod capture;
mod display;
mod error;
mod range;
mod segments;

pub use capture::{NodeOffset, RawSelection, SelectedSpan, SelectionProvider, capture_selection};
pub use display::{HighlightState, VerseDisplay};
pub use error::{FormatError, PreviewError, RangeError};
pub use range::{RANGE_SEPARATOR, SelectionRange, parse_range, serialize_range};
pub use segments::{DisplaySegments, apply_highlight, clear_highlight};

#[cfg(test)]
mod tests;
