//! UI building blocks shared across rendering and state modules.

/// Annotation list grouped by manuscript.
pub(crate) mod annotations;
/// Centered popups for forms and pickers.
pub(crate) mod popup;
/// Status line with the in-flight request spinner.
pub(crate) mod status;
/// Table rendering and configuration.
pub(crate) mod tables;
pub(crate) mod verse;

use ratatui::layout::Rect;

pub(crate) use annotations::{AnnotationList, render_annotations};
pub(crate) use popup::{centered_rect, render_popup};
pub(crate) use status::{StatusContext, render_status};
pub(crate) use tables::{TableSpec, TableView, render_table};

/// Check if a point (column, row) is inside a rectangle.
#[must_use]
pub(crate) fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	if area.width == 0 || area.height == 0 {
		return false;
	}
	let inside_x = column >= area.x && column < area.x.saturating_add(area.width);
	let inside_y = row >= area.y && row < area.y.saturating_add(area.height);
	inside_x && inside_y
}
