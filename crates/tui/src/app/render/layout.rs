use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenAreas {
	pub(crate) header: Rect,
	pub(crate) body: Rect,
	pub(crate) logs: Option<Rect>,
	pub(crate) status: Rect,
}

pub(crate) fn split_screen(area: Rect, show_logs: bool) -> ScreenAreas {
	let [header, main, status] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Fill(1),
		Constraint::Length(1),
	])
	.areas(area);

	if !show_logs {
		return ScreenAreas {
			header,
			body: main,
			logs: None,
			status,
		};
	}
	let [body, logs] =
		Layout::vertical([Constraint::Fill(1), Constraint::Percentage(35)]).areas(main);
	ScreenAreas {
		header,
		body,
		logs: Some(logs),
		status,
	}
}

/// Split the verse tab between the verse pane and the annotation list.
///
/// The verse gets the rows its text needs plus borders, but never more than
/// half of the body while the list has content.
pub(crate) fn split_verse_tab(body: Rect, verse_rows: u16) -> (Rect, Rect) {
	let wanted = verse_rows.saturating_add(2).max(3);
	let limit = (body.height / 2).max(3);
	let [verse, list] =
		Layout::vertical([Constraint::Length(wanted.min(limit)), Constraint::Fill(1)]).areas(body);
	(verse, list)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn logs_take_the_bottom_of_the_body() {
		let area = Rect::new(0, 0, 80, 24);
		let plain = split_screen(area, false);
		assert_eq!(plain.header.height, 1);
		assert_eq!(plain.status.y, 23);
		assert_eq!(plain.body.height, 22);
		assert!(plain.logs.is_none());

		let with_logs = split_screen(area, true);
		let logs = with_logs.logs.expect("logs");
		assert_eq!(logs.y + logs.height, 23);
		assert!(with_logs.body.height < plain.body.height);
	}

	#[test]
	fn long_verses_are_capped_at_half_the_body() {
		let body = Rect::new(0, 1, 80, 20);
		let (verse, list) = split_verse_tab(body, 2);
		assert_eq!(verse.height, 4);
		assert_eq!(list.y, 5);

		let (verse, _) = split_verse_tab(body, 30);
		assert_eq!(verse.height, 10);
	}
}
