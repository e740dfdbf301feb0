use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Clear};

use crate::style::Theme;

/// A `width` by `height` rectangle centred in `area`, shrunk to fit.
#[must_use]
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
	let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
		.flex(Flex::Center)
		.areas(area);
	let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
		.flex(Flex::Center)
		.areas(row);
	rect
}

/// Clear `area`, draw a titled border and return the inner area.
pub(crate) fn render_popup(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
	frame.render_widget(Clear, area);
	let block = Block::default()
		.borders(Borders::ALL)
		.border_type(BorderType::Rounded)
		.border_style(theme.prompt)
		.title(Span::styled(format!(" {title} "), theme.header));
	let inner = block.inner(area);
	frame.render_widget(block, area);
	inner
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn centred_and_clamped() {
		let area = Rect::new(0, 0, 80, 24);
		assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
		assert_eq!(centered_rect(Rect::new(0, 0, 20, 5), 40, 10), Rect::new(0, 0, 20, 5));
	}
}
