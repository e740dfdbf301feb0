use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::style::Theme;

/// Argument bundle for rendering the status row.
pub(crate) struct StatusContext<'a> {
	/// Latest message, shown on the left.
	pub(crate) message: &'a str,
	pub(crate) is_error: bool,
	/// Key hints shown when there is no message.
	pub(crate) hints: &'a str,
	/// Number of service requests still waiting for a reply.
	pub(crate) in_flight: usize,
	pub(crate) throbber_state: &'a ThrobberState,
	pub(crate) theme: &'a Theme,
}

/// Render the status row: message on the left, spinner on the right while
/// requests are outstanding.
pub(crate) fn render_status(frame: &mut Frame, area: Rect, ctx: StatusContext<'_>) {
	if area.width == 0 || area.height == 0 {
		return;
	}
	let StatusContext {
		message,
		is_error,
		hints,
		in_flight,
		throbber_state,
		theme,
	} = ctx;

	let left = if message.is_empty() {
		Span::styled(hints.to_string(), theme.empty_style())
	} else if is_error {
		Span::styled(message.to_string(), theme.error)
	} else {
		Span::styled(message.to_string(), theme.prompt)
	};
	let buffer = frame.buffer_mut();
	buffer.set_line(area.left(), area.top(), &Line::from(left), area.width);

	if in_flight == 0 {
		return;
	}
	let muted_style = theme.empty_style();
	let spinner = Throbber::default()
		.style(muted_style)
		.throbber_style(muted_style);
	let mut line = Line::default();
	line.spans.push(spinner.to_symbol_span(throbber_state));
	line.spans.push(Span::styled(format!("{in_flight} pending"), muted_style));

	let line_width = line.width() as u16;
	let start_x = if line_width >= area.width {
		area.left()
	} else {
		area.right().saturating_sub(line_width)
	};
	let max_width = area.right().saturating_sub(start_x).min(line_width);
	if max_width == 0 {
		return;
	}
	buffer.set_line(start_x, area.top(), &line, max_width);
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn render(message: &str, in_flight: usize) -> String {
		let theme = Theme::default();
		let throbber = ThrobberState::default();
		let mut terminal = Terminal::new(TestBackend::new(40, 1)).expect("terminal");
		terminal
			.draw(|frame| {
				render_status(frame, frame.area(), StatusContext {
					message,
					is_error: false,
					hints: "q quit",
					in_flight,
					throbber_state: &throbber,
					theme: &theme,
				});
			})
			.expect("draw");
		let buffer = terminal.backend().buffer();
		(0..40).map(|x| buffer[(x, 0)].symbol().to_string()).collect()
	}

	#[test]
	fn hints_fill_an_idle_status_line() {
		assert!(render("", 0).starts_with("q quit"));
	}

	#[test]
	fn pending_requests_are_counted_on_the_right() {
		let line = render("saved", 2);
		assert!(line.starts_with("saved"));
		assert!(line.trim_end().ends_with("2 pending"));
	}
}
