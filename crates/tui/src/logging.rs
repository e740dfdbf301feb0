//! In-app log console backed by `tui-logger`.

use log::LevelFilter;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::style::Theme;

/// Install the `tui-logger` backend as the global logger.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
	if let Err(err) = tui_logger::init_logger(level) {
		log::debug!("logger already installed: {err}");
	}
	tui_logger::set_default_level(level);
}

/// Widget state for the toggleable log pane.
pub(crate) struct LogPane {
	widget: TuiWidgetState,
	pub(crate) visible: bool,
}

impl LogPane {
	pub(crate) fn new(visible: bool) -> Self {
		let widget = TuiWidgetState::new().set_default_display_level(LevelFilter::Debug);
		Self { widget, visible }
	}

	pub(crate) fn toggle(&mut self) {
		self.visible = !self.visible;
	}

	/// Route navigation keys to the log widget while the pane is open.
	pub(crate) fn handle_key(&self, key: KeyEvent) -> bool {
		if key.kind != KeyEventKind::Press {
			return false;
		}

		let event = match key.code {
			KeyCode::Char(' ') => Some(TuiWidgetEvent::SpaceKey),
			KeyCode::Char('h') | KeyCode::Char('H') => Some(TuiWidgetEvent::HideKey),
			KeyCode::Char('f') | KeyCode::Char('F') => Some(TuiWidgetEvent::FocusKey),
			KeyCode::Char('+') => Some(TuiWidgetEvent::PlusKey),
			KeyCode::Char('-') => Some(TuiWidgetEvent::MinusKey),
			KeyCode::PageUp => Some(TuiWidgetEvent::PrevPageKey),
			KeyCode::PageDown => Some(TuiWidgetEvent::NextPageKey),
			_ => None,
		};

		if let Some(event) = event {
			self.widget.transition(event);
			return true;
		}
		false
	}

	pub(crate) fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
		frame.render_widget(Clear, area);
		if area.width == 0 || area.height == 0 {
			return;
		}

		tui_logger::move_events();
		let widget = TuiLoggerSmartWidget::default()
			.title_log("Log")
			.title_target("Targets")
			.highlight_style(theme.highlight)
			.output_level(Some(TuiLoggerLevelOutput::Abbreviated))
			.state(&self.widget);
		frame.render_widget(widget, area);
	}
}
