use ratatui::style::{Color, Modifier, Style};

use crate::style::theme::types::{Theme, ThemeDefinition};

const BASE03: Color = Color::Rgb(0, 43, 54);
const BASE01: Color = Color::Rgb(88, 110, 117);
const BASE1: Color = Color::Rgb(147, 161, 161);
const YELLOW: Color = Color::Rgb(181, 137, 0);
const RED: Color = Color::Rgb(220, 50, 47);
const BLUE: Color = Color::Rgb(38, 139, 210);
const CYAN: Color = Color::Rgb(42, 161, 152);

const SOLARIZED: Theme = Theme {
	header: Style::new().fg(BASE1).bg(BASE03),
	row_highlight: Style::new().bg(Color::Rgb(7, 54, 66)).fg(YELLOW),
	prompt: Style::new().fg(CYAN),
	empty: Style::new().fg(BASE01),
	highlight: Style::new().fg(YELLOW).add_modifier(Modifier::BOLD),
	selection: Style::new().fg(BASE03).bg(BLUE),
	preview: Style::new().fg(YELLOW).add_modifier(Modifier::UNDERLINED),
	error: Style::new().fg(RED),
};

pub(super) const DEFINITION: ThemeDefinition = ThemeDefinition {
	name: "solarized",
	aliases: &["solarized-dark"],
	theme: SOLARIZED,
};
