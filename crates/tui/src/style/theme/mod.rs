mod builtins;
mod types;

pub use builtins::default_theme;
pub use types::{Theme, ThemeDefinition};

use builtins::BUILT_IN_DEFINITIONS;

/// Return the built-in themes bundled with the application.
#[must_use]
pub fn builtin_themes() -> &'static [ThemeDefinition] {
	BUILT_IN_DEFINITIONS
}

/// Look a theme up by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let wanted = name.trim();
	BUILT_IN_DEFINITIONS
		.iter()
		.find(|definition| definition.matches(wanted))
		.map(|definition| definition.theme)
}

/// Canonical names of every built-in theme, sorted.
#[must_use]
pub fn names() -> Vec<&'static str> {
	let mut names: Vec<_> = BUILT_IN_DEFINITIONS
		.iter()
		.map(|definition| definition.name)
		.collect();
	names.sort_unstable();
	names
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_accepts_aliases_in_any_case() {
		assert!(by_name("Solarized-Dark").is_some());
		assert!(by_name(" LIGHT ").is_some());
		assert!(by_name("nope").is_none());
	}

	#[test]
	fn names_are_sorted_and_include_the_default() {
		let names = names();
		assert_eq!(names, vec!["light", "slate", "solarized"]);
	}

	#[test]
	fn selection_and_preview_are_distinguishable() {
		for definition in builtin_themes() {
			let theme = definition.theme;
			assert_ne!(theme.selection, theme.preview, "{}", definition.name);
			assert_ne!(theme.preview, ratatui::style::Style::default());
		}
	}
}
