mod light;
mod slate;
mod solarized;

use super::types::{Theme, ThemeDefinition};

pub(super) const BUILT_IN_DEFINITIONS: &[ThemeDefinition] =
	&[light::DEFINITION, slate::DEFINITION, solarized::DEFINITION];

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	slate::SLATE
}
