use log::LevelFilter;
use serde::Deserialize;

use super::super::resolved::{ConfigError, ConfigSources};
use crate::cli::CliArgs;

pub(super) const DEFAULT_THEME: &str = "slate";

/// UI related configuration values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) theme: Option<String>,
	pub(super) show_logs: Option<bool>,
}

pub(super) struct UiResolution {
	pub(super) theme: String,
	pub(super) show_logs: bool,
}

impl UiSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(theme) = cli.theme.clone() {
			self.theme = Some(theme);
		}
		if cli.show_logs {
			self.show_logs = Some(true);
		}
	}

	pub(super) fn finalize(self) -> UiResolution {
		UiResolution {
			theme: self
				.theme
				.map(|theme| theme.trim().to_string())
				.unwrap_or_else(|| DEFAULT_THEME.to_string()),
			show_logs: self.show_logs.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LogSection {
	pub(super) level: Option<String>,
}

impl LogSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(level) = cli.log_level {
			self.level = Some(level.as_str().to_string());
		}
	}

	pub(super) fn finalize(self, sources: &ConfigSources) -> Result<LevelFilter, ConfigError> {
		let Some(level) = self.level else {
			return Ok(LevelFilter::Info);
		};
		level.trim().parse().map_err(|_| {
			ConfigError::invalid(
				"log.level",
				level.clone(),
				sources.source_for_log_level(),
				"expected one of off, error, warn, info, debug, trace",
			)
		})
	}
}
