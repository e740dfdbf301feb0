use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};
use crate::cli::CliArgs;

mod service;
mod ui;

use service::{ServiceSection, SessionSection};
use ui::{LogSection, UiSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	service: ServiceSection,
	session: SessionSection,
	ui: UiSection,
	log: LogSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.service.apply_cli_overrides(cli);
		self.session.apply_cli_overrides(cli);
		self.ui.apply_cli_overrides(cli);
		self.log.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			service_url: detect_source(
				cli.service_url.is_some(),
				self.service.url.is_some(),
				"AYAT__SERVICE__URL",
				"--service-url",
				"service.url",
			),
			timeout: detect_source(
				cli.timeout_secs.is_some(),
				self.service.timeout_secs.is_some(),
				"AYAT__SERVICE__TIMEOUT_SECS",
				"--timeout",
				"service.timeout_secs",
			),
			verse: detect_source(
				cli.verse.is_some(),
				self.session.verse.is_some(),
				"AYAT__SESSION__VERSE",
				"--verse",
				"session.verse",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"AYAT__UI__THEME",
				"--theme",
				"ui.theme",
			),
			log_level: detect_source(
				cli.log_level.is_some(),
				self.log.level.is_some(),
				"AYAT__LOG__LEVEL",
				"--log-level",
				"log.level",
			),
		};

		let service = self.service.finalize();
		let session = self.session.finalize();
		let ui = self.ui.finalize();
		let log_level = self.log.finalize(&sources).map_err(Error::new)?;

		let config = ResolvedConfig {
			service_url: service.url,
			timeout: service.timeout,
			offline: service.offline,
			snapshot: service.snapshot,
			manuscript: session.manuscript,
			verse: session.verse,
			theme: ui.theme,
			show_logs: ui.show_logs,
			log_level,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
