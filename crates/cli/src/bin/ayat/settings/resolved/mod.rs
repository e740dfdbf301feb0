use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	pub(crate) service_url: String,
	pub(crate) timeout: Duration,
	pub(crate) offline: bool,
	/// Offline snapshot; `<data dir>/snapshot.json` when unset.
	pub(crate) snapshot: Option<PathBuf>,
	pub(crate) manuscript: Option<String>,
	pub(crate) verse: String,
	pub(crate) theme: String,
	pub(crate) show_logs: bool,
	pub(crate) log_level: LevelFilter,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
