use std::path::PathBuf;
use std::time::Duration;

use ayat_core::DEFAULT_SERVICE_URL;
use ayat_tui::SessionOptions;
use serde::Deserialize;

use crate::cli::CliArgs;

pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where annotations come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ServiceSection {
	pub(super) url: Option<String>,
	pub(super) timeout_secs: Option<u64>,
	pub(super) offline: Option<bool>,
	pub(super) snapshot: Option<PathBuf>,
}

pub(super) struct ServiceResolution {
	pub(super) url: String,
	pub(super) timeout: Duration,
	pub(super) offline: bool,
	pub(super) snapshot: Option<PathBuf>,
}

impl ServiceSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(url) = cli.service_url.clone() {
			self.url = Some(url);
		}
		if let Some(timeout) = cli.timeout_secs {
			self.timeout_secs = Some(timeout);
		}
		if let Some(offline) = cli.offline {
			self.offline = Some(offline);
		}
		if let Some(snapshot) = cli.snapshot.clone() {
			self.snapshot = Some(snapshot);
		}
	}

	pub(super) fn finalize(self) -> ServiceResolution {
		let url = self
			.url
			.map(|url| url.trim().trim_end_matches('/').to_string())
			.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
		ServiceResolution {
			url,
			timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
			offline: self.offline.unwrap_or(false),
			snapshot: self.snapshot,
		}
	}
}

/// What the session opens with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SessionSection {
	pub(super) manuscript: Option<String>,
	pub(super) verse: Option<String>,
}

pub(super) struct SessionResolution {
	pub(super) manuscript: Option<String>,
	pub(super) verse: String,
}

impl SessionSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(manuscript) = cli.manuscript.clone() {
			self.manuscript = Some(manuscript);
		}
		if let Some(verse) = cli.verse.clone() {
			self.verse = Some(verse);
		}
	}

	pub(super) fn finalize(self) -> SessionResolution {
		let manuscript = self
			.manuscript
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty());
		let verse = self
			.verse
			.map(|value| value.trim().to_string())
			.unwrap_or_else(|| SessionOptions::default().verse);
		SessionResolution { manuscript, verse }
	}
}
