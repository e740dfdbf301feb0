use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use ayat_core::{HttpService, MemoryService, Snapshot, app_dirs};
use ayat_tui::{SessionOptions, SessionOutcome};
use log::info;

use crate::settings::ResolvedConfig;

const SNAPSHOT_FILE: &str = "snapshot.json";

/// Build the service the configuration asks for and run the terminal UI on it.
pub(crate) fn run(config: ResolvedConfig) -> Result<SessionOutcome> {
	ayat_tui::logging::init(config.log_level);

	let theme = ayat_tui::style::by_name(&config.theme)
		.ok_or_else(|| anyhow!("unknown theme {}", config.theme))?;
	let options = SessionOptions {
		manuscript: config.manuscript,
		verse: config.verse,
		theme,
		show_logs: config.show_logs,
	};

	if config.offline {
		let snapshot = load_snapshot(config.snapshot.as_deref())?;
		info!(
			"offline session with {} verse(s) and {} annotation(s)",
			snapshot.verses.len(),
			snapshot.annotations.len()
		);
		return ayat_tui::run(MemoryService::from_snapshot(snapshot), options);
	}

	let service = HttpService::new(&config.service_url, config.timeout)
		.with_context(|| format!("cannot use annotation service at {}", config.service_url))?;
	info!("annotating against {}", service.base_url());
	ayat_tui::run(service, options)
}

/// An explicit snapshot must exist; the default one is optional and the
/// built-in sample stands in for it.
fn load_snapshot(explicit: Option<&Path>) -> Result<Snapshot> {
	if let Some(path) = explicit {
		return Snapshot::load(path);
	}
	match default_snapshot_path() {
		Some(path) if path.is_file() => Snapshot::load(&path),
		_ => Ok(Snapshot::sample()),
	}
}

fn default_snapshot_path() -> Option<PathBuf> {
	app_dirs::get_data_dir()
		.ok()
		.map(|dir| dir.join(SNAPSHOT_FILE))
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::tempdir;

	use super::*;

	#[test]
	fn explicit_snapshot_is_loaded() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("session.json");
		fs::write(
			&path,
			r#"{"verses":[{"AyahKey":"2:1","aya_text":"الم"}],"manuscripts":[{"manuscript_id":7,"manuscript_name":"Kufic"}]}"#,
		)
		.expect("write snapshot");

		let snapshot = load_snapshot(Some(&path)).expect("snapshot");
		assert_eq!(snapshot.verses.len(), 1);
		assert_eq!(snapshot.manuscripts[0].manuscript_id, "7");
		assert!(snapshot.annotations.is_empty());
	}

	#[test]
	fn missing_explicit_snapshot_is_an_error() {
		let dir = tempdir().expect("tempdir");
		assert!(load_snapshot(Some(&dir.path().join("absent.json"))).is_err());
	}
}
