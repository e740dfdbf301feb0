use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use super::RawConfig;
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
	let mut cli = CliArgs::parse_from(["ayat", "--log-level", "debug", "--offline"]);
	cli.service_url = Some("http://cli.local".into());
	cli.timeout_secs = Some(4);
	cli.snapshot = Some(PathBuf::from("/tmp/snapshot.json"));
	cli.manuscript = Some("2".into());
	cli.verse = Some("1:3".into());
	cli.theme = Some("light".into());
	cli.show_logs = true;

	let mut config = RawConfig::default();
	config.service.url = Some("http://file.local".into());
	config.ui.theme = Some("solarized".into());
	config.apply_cli_overrides(&cli);

	assert_eq!(config.service.url, cli.service_url);
	assert_eq!(config.service.timeout_secs, Some(4));
	assert_eq!(config.service.offline, Some(true));
	assert_eq!(config.service.snapshot, cli.snapshot);
	assert_eq!(config.session.manuscript, cli.manuscript);
	assert_eq!(config.session.verse, cli.verse);
	assert_eq!(config.ui.theme, cli.theme);
	assert_eq!(config.ui.show_logs, Some(true));
	assert_eq!(config.log.level.as_deref(), Some("debug"));
}

#[test]
fn defaults_resolve_to_a_local_online_session() {
	let cli = CliArgs::parse_from(["ayat"]);
	let resolved = RawConfig::default().resolve(&cli).expect("resolves");
	assert_eq!(resolved.service_url, ayat_core::DEFAULT_SERVICE_URL);
	assert_eq!(resolved.timeout, Duration::from_secs(10));
	assert!(!resolved.offline);
	assert_eq!(resolved.verse, "1:1");
	assert_eq!(resolved.theme, "slate");
	assert_eq!(resolved.log_level, LevelFilter::Info);
	assert!(resolved.manuscript.is_none());
}

#[test]
fn trailing_slashes_are_trimmed_from_the_service_url() {
	let cli = CliArgs::parse_from(["ayat", "--service-url", "https://example.org/api/"]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);
	let resolved = config.resolve(&cli).expect("resolves");
	assert_eq!(resolved.service_url, "https://example.org/api");
}

#[test]
fn unknown_log_level_names_its_origin() {
	let cli = CliArgs::parse_from(["ayat"]);
	let mut config = RawConfig::default();
	config.log.level = Some("loud".into());
	let err = config.resolve(&cli).expect_err("rejects level");
	let message = err.to_string();
	assert!(message.contains("log.level"));
	assert!(message.contains("configuration key"));
}

#[test]
fn blank_manuscript_means_none() {
	let cli = CliArgs::parse_from(["ayat", "-m", "  "]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);
	let resolved = config.resolve(&cli).expect("resolves");
	assert!(resolved.manuscript.is_none());
}
