use clap::{CommandFactory, FromArgMatches, Parser};

use super::options::LogLevelArg;
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["ayat"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert_eq!(parsed.offline, None);
	assert!(!parsed.no_config);
}

#[test]
fn bare_offline_flag_means_enabled() {
	let parsed = CliArgs::parse_from(["ayat", "--offline"]);
	assert_eq!(parsed.offline, Some(true));
	let parsed = CliArgs::parse_from(["ayat", "--offline=no"]);
	assert_eq!(parsed.offline, Some(false));
}

#[test]
fn session_flags_are_captured() {
	let parsed = CliArgs::parse_from([
		"ayat",
		"--service-url",
		"http://annotations.local:8080",
		"-m",
		"Manuscript_2",
		"-k",
		"2:255",
		"--log-level",
		"debug",
		"-o",
		"json",
		"-c",
		"one.toml",
		"-c",
		"two.toml",
	]);
	assert_eq!(parsed.service_url.as_deref(), Some("http://annotations.local:8080"));
	assert_eq!(parsed.manuscript.as_deref(), Some("Manuscript_2"));
	assert_eq!(parsed.verse.as_deref(), Some("2:255"));
	assert_eq!(parsed.log_level, Some(LogLevelArg::Debug));
	assert_eq!(parsed.output, OutputFormat::Json);
	assert_eq!(parsed.config.len(), 2);
}
