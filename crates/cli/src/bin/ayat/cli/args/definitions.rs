use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{LogLevelArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `ayat` binary.
#[derive(Parser, Debug)]
#[command(
	name = "ayat",
	version,
	long_version = long_version(),
	about = "Annotate Quranic verses against manuscripts from the terminal",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "AYAT_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 's',
		long = "service-url",
		value_name = "URL",
		help = "Base URL of the annotation service (default: http://localhost:5000)"
	)]
	pub(crate) service_url: Option<String>,
	#[arg(
		long = "timeout",
		value_name = "SECS",
		help = "Seconds to wait for each service request (default: 10)"
	)]
	pub(crate) timeout_secs: Option<u64>,
	#[arg(
		long,
		value_parser = BoolishValueParser::new(),
		num_args = 0..=1,
		default_missing_value = "true",
		help = "Work against a local snapshot instead of the service (default: disabled)"
	)]
	pub(crate) offline: Option<bool>,
	#[arg(
		long,
		value_name = "FILE",
		help = "Snapshot used in offline mode (default: snapshot.json in the data directory)"
	)]
	pub(crate) snapshot: Option<PathBuf>,
	#[arg(
		short = 'm',
		long,
		value_name = "ID",
		help = "Manuscript to annotate, by id or name (default: the first one listed)"
	)]
	pub(crate) manuscript: Option<String>,
	#[arg(
		short = 'k',
		long,
		value_name = "KEY",
		help = "Verse to open, as sura:aya (default: 1:1)"
	)]
	pub(crate) verse: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "show-logs",
		help = "Open the log pane on startup (default: disabled)"
	)]
	pub(crate) show_logs: bool,
	#[arg(
		long = "log-level",
		value_enum,
		help = "Minimum level recorded in the log pane (default: info)"
	)]
	pub(crate) log_level: Option<LogLevelArg>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the session summary"
	)]
	pub(crate) output: OutputFormat,
}
