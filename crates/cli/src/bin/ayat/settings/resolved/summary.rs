use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	if config.offline {
		match &config.snapshot {
			Some(path) => println!("  Service: offline ({})", path.display()),
			None => println!("  Service: offline (default snapshot or built-in sample)"),
		}
	} else {
		println!("  Service: {}", config.service_url);
		println!("  Timeout: {}s", config.timeout.as_secs());
	}
	println!(
		"  Manuscript: {}",
		config
			.manuscript
			.as_deref()
			.unwrap_or("(first listed by the service)")
	);
	println!("  Start verse: {}", config.verse);
	println!("  UI theme: {}", config.theme);
	println!("  Log pane: {}", bool_to_word(config.show_logs));
	println!("  Log level: {}", config.log_level);
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "open" } else { "closed" }
}
