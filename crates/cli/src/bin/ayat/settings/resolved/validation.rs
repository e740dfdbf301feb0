use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
	if config.timeout.is_zero() {
		return Err(ConfigError::invalid(
			"service.timeout_secs",
			config.timeout.as_secs().to_string(),
			sources.source_for_timeout(),
			"must be greater than zero",
		));
	}

	if !config.offline
		&& !(config.service_url.starts_with("http://") || config.service_url.starts_with("https://"))
	{
		return Err(ConfigError::invalid(
			"service.url",
			config.service_url.clone(),
			sources.source_for_service_url(),
			"must be an http:// or https:// URL",
		));
	}

	if config.verse.is_empty() {
		return Err(ConfigError::invalid(
			"session.verse",
			config.verse.clone(),
			sources.source_for_verse(),
			"must name a verse such as 1:1",
		));
	}

	if ayat_tui::style::by_name(&config.theme).is_none() {
		return Err(ConfigError::invalid(
			"ui.theme",
			config.theme.clone(),
			sources.source_for_theme(),
			format!("expected one of {}", ayat_tui::style::names().join(", ")),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use log::LevelFilter;

	use super::super::SettingSource;
	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			service_url: "http://localhost:5000".into(),
			timeout: Duration::from_secs(10),
			offline: false,
			snapshot: None,
			manuscript: None,
			verse: "1:1".into(),
			theme: "slate".into(),
			show_logs: false,
			log_level: LevelFilter::Info,
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_timeout() {
		let config = ResolvedConfig {
			timeout: Duration::ZERO,
			..config()
		};
		let sources = ConfigSources {
			timeout: Some(SettingSource::CliFlag("--timeout")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "service.timeout_secs");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_non_http_urls_only_when_online() {
		let config = ResolvedConfig {
			service_url: "ftp://annotations".into(),
			..config()
		};
		let sources = ConfigSources {
			service_url: Some(SettingSource::Environment("AYAT__SERVICE__URL")),
			..ConfigSources::default()
		};
		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "service.url");
		assert!(err.to_string().contains("environment variable"));

		let offline = ResolvedConfig {
			offline: true,
			..config
		};
		assert!(validate(&offline, &sources).is_ok());
	}

	#[test]
	fn validation_rejects_unknown_themes() {
		let config = ResolvedConfig {
			theme: "neon".into(),
			..config()
		};
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "ui.theme");
		assert!(err.to_string().contains("slate"));
		assert_eq!(err.origin, SettingSource::ConfigKey("ui.theme"));
	}

	#[test]
	fn theme_aliases_are_accepted() {
		let config = ResolvedConfig {
			theme: "Dark".into(),
			..config()
		};
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}
}
