//! Effective configuration: built-in defaults, then the config file, then flags.

use std::path::{Path, PathBuf};

use typist::{Config, Error, Result};

use crate::cli::SettingsArgs;

/// `<config dir>/typist/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("typist").join("config.toml"))
}

/// Loads the file layer. An explicit path must exist; the default path is optional.
pub fn load_file(explicit: Option<&Path>) -> Result<Config> {
	match explicit {
		Some(path) => Config::load(path),
		None => match default_config_path() {
			Some(path) => Config::load_or_default(&path),
			None => Ok(Config::default()),
		},
	}
}

/// Applies command-line overrides on top of `config`.
pub fn apply_overrides(mut config: Config, args: &SettingsArgs) -> Result<Config> {
	let typing = &mut config.typing;
	if let Some(url) = &args.url {
		typing.url = url.clone();
	}
	if let Some(selector) = &args.selector {
		typing.selector = selector.clone();
	}
	if let Some(text) = &args.text {
		typing.payload = text.clone();
	}
	if let Some(path) = &args.text_file {
		typing.payload = read_payload(path)?;
	}
	if let Some(delay_ms) = args.delay_ms {
		typing.delay_ms = delay_ms;
	}
	if args.no_bulk {
		typing.bulk_write = false;
	}
	if args.no_submit {
		typing.submit = false;
	}
	if let Some(key) = args.submit_key {
		typing.submit_key = key;
	}

	let session = &mut config.session;
	if let Some(browser) = args.browser {
		session.browser = browser.into();
	}
	if args.headless {
		session.headless = true;
	}
	if args.no_headless {
		session.headless = false;
	}
	if let Some(endpoint) = &args.webdriver {
		session.webdriver = Some(endpoint.clone());
	}
	if let Some(path) = &args.driver_path {
		session.driver_path = Some(path.clone());
	}
	if let Some(port) = args.port {
		session.port = Some(port);
	}

	config.typing.validate()?;
	Ok(config)
}

/// Reads a payload file, dropping one trailing line break.
fn read_payload(path: &Path) -> Result<String> {
	let raw = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
	let trimmed = raw.strip_suffix('\n').map(|s| s.strip_suffix('\r').unwrap_or(s)).unwrap_or(&raw);
	Ok(trimmed.to_string())
}

/// Resolves the configuration a command runs with.
pub fn resolve(explicit: Option<&Path>, args: &SettingsArgs) -> Result<Config> {
	apply_overrides(load_file(explicit)?, args)
}
