use std::path::Path;

use crate::cli::SettingsArgs;
use crate::settings;

/// Prints the configuration `run` would use with the same flags.
pub fn execute(config_path: Option<&Path>, args: &SettingsArgs) -> anyhow::Result<()> {
	let config = settings::resolve(config_path, args)?;
	print!("{}", config.to_toml_string()?);
	Ok(())
}
