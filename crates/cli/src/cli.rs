use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use typist_protocol::{BrowserKind, ControlKey, Selector};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "typist")]
#[command(about = "Type text into a web page field through WebDriver")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Configuration file (defaults to <config dir>/typist/config.toml when present)
	#[arg(short, long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Open the page, type the payload into the field and submit it
	Run(RunArgs),

	/// Print the effective configuration as TOML
	Config(SettingsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
	#[command(flatten)]
	pub settings: SettingsArgs,

	/// Report format
	#[arg(short, long, value_enum, default_value = "text")]
	pub format: OutputFormat,
}

/// Flags layered over the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
	/// Page to open
	#[arg(long, value_name = "URL")]
	pub url: Option<String>,

	/// Target field: `name=q`, `id=...`, `css=...`, `xpath=...` (bare value is a name)
	#[arg(short, long, value_name = "SELECTOR")]
	pub selector: Option<Selector>,

	/// Text to type
	#[arg(short, long, conflicts_with = "text_file")]
	pub text: Option<String>,

	/// Read the text to type from a file
	#[arg(long, value_name = "FILE")]
	pub text_file: Option<PathBuf>,

	/// Pause after each typed character, in milliseconds
	#[arg(short, long, value_name = "MS")]
	pub delay_ms: Option<u64>,

	/// Skip the initial bulk write and only type character by character
	#[arg(long)]
	pub no_bulk: bool,

	/// Do not press the submit key at the end
	#[arg(long)]
	pub no_submit: bool,

	/// Key sent to submit the field
	#[arg(long, value_name = "KEY")]
	pub submit_key: Option<ControlKey>,

	/// Browser to drive
	#[arg(short, long, value_enum)]
	pub browser: Option<BrowserArg>,

	/// Run the browser without a window
	#[arg(long, overrides_with = "no_headless")]
	pub headless: bool,

	/// Show the browser window even if the configuration file asks for headless
	#[arg(long, overrides_with = "headless")]
	pub no_headless: bool,

	/// Use an already running WebDriver service instead of spawning one
	#[arg(long, value_name = "URL")]
	pub webdriver: Option<String>,

	/// Path to the chromedriver/geckodriver executable
	#[arg(long, value_name = "PATH")]
	pub driver_path: Option<PathBuf>,

	/// Port for the spawned driver service
	#[arg(long)]
	pub port: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BrowserArg {
	Chrome,
	Firefox,
}

impl From<BrowserArg> for BrowserKind {
	fn from(arg: BrowserArg) -> Self {
		match arg {
			BrowserArg::Chrome => BrowserKind::Chrome,
			BrowserArg::Firefox => BrowserKind::Firefox,
		}
	}
}
