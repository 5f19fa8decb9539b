//! Run configuration.
//!
//! Every field has a built-in default, so an empty file (or no file at all)
//! reproduces the stock run: type [`DEFAULT_PAYLOAD`] into the `q` field of
//! `https://www.google.com` with a 1 ms delay and press Return.
//!
//! ```toml
//! [typing]
//! url = "https://duckduckgo.com"
//! selector = "name=q"
//! payload = "hello"
//! delay_ms = 5
//! bulk_write = false
//!
//! [session]
//! browser = "firefox"
//! headless = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use typist_protocol::{BrowserKind, ControlKey, Selector, SessionCapabilities};

use crate::error::{Error, Result};

pub const DEFAULT_URL: &str = "https://www.google.com";
pub const DEFAULT_DELAY_MS: u64 = 1;
pub const DEFAULT_PAYLOAD: &str = "no se porque pienso que escribir de esta manera probara que mi capacidad para escribir mucho mas rapido y sin acentos sea mi unica forma de escribir mas rapido en esta pagina pero aun asi tengo que seguir comprobando esto y hago este texto para comprobar de nuevo mis habilidades y mi velocidad asi que solo estoy poniendo palabras o frases aleatorias para llenar suficientes palabras o lineas para darme cuenta mi velocidad al escribir este texto y que asi de alguna manera ponga una barra y tratar de superarla haciendo el mismo test varias veces hasta que pueda escribirlo todo aunque no se si llegara el dia en que pueda escribir todo esto en menos de un minuto";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub typing: TypingConfig,
	pub session: SessionConfig,
}

impl Config {
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input).map_err(|e| Error::Config(e.to_string()))?;
		config.typing.validate()?;
		Ok(config)
	}

	/// Reads and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
		Self::from_toml_str(&raw).map_err(|e| match e {
			Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
			other => other,
		})
	}

	/// Loads `path` when it exists, otherwise returns defaults.
	pub fn load_or_default(path: &Path) -> Result<Self> {
		if path.is_file() { Self::load(path) } else { Ok(Self::default()) }
	}

	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
	}
}

/// What to type, where, and how fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypingConfig {
	pub url: String,
	pub selector: Selector,
	pub payload: String,
	/// Pause after each per-character write.
	pub delay_ms: u64,
	/// Write the whole payload once before the per-character pass.
	pub bulk_write: bool,
	pub submit: bool,
	pub submit_key: ControlKey,
}

impl Default for TypingConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_URL.to_string(),
			selector: Selector::default(),
			payload: DEFAULT_PAYLOAD.to_string(),
			delay_ms: DEFAULT_DELAY_MS,
			bulk_write: true,
			submit: true,
			submit_key: ControlKey::default(),
		}
	}
}

impl TypingConfig {
	pub fn delay(&self) -> Duration {
		Duration::from_millis(self.delay_ms)
	}

	pub fn validate(&self) -> Result<()> {
		let url = url::Url::parse(&self.url).map_err(|e| Error::Config(format!("invalid url {:?}: {e}", self.url)))?;
		if url.cannot_be_a_base() && url.scheme() != "data" && url.scheme() != "about" {
			return Err(Error::Config(format!("unsupported url: {}", self.url)));
		}
		if self.payload.is_empty() {
			return Err(Error::Config("payload must not be empty".to_string()));
		}
		Ok(())
	}
}

/// How the browser session is obtained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
	pub browser: BrowserKind,
	pub headless: bool,
	/// Existing WebDriver endpoint. When unset a driver service is spawned.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub webdriver: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub driver_path: Option<PathBuf>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub port: Option<u16>,
	/// Extra browser command-line arguments.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub args: Vec<String>,
}

impl SessionConfig {
	pub fn capabilities(&self) -> SessionCapabilities {
		let mut caps = SessionCapabilities::new(self.browser).headless(self.headless);
		for arg in &self.args {
			caps = caps.arg(arg.clone());
		}
		caps
	}
}
