//! New-session capabilities.
//!
//! See: <https://www.w3.org/TR/webdriver2/#capabilities>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Browser engine driven through WebDriver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
	#[default]
	Chrome,
	Firefox,
}

impl BrowserKind {
	/// Value of the standard `browserName` capability.
	pub fn browser_name(self) -> &'static str {
		match self {
			BrowserKind::Chrome => "chrome",
			BrowserKind::Firefox => "firefox",
		}
	}

	/// Executable name of the matching WebDriver service.
	pub fn driver_binary(self) -> &'static str {
		match self {
			BrowserKind::Chrome => "chromedriver",
			BrowserKind::Firefox => "geckodriver",
		}
	}

	fn options_key(self) -> &'static str {
		match self {
			BrowserKind::Chrome => "goog:chromeOptions",
			BrowserKind::Firefox => "moz:firefoxOptions",
		}
	}
}

impl fmt::Display for BrowserKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.browser_name())
	}
}

impl FromStr for BrowserKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"chrome" | "chromium" => Ok(BrowserKind::Chrome),
			"firefox" | "gecko" => Ok(BrowserKind::Firefox),
			_ => Err(format!("unknown browser: {s}")),
		}
	}
}

/// Capabilities requested when opening a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCapabilities {
	pub browser: BrowserKind,
	#[serde(default)]
	pub headless: bool,
	/// Extra command-line arguments passed to the browser binary.
	#[serde(default)]
	pub args: Vec<String>,
}

impl SessionCapabilities {
	pub fn new(browser: BrowserKind) -> Self {
		Self {
			browser,
			..Default::default()
		}
	}

	pub fn headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// Builds the `alwaysMatch`-style capability object sent to the service.
	pub fn to_wire(&self) -> Map<String, Value> {
		let mut args = self.args.clone();
		if self.headless {
			match self.browser {
				BrowserKind::Chrome => {
					args.push("--headless=new".to_string());
					args.push("--disable-gpu".to_string());
				}
				BrowserKind::Firefox => args.push("-headless".to_string()),
			}
		}

		let mut caps = Map::new();
		caps.insert("browserName".to_string(), json!(self.browser.browser_name()));
		caps.insert(self.browser.options_key().to_string(), json!({ "args": args }));
		caps
	}
}
