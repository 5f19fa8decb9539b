//! Element selectors.
//!
//! Selectors have a compact textual form used in config files and on the
//! command line: `name=q`, `id=search`, `css=input.q`, `xpath=//input`.
//! A string without a recognised prefix is treated as a field name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a single element on the current page is located.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
	/// Matches the `name` attribute.
	Name(String),
	/// Matches the `id` attribute.
	Id(String),
	Css(String),
	XPath(String),
}

impl Selector {
	pub fn name(value: impl Into<String>) -> Self {
		Selector::Name(value.into())
	}

	/// Returns an equivalent CSS selector, or `None` for XPath expressions.
	///
	/// WebDriver has no native "by name" strategy, so name and id lookups are
	/// expressed as attribute selectors.
	pub fn to_css(&self) -> Option<String> {
		match self {
			Selector::Name(name) => Some(format!("[name=\"{}\"]", escape_attr(name))),
			Selector::Id(id) => Some(format!("[id=\"{}\"]", escape_attr(id))),
			Selector::Css(css) => Some(css.clone()),
			Selector::XPath(_) => None,
		}
	}

	/// Returns the raw value without its strategy prefix.
	pub fn value(&self) -> &str {
		match self {
			Selector::Name(v) | Selector::Id(v) | Selector::Css(v) | Selector::XPath(v) => v,
		}
	}
}

fn escape_attr(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Default for Selector {
	fn default() -> Self {
		Selector::Name("q".to_string())
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Selector::Name(v) => write!(f, "name={v}"),
			Selector::Id(v) => write!(f, "id={v}"),
			Selector::Css(v) => write!(f, "css={v}"),
			Selector::XPath(v) => write!(f, "xpath={v}"),
		}
	}
}

impl FromStr for Selector {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err("selector must not be empty".to_string());
		}

		let selector = match s.split_once('=') {
			Some(("name", v)) => Selector::Name(v.to_string()),
			Some(("id", v)) => Selector::Id(v.to_string()),
			Some(("css", v)) => Selector::Css(v.to_string()),
			Some(("xpath", v)) => Selector::XPath(v.to_string()),
			_ => Selector::Name(s.to_string()),
		};

		if selector.value().is_empty() {
			return Err(format!("selector has an empty value: {s}"));
		}
		Ok(selector)
	}
}

impl TryFrom<String> for Selector {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Selector> for String {
	fn from(selector: Selector) -> Self {
		selector.to_string()
	}
}
