//! WebDriver control keys.
//!
//! Non-printable keys travel over the wire as code points in the Unicode
//! private-use range starting at U+E000.
//!
//! See: <https://www.w3.org/TR/webdriver2/#keyboard-actions>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A non-printable key that can be dispatched to an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKey {
	Tab,
	/// The key bound to form submission on most pages.
	#[default]
	Return,
	Enter,
	Escape,
}

impl ControlKey {
	/// Returns the code point WebDriver uses for this key.
	pub const fn code_point(self) -> char {
		match self {
			ControlKey::Tab => '\u{E004}',
			ControlKey::Return => '\u{E006}',
			ControlKey::Enter => '\u{E007}',
			ControlKey::Escape => '\u{E00C}',
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			ControlKey::Tab => "tab",
			ControlKey::Return => "return",
			ControlKey::Enter => "enter",
			ControlKey::Escape => "escape",
		}
	}

	/// Encodes the key as a one-character string suitable for `send_keys`.
	pub fn as_keys(self) -> String {
		self.code_point().to_string()
	}
}

impl fmt::Display for ControlKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ControlKey {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"tab" => Ok(ControlKey::Tab),
			"return" => Ok(ControlKey::Return),
			"enter" => Ok(ControlKey::Enter),
			"escape" | "esc" => Ok(ControlKey::Escape),
			_ => Err(format!("unknown control key: {s}")),
		}
	}
}
