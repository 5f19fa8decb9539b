//! Error types for typing runs.

use thiserror::Error;
use typist_protocol::Selector;

use crate::driver::Stage;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// No compatible browser or driver could be reached.
	#[error("failed to start browser session: {0}")]
	SessionStart(String),

	#[error("failed to navigate to {url}: {message}")]
	Navigation { url: String, message: String },

	#[error("element not found: {selector}")]
	ElementNotFound { selector: Selector },

	/// A write, key press or read on a located element failed.
	#[error("{action} failed: {message}")]
	Interaction { action: &'static str, message: String },

	#[error("run cancelled after reaching {stage}")]
	Cancelled { stage: Stage },

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("driver service: {0}")]
	Service(#[from] typist_runtime::Error),
}

impl Error {
	pub(crate) fn interaction(action: &'static str, err: impl std::fmt::Display) -> Self {
		Error::Interaction {
			action,
			message: err.to_string(),
		}
	}

	/// Names the operation that failed, for user-facing reports.
	pub fn operation(&self) -> &'static str {
		match self {
			Error::SessionStart(_) => "start session",
			Error::Navigation { .. } => "navigate",
			Error::ElementNotFound { .. } => "find element",
			Error::Interaction { action, .. } => action,
			Error::Cancelled { .. } => "cancelled",
			Error::Config(_) => "load configuration",
			Error::Service(_) => "start driver service",
		}
	}

	pub fn is_element_not_found(&self) -> bool {
		matches!(self, Error::ElementNotFound { .. })
	}
}
