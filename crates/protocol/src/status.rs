//! WebDriver service status payload.
//!
//! See: <https://www.w3.org/TR/webdriver2/#status>

use serde::{Deserialize, Serialize};

/// `GET /status` response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
	pub value: DriverStatus,
}

/// Readiness state reported by a WebDriver service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStatus {
	pub ready: bool,
	#[serde(default)]
	pub message: String,
}
