//! WebDriver executable discovery.

use std::path::{Path, PathBuf};

use typist_protocol::BrowserKind;

/// Resolves the driver executable for `browser`.
///
/// An explicit path wins when it exists. Otherwise `PATH` is searched, then
/// the usual install locations for the current platform.
pub fn find_driver_executable(browser: BrowserKind, explicit: Option<&Path>) -> Option<PathBuf> {
	if let Some(path) = explicit {
		return path.is_file().then(|| path.to_path_buf());
	}

	if let Ok(path) = which::which(browser.driver_binary()) {
		return Some(path);
	}

	driver_candidates(browser).into_iter().find(|candidate| candidate.is_file())
}

/// Well-known install locations for the driver binary, in search order.
pub fn driver_candidates(browser: BrowserKind) -> Vec<PathBuf> {
	let binary = browser.driver_binary();

	let dirs: Vec<PathBuf> = if cfg!(target_os = "macos") {
		["/opt/homebrew/bin", "/usr/local/bin"].into_iter().map(PathBuf::from).collect()
	} else if cfg!(target_os = "windows") {
		windows_roots()
	} else {
		let mut dirs: Vec<PathBuf> = ["/usr/local/bin", "/usr/bin", "/snap/bin"].into_iter().map(PathBuf::from).collect();
		if browser == BrowserKind::Chrome {
			dirs.push(PathBuf::from("/usr/lib/chromium"));
			dirs.push(PathBuf::from("/usr/lib/chromium-browser"));
		}
		dirs
	};

	let file_name = if cfg!(target_os = "windows") {
		format!("{binary}.exe")
	} else {
		binary.to_string()
	};

	let mut candidates: Vec<PathBuf> = dirs.into_iter().map(|dir| dir.join(&file_name)).collect();
	if cfg!(target_os = "linux") && browser == BrowserKind::Chrome {
		candidates.push(PathBuf::from("/snap/bin/chromium.chromedriver"));
	}
	candidates
}

fn windows_roots() -> Vec<PathBuf> {
	let mut roots = Vec::new();
	for key in ["LOCALAPPDATA", "PROGRAMFILES"] {
		if let Ok(value) = std::env::var(key) {
			roots.push(PathBuf::from(value).join("WebDriver"));
		}
	}
	if roots.is_empty() {
		roots.push(PathBuf::from(r"C:\WebDriver"));
	}
	roots
}
