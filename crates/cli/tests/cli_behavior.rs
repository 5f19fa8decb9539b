use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn typist_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_typist"))
}

fn run_typist(workdir: &Path, args: &[&str]) -> (bool, String, String) {
	let output = Command::new(typist_binary())
		.current_dir(workdir)
		.env_remove("RUST_LOG")
		.args(args)
		.output()
		.expect("failed to execute typist");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

fn write_config(workdir: &Path, body: &str) -> PathBuf {
	let path = workdir.join("typist.toml");
	std::fs::write(&path, body).expect("config should be written");
	path
}

fn free_port() -> u16 {
	let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind should succeed");
	listener.local_addr().expect("local addr").port()
}

#[test]
fn config_prints_stock_defaults() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let config = write_config(tmp.path(), "");

	let (success, stdout, stderr) = run_typist(tmp.path(), &["--config", config.to_str().unwrap(), "config"]);
	assert!(success, "config failed: {stderr}");
	assert!(stdout.contains("url = \"https://www.google.com\""), "{stdout}");
	assert!(stdout.contains("selector = \"name=q\""), "{stdout}");
	assert!(stdout.contains("delay_ms = 1"), "{stdout}");
	assert!(stdout.contains("bulk_write = true"), "{stdout}");
	assert!(stdout.contains("submit_key = \"return\""), "{stdout}");
}

#[test]
fn config_applies_file_then_flags() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let config = write_config(tmp.path(), "[typing]\npayload = \"from file\"\ndelay_ms = 40\n\n[session]\nbrowser = \"firefox\"\n");

	let (success, stdout, stderr) = run_typist(
		tmp.path(),
		&["--config", config.to_str().unwrap(), "config", "--delay-ms", "7", "--no-bulk", "--selector", "id=search"],
	);
	assert!(success, "config failed: {stderr}");
	assert!(stdout.contains("payload = \"from file\""), "{stdout}");
	assert!(stdout.contains("delay_ms = 7"), "{stdout}");
	assert!(stdout.contains("bulk_write = false"), "{stdout}");
	assert!(stdout.contains("selector = \"id=search\""), "{stdout}");
	assert!(stdout.contains("browser = \"firefox\""), "{stdout}");
}

#[test]
fn invalid_config_file_fails() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let config = write_config(tmp.path(), "[typing]\nurl = \"not a url\"\n");

	let (success, _stdout, stderr) = run_typist(tmp.path(), &["--config", config.to_str().unwrap(), "config"]);
	assert!(!success);
	assert!(stderr.contains("invalid configuration"), "{stderr}");
}

#[test]
fn run_without_webdriver_reports_session_start() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let config = write_config(tmp.path(), "");
	let endpoint = format!("http://127.0.0.1:{}", free_port());

	let (success, stdout, stderr) = run_typist(
		tmp.path(),
		&["--config", config.to_str().unwrap(), "run", "--text", "hello", "--webdriver", &endpoint],
	);
	assert!(!success);
	assert!(stdout.is_empty(), "{stdout}");
	assert!(stderr.contains("start session"), "{stderr}");
}

#[test]
fn run_with_missing_driver_binary_fails() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let config = write_config(tmp.path(), "");
	let missing = tmp.path().join("chromedriver");

	let (success, _stdout, stderr) = run_typist(
		tmp.path(),
		&["--config", config.to_str().unwrap(), "run", "--driver-path", missing.to_str().unwrap()],
	);
	assert!(!success);
	assert!(stderr.contains("start driver service"), "{stderr}");
}
