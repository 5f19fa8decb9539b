//! Driver process launch, readiness probing and shutdown.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info};
use typist_protocol::{BrowserKind, DriverStatus, StatusResponse};

use crate::error::{Error, Result};
use crate::finder::find_driver_executable;
use crate::process::{free_port, port_available};

const DEFAULT_STARTUP_ATTEMPTS: u32 = 25;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How to launch a driver service.
#[derive(Debug, Clone)]
pub struct DriverOptions {
	pub browser: BrowserKind,
	/// Explicit driver executable; discovered when `None`.
	pub executable: Option<PathBuf>,
	/// Port to listen on; a free one is picked when `None`.
	pub port: Option<u16>,
	pub startup_attempts: u32,
	pub poll_interval: Duration,
}

impl DriverOptions {
	pub fn new(browser: BrowserKind) -> Self {
		Self {
			browser,
			executable: None,
			port: None,
			startup_attempts: DEFAULT_STARTUP_ATTEMPTS,
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}

	pub fn executable(mut self, path: Option<PathBuf>) -> Self {
		self.executable = path;
		self
	}

	pub fn port(mut self, port: Option<u16>) -> Self {
		self.port = port;
		self
	}
}

/// A running WebDriver service.
///
/// The child process is killed when this handle is dropped; call
/// [`DriverService::shutdown`] to also wait for it to exit.
#[derive(Debug)]
pub struct DriverService {
	child: Child,
	browser: BrowserKind,
	port: u16,
	pid: Option<u32>,
}

impl DriverService {
	/// Spawns the driver and waits until its `/status` reports ready.
	pub async fn start(options: &DriverOptions) -> Result<Self> {
		let binary = options.browser.driver_binary();
		let path = find_driver_executable(options.browser, options.executable.as_deref())
			.ok_or(Error::DriverNotFound { binary })?;

		let port = match options.port {
			Some(port) if !port_available(port) => return Err(Error::PortUnavailable(port)),
			Some(port) => port,
			None => free_port()?,
		};

		debug!(target = "typist.runtime", path = %path.display(), port, "spawning driver");
		let mut child = Command::new(&path)
			.arg(format!("--port={port}"))
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.kill_on_drop(true)
			.spawn()
			.map_err(|source| Error::Spawn { path: path.clone(), source })?;
		let pid = child.id();

		let endpoint = endpoint_for(port);
		let mut last_error = "endpoint not reachable".to_string();
		for _ in 0..options.startup_attempts {
			tokio::time::sleep(options.poll_interval).await;

			if let Some(status) = child.try_wait()? {
				return Err(Error::Exited {
					binary: binary.to_string(),
					status: status.to_string(),
				});
			}

			match probe_status(&endpoint).await {
				Ok(status) if status.ready => {
					info!(target = "typist.runtime", %endpoint, pid = ?pid, "driver ready");
					return Ok(Self {
						child,
						browser: options.browser,
						port,
						pid,
					});
				}
				Ok(status) => last_error = format!("not ready: {}", status.message),
				Err(e) => last_error = e.to_string(),
			}
		}

		let _ = child.kill().await;
		Err(Error::NotReady {
			binary: binary.to_string(),
			port,
			last_error,
		})
	}

	/// Base URL new sessions are requested from.
	pub fn endpoint(&self) -> String {
		endpoint_for(self.port)
	}

	pub fn port(&self) -> u16 {
		self.port
	}

	pub fn browser(&self) -> BrowserKind {
		self.browser
	}

	pub fn pid(&self) -> Option<u32> {
		self.pid
	}

	/// Kills the driver and waits for it to exit.
	pub async fn shutdown(mut self) -> Result<()> {
		debug!(target = "typist.runtime", port = self.port, "stopping driver");
		self.child.kill().await?;
		Ok(())
	}
}

fn endpoint_for(port: u16) -> String {
	format!("http://127.0.0.1:{port}")
}

/// Fetches `GET {endpoint}/status`.
pub async fn probe_status(endpoint: &str) -> Result<DriverStatus> {
	let client = reqwest::Client::builder()
		.timeout(Duration::from_millis(400))
		.build()
		.map_err(|e| Error::Probe(format!("failed to create HTTP client: {e}")))?;

	let url = format!("{}/status", endpoint.trim_end_matches('/'));
	let response = client.get(&url).send().await.map_err(|e| Error::Probe(e.to_string()))?;
	if !response.status().is_success() {
		return Err(Error::Probe(format!("unexpected status {}", response.status())));
	}

	let body: StatusResponse = response
		.json()
		.await
		.map_err(|e| Error::Probe(format!("failed to parse status response: {e}")))?;
	Ok(body.value)
}
