use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("could not find a {binary} executable; install it or pass --driver-path")]
	DriverNotFound { binary: &'static str },

	#[error("port {0} is already in use")]
	PortUnavailable(u16),

	#[error("failed to launch {}: {source}", path.display())]
	Spawn {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{binary} exited before it became ready (status: {status})")]
	Exited { binary: String, status: String },

	#[error("{binary} did not become ready on port {port}: {last_error}")]
	NotReady { binary: String, port: u16, last_error: String },

	#[error("status probe failed: {0}")]
	Probe(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
