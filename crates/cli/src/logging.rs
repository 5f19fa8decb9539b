//! `tracing` subscriber setup for the binary.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a default filter directive.
pub fn default_directive(verbose: u8) -> &'static str {
	match verbose {
		0 => "typist=warn",
		1 => "typist=info",
		2 => "typist=debug",
		_ => "debug",
	}
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(verbose > 1)
		.with_ansi(std::io::stderr().is_terminal())
		.with_writer(std::io::stderr)
		.try_init();
}
