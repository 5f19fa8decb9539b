use clap::Parser;
use tracing::error;
use typist_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli).await {
		let operation = err.downcast_ref::<typist::Error>().map(typist::Error::operation).unwrap_or("typist");
		error!(target = "typist", operation, error = %err, "command failed");
		std::process::exit(1);
	}
}
