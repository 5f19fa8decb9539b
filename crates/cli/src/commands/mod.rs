mod config;
mod run;

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
	match cli.command {
		Commands::Run(args) => run::execute(cli.config.as_deref(), &args).await?,
		Commands::Config(args) => config::execute(cli.config.as_deref(), &args)?,
	}

	Ok(())
}
