use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use typist::webdriver::WebDriverBrowser;
use typist::{Config, Stage, TypingDriver};
use typist_runtime::{DriverOptions, DriverService};

use crate::cli::RunArgs;
use crate::output::print_report;
use crate::settings;

pub async fn execute(config_path: Option<&Path>, args: &RunArgs) -> anyhow::Result<()> {
	let config = settings::resolve(config_path, &args.settings)?;
	info!(target = "typist", browser = %config.session.browser, url = %config.typing.url, "run");

	let cancel = CancellationToken::new();
	let interrupt = cancel.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_err() {
			return;
		}
		warn!(target = "typist", "interrupt received, cancelling run (press Ctrl-C again to exit now)");
		interrupt.cancel();

		if tokio::signal::ctrl_c().await.is_ok() {
			warn!(target = "typist", "second interrupt, exiting");
			std::process::exit(130);
		}
	});

	let Config { typing, session } = config;

	let (endpoint, service) = match session.webdriver.clone() {
		Some(endpoint) => (endpoint, None),
		None => {
			let options = DriverOptions::new(session.browser)
				.executable(session.driver_path.clone())
				.port(session.port);
			let service = start_service(&options, &cancel).await?;
			info!(target = "typist", endpoint = %service.endpoint(), pid = ?service.pid(), "driver service started");
			(service.endpoint(), Some(service))
		}
	};

	let browser = WebDriverBrowser::new(endpoint, session.capabilities());
	let driver = TypingDriver::new(browser, typing);
	let outcome = driver.run_with_cancel(&cancel).await;

	if let Some(service) = service {
		if let Err(err) = service.shutdown().await {
			warn!(target = "typist", error = %err, "failed to stop driver service");
		}
	}

	let report = outcome?;
	print_report(&report, driver.config(), args.format);
	Ok(())
}

/// Starts the driver service unless `cancel` fires first.
///
/// A start abandoned mid-poll drops its child process, which kills it.
async fn start_service(options: &DriverOptions, cancel: &CancellationToken) -> typist::Result<DriverService> {
	tokio::select! {
		biased;
		_ = cancel.cancelled() => Err(typist::Error::Cancelled { stage: Stage::Start }),
		started = DriverService::start(options) => Ok(started?),
	}
}
