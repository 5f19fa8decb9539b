//! The typing procedure.
//!
//! A run walks a fixed, linear sequence of stages:
//!
//! ```text
//! Start → SessionOpen → PageLoaded → ElementFound → FullTextWritten
//!       → CharByCharWritten → Submitted → End
//! ```
//!
//! `FullTextWritten` is only reached when the bulk write is enabled. Any
//! failure ends the run. Once a session is open it is closed on every exit
//! path, including failures and cancellation.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::capability::{Browser, Element, Session};
use crate::config::TypingConfig;
use crate::error::{Error, Result};

/// Progress marker for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
	Start,
	SessionOpen,
	PageLoaded,
	ElementFound,
	FullTextWritten,
	CharByCharWritten,
	Submitted,
	End,
}

impl Stage {
	pub fn as_str(self) -> &'static str {
		match self {
			Stage::Start => "start",
			Stage::SessionOpen => "session-open",
			Stage::PageLoaded => "page-loaded",
			Stage::ElementFound => "element-found",
			Stage::FullTextWritten => "full-text-written",
			Stage::CharByCharWritten => "char-by-char-written",
			Stage::Submitted => "submitted",
			Stage::End => "end",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
	/// Stages in the order they were reached.
	pub stages: Vec<Stage>,
	pub bulk_written: bool,
	/// Number of single-character writes issued.
	pub chars_typed: usize,
	/// Wall time of the per-character pass, delays included.
	pub typing_elapsed: Duration,
	/// Field value read back just before submitting.
	pub field_value: Option<String>,
	pub submitted: bool,
}

impl Default for RunReport {
	fn default() -> Self {
		Self {
			stages: vec![Stage::Start],
			bulk_written: false,
			chars_typed: 0,
			typing_elapsed: Duration::ZERO,
			field_value: None,
			submitted: false,
		}
	}
}

impl RunReport {
	pub fn stage(&self) -> Stage {
		self.stages.last().copied().unwrap_or(Stage::Start)
	}

	fn advance(&mut self, stage: Stage) {
		debug!(target = "typist.driver", from = %self.stage(), to = %stage, "stage");
		self.stages.push(stage);
	}
}

/// Types a configured payload into a page field through a [`Browser`].
pub struct TypingDriver<B> {
	browser: B,
	config: TypingConfig,
}

impl<B: Browser> TypingDriver<B> {
	pub fn new(browser: B, config: TypingConfig) -> Self {
		Self { browser, config }
	}

	pub fn config(&self) -> &TypingConfig {
		&self.config
	}

	pub fn browser(&self) -> &B {
		&self.browser
	}

	/// Runs the procedure to completion.
	pub async fn run(&self) -> Result<RunReport> {
		self.run_with_cancel(&CancellationToken::new()).await
	}

	/// Runs the procedure, aborting with [`Error::Cancelled`] once `cancel` fires.
	///
	/// Cancellation is observed at every step, including each per-character
	/// delay. The session is still closed afterwards.
	pub async fn run_with_cancel(&self, cancel: &CancellationToken) -> Result<RunReport> {
		self.config.validate()?;

		let mut report = RunReport::default();
		info!(
			target = "typist.driver",
			url = %self.config.url,
			selector = %self.config.selector,
			chars = self.config.payload.chars().count(),
			delay_ms = self.config.delay_ms,
			"starting typing run"
		);

		if cancel.is_cancelled() {
			return Err(Error::Cancelled { stage: Stage::Start });
		}

		// Not raced against `cancel`: a session the service already created
		// would be dropped without being closed.
		let mut session = self.browser.open().await?;
		report.advance(Stage::SessionOpen);

		let outcome = if cancel.is_cancelled() {
			Err(Error::Cancelled { stage: Stage::SessionOpen })
		} else {
			self.drive(&mut session, cancel, &mut report).await
		};
		let closed = session.close().await;

		match (outcome, closed) {
			(Ok(()), Ok(())) => {
				report.advance(Stage::End);
				info!(
					target = "typist.driver",
					chars = report.chars_typed,
					elapsed_ms = u64::try_from(report.typing_elapsed.as_millis()).unwrap_or(u64::MAX),
					submitted = report.submitted,
					"typing run finished"
				);
				Ok(report)
			}
			(Ok(()), Err(close_err)) => Err(close_err),
			(Err(err), Ok(())) => Err(err),
			(Err(err), Err(close_err)) => {
				warn!(target = "typist.driver", error = %close_err, "failed to close session after error");
				Err(err)
			}
		}
	}

	async fn drive(&self, session: &mut B::Session, cancel: &CancellationToken, report: &mut RunReport) -> Result<()> {
		let config = &self.config;

		guarded(cancel, report.stage(), session.goto(&config.url)).await?;
		report.advance(Stage::PageLoaded);

		let element = guarded(cancel, report.stage(), session.find(&config.selector)).await?;
		report.advance(Stage::ElementFound);

		if config.bulk_write {
			guarded(cancel, report.stage(), element.send_keys(&config.payload)).await?;
			report.bulk_written = true;
			report.advance(Stage::FullTextWritten);
		}

		self.type_chars(&element, cancel, report).await?;
		report.advance(Stage::CharByCharWritten);

		let value = guarded(cancel, report.stage(), element.value()).await?;
		report.field_value = Some(value);

		if config.submit {
			guarded(cancel, report.stage(), element.press(config.submit_key)).await?;
			report.submitted = true;
			debug!(target = "typist.driver", key = %config.submit_key, "submit key sent");
		}
		report.advance(Stage::Submitted);
		Ok(())
	}

	/// Writes the payload one character per operation, pausing after each.
	async fn type_chars<E: Element>(&self, element: &E, cancel: &CancellationToken, report: &mut RunReport) -> Result<()> {
		let delay = self.config.delay();
		let started = Instant::now();
		let mut buf = [0u8; 4];

		for ch in self.config.payload.chars() {
			guarded(cancel, report.stage(), element.send_keys(ch.encode_utf8(&mut buf))).await?;
			report.chars_typed += 1;

			if !delay.is_zero() {
				guarded(cancel, report.stage(), async {
					tokio::time::sleep(delay).await;
					Ok(())
				})
				.await?;
			}
		}

		report.typing_elapsed = started.elapsed();
		Ok(())
	}
}

/// Races `fut` against cancellation, attributing a cancel to `stage`.
async fn guarded<T>(cancel: &CancellationToken, stage: Stage, fut: impl Future<Output = Result<T>>) -> Result<T> {
	tokio::select! {
		biased;
		_ = cancel.cancelled() => Err(Error::Cancelled { stage }),
		out = fut => out,
	}
}
