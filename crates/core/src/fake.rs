//! In-memory browser backend for exercising the typing driver without a browser.
//!
//! # Example
//!
//! ```ignore
//! let (browser, controller) = FakeBrowserBuilder::new().build();
//! let report = TypingDriver::new(browser, config).run().await?;
//! assert_eq!(controller.field_value(), "hellohello");
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use typist_protocol::{ControlKey, Selector};

use crate::capability::{Browser, Element, Session};
use crate::error::{Error, Result};

/// One call observed by the fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
	Open,
	Goto(String),
	Find(Selector),
	SendKeys { text: String, at: Instant },
	Press(ControlKey),
	ReadValue,
	Close,
}

#[derive(Debug, Default)]
struct FakeState {
	ops: Vec<Op>,
	value: String,
	sessions_opened: usize,
	sessions_closed: usize,
}

/// Builder for creating fake browser instances.
#[derive(Debug, Clone)]
pub struct FakeBrowserBuilder {
	field: Option<Selector>,
	initial_value: String,
	fail_open: bool,
	fail_goto: bool,
	fail_close: bool,
	fail_send_after: Option<usize>,
	keep_value_on_navigation: bool,
	open_delay: Option<Duration>,
}

impl FakeBrowserBuilder {
	pub fn new() -> Self {
		Self {
			field: Some(Selector::default()),
			initial_value: String::new(),
			fail_open: false,
			fail_goto: false,
			fail_close: false,
			fail_send_after: None,
			keep_value_on_navigation: false,
			open_delay: None,
		}
	}

	/// The only selector that resolves to an element. Defaults to `name=q`.
	pub fn field(mut self, selector: Selector) -> Self {
		self.field = Some(selector);
		self
	}

	/// Removes the field from the page so every lookup misses.
	pub fn without_field(mut self) -> Self {
		self.field = None;
		self
	}

	/// Value the field holds after each navigation.
	pub fn initial_value(mut self, value: impl Into<String>) -> Self {
		self.initial_value = value.into();
		self
	}

	pub fn fail_open(mut self) -> Self {
		self.fail_open = true;
		self
	}

	pub fn fail_goto(mut self) -> Self {
		self.fail_goto = true;
		self
	}

	pub fn fail_close(mut self) -> Self {
		self.fail_close = true;
		self
	}

	/// Fails the `n`th `send_keys` call (zero-based).
	pub fn fail_send_after(mut self, n: usize) -> Self {
		self.fail_send_after = Some(n);
		self
	}

	/// Models a page that is not reloaded between runs: navigation leaves
	/// the field's content in place.
	pub fn keep_value_on_navigation(mut self) -> Self {
		self.keep_value_on_navigation = true;
		self
	}

	/// Keeps `open` pending for `delay` after the session has been created.
	pub fn open_delay(mut self, delay: Duration) -> Self {
		self.open_delay = Some(delay);
		self
	}

	/// Builds the fake browser and a controller for inspecting what it saw.
	pub fn build(self) -> (FakeBrowser, FakeController) {
		let state = Arc::new(Mutex::new(FakeState {
			value: self.initial_value.clone(),
			..Default::default()
		}));
		let browser = FakeBrowser {
			options: Arc::new(self),
			state: Arc::clone(&state),
		};
		(browser, FakeController { state })
	}
}

impl Default for FakeBrowserBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Inspects state recorded by a [`FakeBrowser`].
#[derive(Debug, Clone)]
pub struct FakeController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeController {
	pub fn ops(&self) -> Vec<Op> {
		self.state.lock().ops.clone()
	}

	/// Texts passed to `send_keys`, in call order.
	pub fn writes(&self) -> Vec<String> {
		self.state
			.lock()
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::SendKeys { text, .. } => Some(text.clone()),
				_ => None,
			})
			.collect()
	}

	/// Timestamps of every `send_keys` call.
	pub fn write_times(&self) -> Vec<Instant> {
		self.state
			.lock()
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::SendKeys { at, .. } => Some(*at),
				_ => None,
			})
			.collect()
	}

	pub fn presses(&self) -> Vec<ControlKey> {
		self.state
			.lock()
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Press(key) => Some(*key),
				_ => None,
			})
			.collect()
	}

	pub fn field_value(&self) -> String {
		self.state.lock().value.clone()
	}

	pub fn sessions_opened(&self) -> usize {
		self.state.lock().sessions_opened
	}

	pub fn sessions_closed(&self) -> usize {
		self.state.lock().sessions_closed
	}
}

/// A browser whose single page holds one text field.
#[derive(Debug, Clone)]
pub struct FakeBrowser {
	options: Arc<FakeBrowserBuilder>,
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Browser for FakeBrowser {
	type Session = FakeSession;

	async fn open(&self) -> Result<FakeSession> {
		{
			let mut state = self.state.lock();
			state.ops.push(Op::Open);
			if self.options.fail_open {
				return Err(Error::SessionStart("no browser available".to_string()));
			}
			state.sessions_opened += 1;
		}
		if let Some(delay) = self.options.open_delay {
			tokio::time::sleep(delay).await;
		}
		Ok(FakeSession {
			options: Arc::clone(&self.options),
			state: Arc::clone(&self.state),
			loaded: false,
		})
	}
}

#[derive(Debug)]
pub struct FakeSession {
	options: Arc<FakeBrowserBuilder>,
	state: Arc<Mutex<FakeState>>,
	loaded: bool,
}

#[async_trait]
impl Session for FakeSession {
	type Element = FakeElement;

	async fn goto(&mut self, url: &str) -> Result<()> {
		let mut state = self.state.lock();
		state.ops.push(Op::Goto(url.to_string()));
		if self.options.fail_goto {
			return Err(Error::Navigation {
				url: url.to_string(),
				message: "name not resolved".to_string(),
			});
		}
		if !self.options.keep_value_on_navigation {
			state.value = self.options.initial_value.clone();
		}
		self.loaded = true;
		Ok(())
	}

	async fn find(&mut self, selector: &Selector) -> Result<FakeElement> {
		self.state.lock().ops.push(Op::Find(selector.clone()));
		if !self.loaded || self.options.field.as_ref() != Some(selector) {
			return Err(Error::ElementNotFound {
				selector: selector.clone(),
			});
		}
		Ok(FakeElement {
			options: Arc::clone(&self.options),
			state: Arc::clone(&self.state),
		})
	}

	async fn close(self) -> Result<()> {
		let mut state = self.state.lock();
		state.ops.push(Op::Close);
		state.sessions_closed += 1;
		if self.options.fail_close {
			return Err(Error::interaction("close session", "browser went away"));
		}
		Ok(())
	}
}

#[derive(Debug)]
pub struct FakeElement {
	options: Arc<FakeBrowserBuilder>,
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Element for FakeElement {
	async fn send_keys(&self, text: &str) -> Result<()> {
		let mut state = self.state.lock();
		let index = state.ops.iter().filter(|op| matches!(op, Op::SendKeys { .. })).count();
		if self.options.fail_send_after == Some(index) {
			return Err(Error::interaction("send keys", "element is not interactable"));
		}
		state.ops.push(Op::SendKeys {
			text: text.to_string(),
			at: Instant::now(),
		});
		state.value.push_str(text);
		Ok(())
	}

	async fn press(&self, key: ControlKey) -> Result<()> {
		self.state.lock().ops.push(Op::Press(key));
		Ok(())
	}

	async fn value(&self) -> Result<String> {
		let mut state = self.state.lock();
		state.ops.push(Op::ReadValue);
		Ok(state.value.clone())
	}
}
