//! Browser-automation capability consumed by the typing driver.
//!
//! A backend supplies three layers: a [`Browser`] that opens sessions, a
//! [`Session`] that navigates and locates elements, and an [`Element`] handle
//! that accepts keystrokes.

use async_trait::async_trait;
use typist_protocol::{ControlKey, Selector};

use crate::error::Result;

#[async_trait]
pub trait Browser: Send + Sync {
	type Session: Session;

	/// Opens a new browser-controlled session.
	///
	/// Fails with [`Error::SessionStart`](crate::Error::SessionStart) when no
	/// compatible browser or driver is available.
	async fn open(&self) -> Result<Self::Session>;
}

#[async_trait]
pub trait Session: Send {
	type Element: Element;

	/// Navigates the session to `url` and waits for the page to load.
	async fn goto(&mut self, url: &str) -> Result<()>;

	/// Finds exactly one element on the current page.
	async fn find(&mut self, selector: &Selector) -> Result<Self::Element>;

	/// Ends the session and releases the browser.
	async fn close(self) -> Result<()>;
}

#[async_trait]
pub trait Element: Send + Sync {
	/// Appends `text` to the element's value as keystrokes.
	async fn send_keys(&self, text: &str) -> Result<()>;

	/// Dispatches a non-printable key to the element.
	async fn press(&self, key: ControlKey) -> Result<()> {
		self.send_keys(&key.as_keys()).await
	}

	/// Reads the element's current `value` property.
	async fn value(&self) -> Result<String>;
}
