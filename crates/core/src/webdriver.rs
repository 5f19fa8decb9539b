//! W3C WebDriver backend built on `fantoccini`.
//!
//! Connects to a running WebDriver service (`chromedriver`, `geckodriver`,
//! Selenium Grid). Use [`typist_runtime::DriverService`] to spawn one locally.

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::debug;
use typist_protocol::{ControlKey, Selector, SessionCapabilities};

use crate::capability::{Browser, Element, Session};
use crate::error::{Error, Result};

/// Opens sessions against a WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct WebDriverBrowser {
	endpoint: String,
	capabilities: SessionCapabilities,
}

impl WebDriverBrowser {
	pub fn new(endpoint: impl Into<String>, capabilities: SessionCapabilities) -> Self {
		Self {
			endpoint: endpoint.into(),
			capabilities,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

#[async_trait]
impl Browser for WebDriverBrowser {
	type Session = WebDriverSession;

	async fn open(&self) -> Result<WebDriverSession> {
		debug!(target = "typist.webdriver", endpoint = %self.endpoint, browser = %self.capabilities.browser, "opening session");
		let client = ClientBuilder::native()
			.capabilities(self.capabilities.to_wire())
			.connect(&self.endpoint)
			.await
			.map_err(|e| Error::SessionStart(format!("{} ({})", e, self.endpoint)))?;
		Ok(WebDriverSession { client })
	}
}

/// A live WebDriver session.
pub struct WebDriverSession {
	client: Client,
}

#[async_trait]
impl Session for WebDriverSession {
	type Element = WebDriverElement;

	async fn goto(&mut self, url: &str) -> Result<()> {
		self.client.goto(url).await.map_err(|e| Error::Navigation {
			url: url.to_string(),
			message: e.to_string(),
		})
	}

	async fn find(&mut self, selector: &Selector) -> Result<WebDriverElement> {
		let found = match selector.to_css() {
			Some(css) => self.client.find(Locator::Css(&css)).await,
			None => self.client.find(Locator::XPath(selector.value())).await,
		};

		match found {
			Ok(element) => Ok(WebDriverElement { element }),
			Err(e) if e.is_no_such_element() => Err(Error::ElementNotFound {
				selector: selector.clone(),
			}),
			Err(e) => Err(Error::interaction("find element", e)),
		}
	}

	async fn close(self) -> Result<()> {
		self.client.close().await.map_err(|e| Error::interaction("close session", e))
	}
}

/// Handle to an element located through WebDriver.
pub struct WebDriverElement {
	element: fantoccini::elements::Element,
}

#[async_trait]
impl Element for WebDriverElement {
	async fn send_keys(&self, text: &str) -> Result<()> {
		self.element.send_keys(text).await.map_err(|e| Error::interaction("send keys", e))
	}

	async fn press(&self, key: ControlKey) -> Result<()> {
		self.element.send_keys(&key.as_keys()).await.map_err(|e| Error::interaction("press key", e))
	}

	async fn value(&self) -> Result<String> {
		let value: Option<String> = self.element.prop("value").await.map_err(|e: CmdError| Error::interaction("read value", e))?;
		Ok(value.unwrap_or_default())
	}
}
