//! Browser typing automation.
//!
//! [`TypingDriver`] opens a browser session, navigates to a page, locates a
//! single field and types a payload into it: once in bulk, then again one
//! character at a time with a fixed delay, before sending a submit key.
//!
//! The browser is reached through the [`Browser`], [`Session`] and
//! [`Element`] traits. [`webdriver`] implements them over the W3C WebDriver
//! protocol; [`fake`] is an in-memory stand-in for tests.
//!
//! # Example
//!
//! ```ignore
//! use typist::{TypingConfig, TypingDriver, webdriver::WebDriverBrowser};
//! use typist_protocol::{BrowserKind, SessionCapabilities};
//!
//! let browser = WebDriverBrowser::new("http://localhost:9515", SessionCapabilities::new(BrowserKind::Chrome));
//! let report = TypingDriver::new(browser, TypingConfig::default()).run().await?;
//! println!("typed {} characters", report.chars_typed);
//! ```

pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod fake;
pub mod webdriver;

pub use capability::{Browser, Element, Session};
pub use config::{Config, SessionConfig, TypingConfig};
pub use driver::{RunReport, Stage, TypingDriver};
pub use error::{Error, Result};
pub use typist_protocol::{BrowserKind, ControlKey, Selector, SessionCapabilities};
