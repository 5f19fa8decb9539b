//! WebDriver service lifecycle.
//!
//! Locates a `chromedriver`/`geckodriver` executable, spawns it on a local
//! port, waits for it to report readiness and tears it down again. The
//! spawned process is killed when its [`DriverService`] handle is dropped.

mod error;
mod finder;
pub mod process;
mod service;

pub use error::{Error, Result};
pub use finder::{driver_candidates, find_driver_executable};
pub use service::{DriverOptions, DriverService, probe_status};
