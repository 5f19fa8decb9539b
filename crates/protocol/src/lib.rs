//! Wire types for WebDriver typing sessions.
//!
//! This crate contains the serde-serializable values exchanged with a
//! WebDriver service: how a target field is addressed, which control key
//! code points exist, what capabilities a new session requests, and the
//! shape of the service `/status` payload.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond parsing, formatting and (de)serialization
//! * 1:1 with the W3C WebDriver wire format where one exists
//! * Stable: Changes only when the wire protocol changes
//!
//! The typing procedure and its backends are built on top of these types in `typist-rs`.

pub mod capabilities;
pub mod key;
pub mod selector;
pub mod status;

pub use capabilities::*;
pub use key::*;
pub use selector::*;
pub use status::*;
