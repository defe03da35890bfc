//! Terminal UI for Matchbook
//!
//! A thin shell over [`matchbook_app`] that provides terminal-specific
//! I/O: the async event loop, ratatui rendering, and an in-process
//! simulated lobby for offline use.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod runtime;
pub mod server;
pub mod ui;

pub use matchbook_app::{App, AppAction, AppEvent, Bridge, KeyInput, View};
