//! Client
//!
//! Sans-IO connection and dispatch state machine for the Matchbook lobby
//! protocol. Owns the connection lifecycle, gates outgoing requests on it,
//! correlates list responses with the requests that asked for them, and
//! dispatches inbound frames to typed handlers.
//!
//! # Architecture
//!
//! The client receives events ([`ClientEvent`]), processes them through
//! pure state machine logic, and returns actions ([`ClientAction`]) for the
//! caller to execute. It performs no I/O of its own.
//!
//! # Components
//!
//! - [`Client`]: the state machine
//! - [`ConnectionState`]: lifecycle of the single lobby socket
//! - [`ClientEvent`]: events fed into the client
//! - [`ClientAction`]: actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedClient`]: client with WebSocket transport
//! - [`transport::connect`]: connect to a server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::{Client, ConnectionState};
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent};
