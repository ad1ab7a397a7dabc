//! SSAP runtime - secured transport, pairing, and request correlation
//!
//! This crate provides the session engine for webOS TVs:
//!
//! - **Transport**: text frames over TLS websockets (any certificate accepted)
//! - **Session**: pairing handshake, `cmd_<n>` correlation, subscriptions
//! - **Input channel**: lazily opened pointer socket for button presses
//! - **Credentials**: the [`CredentialStore`] seam for the pairing `client-key`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    webos     │  Typed commands, discovery
//! └──────┬───────┘
//!        │ Session::invoke(uri, payload)
//! ┌──────▼───────┐
//! │ ssap-runtime │  This crate
//! │  ┌────────┐  │
//! │  │Session │  │  Handshake + correlation
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Trans  │  │  WebSocket / in-memory
//! │  └────────┘  │
//! └──────────────┘
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod session;
pub mod transport;

pub use config::{DEFAULT_PORT, SessionConfig};
pub use credential::{CredentialStore, MemoryCredentialStore};
pub use error::{Error, Result};
pub use session::{Session, SessionBuilder, SessionState, Subscription};
pub use transport::{BoxFuture, Connector, MemoryConnector, MemoryTransport, Transport, WebSocketConnector, WebSocketTransport};

pub use ssap_protocol as protocol;
