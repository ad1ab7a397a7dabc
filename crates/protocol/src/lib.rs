//! Wire types for the webOS SSAP control protocol.
//!
//! SSAP ("Simple Service Access Protocol") is the JSON-over-websocket command
//! protocol exposed by webOS televisions on port 3001. This crate only models
//! the frames; the session engine lives in `ssap-runtime`.
//!
//! # Main Types
//!
//! - [`Outbound`] - `register` / `request` / `subscribe` / `unsubscribe` frames
//! - [`Inbound`] - `registered` / `response` / `error` frames from the TV
//! - [`RegisterPayload`] and [`PairingManifest`] - the pairing handshake body
//! - [`Button`] and [`button_frame`] - the pointer socket text format
//! - [`uri`] - SSAP command URIs used by the typed command surface

pub mod input;
pub mod manifest;
pub mod message;
pub mod uri;

pub use input::{Button, button_frame};
pub use manifest::{PairingManifest, RegisterPayload, Signature, SignedManifest};
pub use message::{Inbound, InboundKind, Outbound, OutboundKind, REGISTER_ID, request_id};
