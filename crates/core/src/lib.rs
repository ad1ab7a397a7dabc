//! Remote control for LG webOS TVs.
//!
//! Two engines make up the crate:
//!
//! - [`discovery`]: finds a TV on the LAN with an SSDP `M-SEARCH` and its UPnP
//!   description document
//! - [`Tv`]: typed SSAP commands over a paired [`Session`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! let device = webos::discover(Duration::from_secs(5)).await?.expect("no TV found");
//! let session = webos::Session::builder(device.ip.to_string()).build()?;
//! let mut tv = webos::Tv::new(session);
//! tv.connect(false).await?;
//! tv.set_volume(12).await?;
//! tv.go_home().await?;
//! tv.close().await?;
//! ```

pub mod discovery;
mod tv;

pub use discovery::{DEFAULT_DISCOVERY_TIMEOUT, DeviceDescriptor, DiscoveryConfig, DiscoveryError, discover, discover_with};
pub use ssap_protocol::Button;
pub use ssap_runtime::{
	CredentialStore, DEFAULT_PORT, Error, MemoryCredentialStore, Result, Session, SessionBuilder, SessionConfig,
	SessionState, Subscription,
};
pub use tv::{MAX_VOLUME, Tv};

pub use ssap_protocol as protocol;
pub use ssap_runtime as runtime;
