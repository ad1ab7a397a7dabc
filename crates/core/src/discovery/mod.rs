//! SSDP discovery of webOS TVs on the local network.
//!
//! One `M-SEARCH` datagram is multicast, then responses are collected until the
//! timeout. Each distinct `LOCATION` is fetched once and its description
//! checked for the vendor and platform tokens. The first matching responder
//! wins; it is only returned once the full timeout has elapsed.

mod descriptor;
mod error;
mod fetcher;


use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::Serialize;
use tokio::net::UdpSocket;
use tokio::time::Instant;

pub use descriptor::{DeviceDescription, UPNP_DEVICE_NAMESPACE};
pub use error::{DiscoveryError, Result};
pub use fetcher::{BoxFuture, DescriptorFetcher, HttpDescriptorFetcher};

pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";
pub const MEDIA_RENDERER_TARGET: &str = "urn:schemas-upnp-org:device:MediaRenderer:1";

/// Name reported when a TV leaves `friendlyName` empty.
pub const UNKNOWN_FRIENDLY_NAME: &str = "Unknown";
/// Model reported when neither `modelName` nor `modelDescription` is set.
pub const DEFAULT_MODEL_NAME: &str = "webOS TV";

/// How long a discovery run collects responses unless told otherwise.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

const DATAGRAM_BUFFER: usize = 2048;

/// Tuning for one discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
	/// Total time spent collecting responses.
	pub timeout: Duration,
	/// Upper bound for a single receive; keeps the loop checking the deadline.
	pub recv_timeout: Duration,
	pub multicast_ttl: u32,
	pub bind_addr: SocketAddr,
	/// Where the `M-SEARCH` is sent. The SSDP multicast group unless testing.
	pub search_addr: SocketAddr,
	pub search_target: String,
	/// Case-insensitive token the `manufacturer` must contain.
	pub vendor_token: String,
	/// Case-insensitive token one of the name fields must contain.
	pub platform_token: String,
	pub fetch_timeout: Duration,
}

impl Default for DiscoveryConfig {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_DISCOVERY_TIMEOUT,
			recv_timeout: Duration::from_secs(1),
			multicast_ttl: 2,
			bind_addr: SocketAddr::from(([0, 0, 0, 0], 0)),
			search_addr: SocketAddr::from(([239, 255, 255, 250], 1900)),
			search_target: MEDIA_RENDERER_TARGET.to_string(),
			vendor_token: "lg".to_string(),
			platform_token: "webos".to_string(),
			fetch_timeout: Duration::from_secs(5),
		}
	}
}

impl DiscoveryConfig {
	pub fn with_timeout(timeout: Duration) -> Self {
		Self {
			timeout,
			..Self::default()
		}
	}

	/// The `M-SEARCH` request text.
	pub fn search_request(&self) -> String {
		format!(
			"M-SEARCH * HTTP/1.1\r\n\
			 HOST: {SSDP_MULTICAST_ADDR}\r\n\
			 MAN: \"ssdp:discover\"\r\n\
			 MX: 5\r\n\
			 ST: {}\r\n\
			 USER-AGENT: UDAP/2.0\r\n\
			 \r\n",
			self.search_target
		)
	}
}

/// A TV found on the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
	/// Source address of the SSDP response.
	pub ip: IpAddr,
	pub friendly_name: String,
	pub model_name: String,
}

impl DeviceDescriptor {
	/// Builds the public descriptor, applying the display-name fallbacks.
	pub fn new(ip: IpAddr, description: &DeviceDescription) -> Self {
		let friendly_name = match description.friendly_name.as_str() {
			"" => UNKNOWN_FRIENDLY_NAME.to_string(),
			name => name.to_string(),
		};
		let model_name = [&description.model_name, &description.model_description]
			.into_iter()
			.find(|name| !name.is_empty())
			.cloned()
			.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());

		Self {
			ip,
			friendly_name,
			model_name,
		}
	}
}

/// Searches for a TV for `timeout`, fetching descriptions over HTTP.
pub async fn discover(timeout: Duration) -> Result<Option<DeviceDescriptor>> {
	let config = DiscoveryConfig::with_timeout(timeout);
	let fetcher = HttpDescriptorFetcher::new(config.fetch_timeout)?;
	discover_with(&config, &fetcher).await
}

/// Runs one discovery pass with an explicit configuration and fetcher.
///
/// Errors are returned only for socket setup and the initial send. Garbled
/// datagrams, failed fetches and unparsable documents are logged and skipped.
/// Description fetches share the overall deadline, so the call never runs
/// much past `config.timeout`.
pub async fn discover_with(config: &DiscoveryConfig, fetcher: &dyn DescriptorFetcher) -> Result<Option<DeviceDescriptor>> {
	let socket = UdpSocket::bind(config.bind_addr).await?;
	socket.set_multicast_ttl_v4(config.multicast_ttl)?;
	socket.send_to(config.search_request().as_bytes(), config.search_addr).await?;
	tracing::info!(addr = %config.search_addr, timeout = ?config.timeout, "sent M-SEARCH");

	let socket = &socket;
	collect_responses(config, fetcher, move || async move {
		let mut buf = vec![0u8; DATAGRAM_BUFFER];
		let (len, from) = socket.recv_from(&mut buf).await?;
		buf.truncate(len);
		Ok::<_, std::io::Error>((buf, from))
	})
	.await
}

/// Reads SSDP responses from `recv` until the deadline and returns the first
/// matching device.
async fn collect_responses<R, F>(config: &DiscoveryConfig, fetcher: &dyn DescriptorFetcher, mut recv: R) -> Result<Option<DeviceDescriptor>>
where
	R: FnMut() -> F,
	F: Future<Output = std::io::Result<(Vec<u8>, SocketAddr)>>,
{
	let deadline = Instant::now() + config.timeout;
	let mut seen: HashSet<String> = HashSet::new();
	let mut candidates: Vec<DeviceDescriptor> = Vec::new();

	loop {
		let remaining = deadline.saturating_duration_since(Instant::now());
		if remaining.is_zero() {
			break;
		}

		let wait = config.recv_timeout.min(remaining);
		let received = tokio::time::timeout(wait, recv()).await;
		let (datagram, from) = match received {
			Err(_) => continue,
			Ok(Err(e)) => {
				tracing::debug!(error = %e, "receive failed");
				tokio::time::sleep(wait).await;
				continue;
			}
			Ok(Ok(received)) => received,
		};

		let response = String::from_utf8_lossy(&datagram);
		tracing::debug!(from = %from, response = %response, "SSDP response");

		let Some(location) = location_header(&response) else {
			continue;
		};
		if !seen.insert(location.clone()) {
			continue;
		}

		let remaining = deadline.saturating_duration_since(Instant::now());
		let description = match tokio::time::timeout(remaining, fetcher.fetch(&location)).await {
			Ok(Ok(description)) => description,
			Ok(Err(e)) => {
				tracing::warn!(location = %location, error = %e, "failed to read device description");
				continue;
			}
			Err(_) => {
				tracing::warn!(location = %location, "device description not read before the discovery deadline");
				continue;
			}
		};

		if description.matches(&config.vendor_token, &config.platform_token) {
			let device = DeviceDescriptor::new(from.ip(), &description);
			tracing::info!(
				location = %location,
				ip = %device.ip,
				name = %device.friendly_name,
				model = %device.model_name,
				"found webOS TV"
			);
			candidates.push(device);
		} else {
			tracing::debug!(location = %location, manufacturer = %description.manufacturer, "not a webOS TV");
		}
	}

	if candidates.len() > 1 {
		tracing::info!(count = candidates.len(), "several TVs answered; using the first");
	}
	Ok(candidates.into_iter().next())
}

/// Extracts the `LOCATION` header value from an SSDP response.
pub fn location_header(response: &str) -> Option<String> {
	response.lines().find_map(|line| {
		let (key, value) = line.split_once(':')?;
		if !key.trim().eq_ignore_ascii_case("location") {
			return None;
		}
		let value = value.trim();
		(!value.is_empty()).then(|| value.to_string())
	})
}
