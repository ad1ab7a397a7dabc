//! Retrieval of description documents.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::descriptor::DeviceDescription;
use super::error::{DiscoveryError, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves an SSDP `LOCATION` URL into a parsed [`DeviceDescription`].
pub trait DescriptorFetcher: Send + Sync {
	fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<DeviceDescription>>;
}

/// Fetches description documents over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpDescriptorFetcher {
	client: reqwest::Client,
}

impl HttpDescriptorFetcher {
	/// Builds a fetcher whose requests give up after `timeout`.
	pub fn new(timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self { client })
	}
}

impl DescriptorFetcher for HttpDescriptorFetcher {
	fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<DeviceDescription>> {
		Box::pin(async move {
			let response = self.client.get(location).send().await?;

			let status = response.status();
			if !status.is_success() {
				return Err(DiscoveryError::Status {
					location: location.to_string(),
					status: status.as_u16(),
				});
			}

			let body = response.text().await?;
			DeviceDescription::parse(&body)
		})
	}
}
