use serde_json::Value;
use ssap_protocol::uri::media;
use ssap_runtime::Result;

use super::Tv;

impl Tv {
	pub async fn play(&mut self) -> Result<Option<Value>> {
		self.call(media::PLAY).await
	}

	pub async fn pause(&mut self) -> Result<Option<Value>> {
		self.call(media::PAUSE).await
	}

	pub async fn stop(&mut self) -> Result<Option<Value>> {
		self.call(media::STOP).await
	}

	pub async fn rewind(&mut self) -> Result<Option<Value>> {
		self.call(media::REWIND).await
	}

	pub async fn fast_forward(&mut self) -> Result<Option<Value>> {
		self.call(media::FAST_FORWARD).await
	}
}
