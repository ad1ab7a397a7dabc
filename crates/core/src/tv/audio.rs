//! Volume and mute.

use serde_json::{Value, json};
use ssap_protocol::uri::audio;
use ssap_runtime::{Error, Result};

use super::Tv;

/// Highest volume level accepted by `setVolume`.
pub const MAX_VOLUME: i64 = 100;

impl Tv {
	pub async fn get_mute(&mut self) -> Result<Option<Value>> {
		self.call(audio::GET_MUTE).await
	}

	pub async fn set_mute(&mut self, mute: bool) -> Result<Option<Value>> {
		self.call_with(audio::SET_MUTE, json!({ "mute": mute })).await
	}

	pub async fn get_volume(&mut self) -> Result<Option<Value>> {
		self.call(audio::GET_VOLUME).await
	}

	/// Sets the absolute volume level.
	///
	/// Levels outside `0..=100` fail with [`Error::Validation`] before anything
	/// is sent.
	pub async fn set_volume(&mut self, volume: i64) -> Result<Option<Value>> {
		if !(0..=MAX_VOLUME).contains(&volume) {
			return Err(Error::Validation(format!(
				"volume must be between 0 and {MAX_VOLUME}, got {volume}"
			)));
		}
		self.call_with(audio::SET_VOLUME, json!({ "volume": volume })).await
	}

	pub async fn volume_up(&mut self) -> Result<Option<Value>> {
		self.call(audio::VOLUME_UP).await
	}

	pub async fn volume_down(&mut self) -> Result<Option<Value>> {
		self.call(audio::VOLUME_DOWN).await
	}

	/// Volume, mute state and output device in one response.
	pub async fn get_audio_status(&mut self) -> Result<Option<Value>> {
		self.call(audio::GET_STATUS).await
	}
}
