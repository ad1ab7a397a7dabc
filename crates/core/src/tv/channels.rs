//! Broadcast channels and external inputs.

use serde_json::{Value, json};
use ssap_protocol::uri::tv;
use ssap_runtime::Result;

use super::Tv;

impl Tv {
	pub async fn get_channel_list(&mut self) -> Result<Option<Value>> {
		self.call(tv::GET_CHANNEL_LIST).await
	}

	pub async fn get_current_channel(&mut self) -> Result<Option<Value>> {
		self.call(tv::GET_CURRENT_CHANNEL).await
	}

	pub async fn open_channel(&mut self, channel_id: &str) -> Result<Option<Value>> {
		self.call_with(tv::OPEN_CHANNEL, json!({ "channelId": channel_id })).await
	}

	pub async fn channel_up(&mut self) -> Result<Option<Value>> {
		self.call(tv::CHANNEL_UP).await
	}

	pub async fn channel_down(&mut self) -> Result<Option<Value>> {
		self.call(tv::CHANNEL_DOWN).await
	}

	pub async fn get_external_inputs(&mut self) -> Result<Option<Value>> {
		self.call(tv::GET_EXTERNAL_INPUTS).await
	}

	/// Switches to an external input such as `HDMI_1` or `AV_1`.
	pub async fn switch_input(&mut self, input_id: &str) -> Result<Option<Value>> {
		self.call_with(tv::SWITCH_INPUT, json!({ "inputId": input_id })).await
	}
}
