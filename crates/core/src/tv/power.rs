//! Power and system information.

use serde_json::Value;
use ssap_protocol::uri::system;
use ssap_runtime::Result;

use super::Tv;

impl Tv {
	/// Turns the TV off. The TV usually drops the socket right after answering.
	pub async fn power_off(&mut self) -> Result<Option<Value>> {
		self.call(system::TURN_OFF).await
	}

	pub async fn get_system_info(&mut self) -> Result<Option<Value>> {
		self.call(system::GET_SYSTEM_INFO).await
	}

	pub async fn get_power_state(&mut self) -> Result<Option<Value>> {
		self.call(system::GET_POWER_STATE).await
	}

	/// Blanks the panel while audio keeps playing.
	pub async fn turn_off_screen(&mut self) -> Result<Option<Value>> {
		self.call(system::TURN_OFF_SCREEN).await
	}

	pub async fn turn_on_screen(&mut self) -> Result<Option<Value>> {
		self.call(system::TURN_ON_SCREEN).await
	}
}
