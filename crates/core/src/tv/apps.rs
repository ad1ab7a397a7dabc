//! Application listing and launching.

use serde_json::{Value, json};
use ssap_protocol::uri::apps;
use ssap_runtime::Result;

use super::Tv;

impl Tv {
	pub async fn list_apps(&mut self) -> Result<Option<Value>> {
		self.call(apps::LIST_APPS).await
	}

	pub async fn list_launch_points(&mut self) -> Result<Option<Value>> {
		self.call(apps::LIST_LAUNCH_POINTS).await
	}

	pub async fn get_foreground_app(&mut self) -> Result<Option<Value>> {
		self.call(apps::GET_FOREGROUND_APP).await
	}

	/// Launches `app_id`, optionally passing app-specific launch parameters
	/// (for example a `contentTarget` deep link).
	pub async fn launch_app(&mut self, app_id: &str, params: Option<Value>) -> Result<Option<Value>> {
		let mut payload = json!({ "id": app_id });
		if let Some(params) = params {
			payload["params"] = params;
		}
		self.call_with(apps::LAUNCH, payload).await
	}

	pub async fn launch_netflix(&mut self) -> Result<Option<Value>> {
		self.launch_app(apps::NETFLIX, None).await
	}

	pub async fn launch_youtube(&mut self) -> Result<Option<Value>> {
		self.launch_app(apps::YOUTUBE, None).await
	}

	pub async fn launch_prime_video(&mut self) -> Result<Option<Value>> {
		self.launch_app(apps::PRIME_VIDEO, None).await
	}

	pub async fn launch_hotstar(&mut self) -> Result<Option<Value>> {
		self.launch_app(apps::HOTSTAR, None).await
	}
}
