//! Pairing handshake body.
//!
//! The manifest is the signed LG test-app identity accepted by every webOS TV
//! release since 2014. It is sent verbatim on each registration; only the
//! `client-key` and `forcePairing` fields of [`RegisterPayload`] vary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const PAIRING_TYPE_PROMPT: &str = "PROMPT";

const MANIFEST_SIGNATURE: &str = concat!(
	"eyJhbGdvcml0aG0iOiJSU0EtU0hBMjU2Iiwia2V5SWQiOiJ0ZXN0LXNpZ25p",
	"bmctY2VydCIsInNpZ25hdHVyZVZlcnNpb24iOjF9.hrVRgjCwXVvE2OOSpDZ",
	"58hR+59aFNwYDyjQgKk3auukd7pcegmE2CzPCa0bJ0ZsRAcKkCTJrWo5iDz",
	"NhMBWRyaMOv5zWSrthlf7G128qvIlpMT0YNY+n/FaOHE73uLrS/g7swl3/q",
	"H/BGFG2Hu4RlL48eb3lLKqTt2xKHdCs6Cd4RMfJPYnzgvI4BNrFUKsjkcu+W",
	"D4OO2A27Pq1n50cMchmcaXadJhGrOqH5YmHdOCj5NSHzJYrsW0HPlpuAx/ECM",
	"eIZYDh6RMqaFM2DXzdKX9NmmyqzJ3o/0lkk/N97gfVRLW5hA29yeAwaCViZN",
	"CP8iC9aO0q9fQojoa7NQnAtw==",
);

/// Permissions requested at pairing time.
const PERMISSIONS: &[&str] = &[
	"LAUNCH",
	"LAUNCH_WEBAPP",
	"APP_TO_APP",
	"CLOSE",
	"TEST_OPEN",
	"TEST_PROTECTED",
	"CONTROL_AUDIO",
	"CONTROL_DISPLAY",
	"CONTROL_INPUT_JOYSTICK",
	"CONTROL_INPUT_MEDIA_RECORDING",
	"CONTROL_INPUT_MEDIA_PLAYBACK",
	"CONTROL_INPUT_TV",
	"CONTROL_POWER",
	"CONTROL_TV_SCREEN",
	"READ_APP_STATUS",
	"READ_CURRENT_CHANNEL",
	"READ_INPUT_DEVICE_LIST",
	"READ_NETWORK_STATE",
	"READ_RUNNING_APPS",
	"READ_TV_CHANNEL_LIST",
	"WRITE_NOTIFICATION_TOAST",
	"READ_POWER_STATE",
	"READ_COUNTRY_INFO",
	"CONTROL_INPUT_TEXT",
	"CONTROL_MOUSE_AND_KEYBOARD",
	"READ_INSTALLED_APPS",
	"READ_SETTINGS",
	"READ_STORAGE_DEVICE_LIST",
];

/// Permissions covered by the manifest signature. Must not be edited.
const SIGNED_PERMISSIONS: &[&str] = &[
	"TEST_SECURE",
	"CONTROL_INPUT_TEXT",
	"CONTROL_MOUSE_AND_KEYBOARD",
	"READ_INSTALLED_APPS",
	"READ_LGE_SDX",
	"READ_NOTIFICATIONS",
	"SEARCH",
	"WRITE_SETTINGS",
	"WRITE_NOTIFICATION_ALERT",
	"CONTROL_POWER",
	"READ_CURRENT_CHANNEL",
	"READ_RUNNING_APPS",
	"READ_UPDATE_INFO",
	"UPDATE_FROM_REMOTE_APP",
	"READ_LGE_TV_INPUT_EVENTS",
	"READ_TV_CURRENT_TIME",
];

/// Body of a `register` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPayload {
	/// Ask the TV to show the accept prompt even if it knows this client.
	#[serde(rename = "forcePairing")]
	pub force_pairing: bool,
	#[serde(rename = "pairingType")]
	pub pairing_type: String,
	pub manifest: PairingManifest,
	/// Credential from an earlier pairing; its presence allows promptless pairing.
	#[serde(rename = "client-key", default, skip_serializing_if = "Option::is_none")]
	pub client_key: Option<String>,
}

impl RegisterPayload {
	/// Builds the payload for a registration attempt.
	///
	/// A held credential is embedded only when `force_repair` is false; in
	/// every other case the prompt flag is raised so the TV asks the user.
	pub fn new(client_key: Option<&str>, force_repair: bool) -> Self {
		let client_key = client_key.filter(|key| !key.is_empty() && !force_repair);
		Self {
			force_pairing: client_key.is_none(),
			pairing_type: PAIRING_TYPE_PROMPT.to_string(),
			manifest: PairingManifest::standard(),
			client_key: client_key.map(str::to_string),
		}
	}

	pub fn is_prompting(&self) -> bool {
		self.force_pairing
	}
}

/// App identity presented to the TV during pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingManifest {
	pub manifest_version: u32,
	pub app_version: String,
	pub signed: SignedManifest,
	pub permissions: Vec<String>,
	pub signatures: Vec<Signature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedManifest {
	pub created: String,
	pub app_id: String,
	pub vendor_id: String,
	pub localized_app_names: BTreeMap<String, String>,
	pub localized_vendor_names: BTreeMap<String, String>,
	pub permissions: Vec<String>,
	pub serial: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
	pub signature_version: u32,
	pub signature: String,
}

fn owned(list: &[&str]) -> Vec<String> {
	list.iter().map(|s| s.to_string()).collect()
}

impl PairingManifest {
	/// The signed LG remote-app manifest.
	pub fn standard() -> Self {
		let localized_app_names = BTreeMap::from([
			(String::new(), "LG Remote App".to_string()),
			("ko-KR".to_string(), "리모컨 앱".to_string()),
			("zxx-XX".to_string(), "ЛГ Rэмotэ AПП".to_string()),
		]);
		let localized_vendor_names = BTreeMap::from([(String::new(), "LG Electronics".to_string())]);

		Self {
			manifest_version: 1,
			app_version: "1.1".to_string(),
			signed: SignedManifest {
				created: "20140509".to_string(),
				app_id: "com.lge.test".to_string(),
				vendor_id: "com.lge".to_string(),
				localized_app_names,
				localized_vendor_names,
				permissions: owned(SIGNED_PERMISSIONS),
				serial: "2f930e2d2cfe083771f68e4fe7bb07".to_string(),
			},
			permissions: owned(PERMISSIONS),
			signatures: vec![Signature {
				signature_version: 1,
				signature: MANIFEST_SIGNATURE.to_string(),
			}],
		}
	}
}

impl Default for PairingManifest {
	fn default() -> Self {
		Self::standard()
	}
}
