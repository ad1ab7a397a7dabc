//! SSAP command URIs.

pub mod audio {
	pub const GET_MUTE: &str = "ssap://audio/getMute";
	pub const SET_MUTE: &str = "ssap://audio/setMute";
	pub const GET_VOLUME: &str = "ssap://audio/getVolume";
	pub const SET_VOLUME: &str = "ssap://audio/setVolume";
	pub const VOLUME_UP: &str = "ssap://audio/volumeUp";
	pub const VOLUME_DOWN: &str = "ssap://audio/volumeDown";
	pub const GET_STATUS: &str = "ssap://audio/getStatus";
}

pub mod apps {
	pub const LIST_APPS: &str = "ssap://com.webos.applicationManager/listApps";
	pub const LIST_LAUNCH_POINTS: &str = "ssap://com.webos.applicationManager/listLaunchPoints";
	pub const GET_FOREGROUND_APP: &str = "ssap://com.webos.applicationManager/getForegroundAppInfo";
	pub const LAUNCH: &str = "ssap://system.launcher/launch";

	pub const NETFLIX: &str = "netflix";
	pub const YOUTUBE: &str = "youtube.leanback.v4";
	pub const PRIME_VIDEO: &str = "amazon";
	pub const HOTSTAR: &str = "jiohotstar";
}

pub mod tv {
	pub const GET_CHANNEL_LIST: &str = "ssap://tv/getChannelList";
	pub const GET_CURRENT_CHANNEL: &str = "ssap://tv/getCurrentChannel";
	pub const OPEN_CHANNEL: &str = "ssap://tv/openChannel";
	pub const CHANNEL_UP: &str = "ssap://tv/channelUp";
	pub const CHANNEL_DOWN: &str = "ssap://tv/channelDown";
	pub const GET_EXTERNAL_INPUTS: &str = "ssap://tv/getExternalInputList";
	pub const SWITCH_INPUT: &str = "ssap://tv/switchInput";
}

pub mod media {
	pub const PLAY: &str = "ssap://media.controls/play";
	pub const PAUSE: &str = "ssap://media.controls/pause";
	pub const STOP: &str = "ssap://media.controls/stop";
	pub const REWIND: &str = "ssap://media.controls/rewind";
	pub const FAST_FORWARD: &str = "ssap://media.controls/fastForward";
}

pub mod system {
	pub const TURN_OFF: &str = "ssap://system/turnOff";
	pub const GET_SYSTEM_INFO: &str = "ssap://system/getSystemInfo";
	pub const GET_POWER_STATE: &str = "ssap://com.webos.service.tvpower/power/getPowerState";
	pub const TURN_OFF_SCREEN: &str = "ssap://com.webos.service.tvpower/power/turnOffScreen";
	pub const TURN_ON_SCREEN: &str = "ssap://com.webos.service.tvpower/power/turnOnScreen";
}

pub mod input {
	/// Returns `{"socketPath": "wss://..."}` for the pointer socket.
	pub const GET_POINTER_INPUT_SOCKET: &str = "ssap://com.webos.service.networkinput/getPointerInputSocket";
}
