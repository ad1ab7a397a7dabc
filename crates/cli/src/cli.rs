use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::styles::cli_styles;

#[derive(Parser, Debug)]
#[command(name = "webos")]
#[command(about = "Remote control for LG webOS TVs")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// TV address; discovered over SSDP when neither this nor TV_IP is set
	#[arg(long, global = true, value_name = "IP")]
	pub ip: Option<String>,

	/// Env file holding CLIENT_KEY (and optionally TV_IP)
	#[arg(long, global = true, value_name = "PATH", default_value = ".env")]
	pub env_file: PathBuf,

	/// Ask the TV for a new pairing prompt even if a key is stored
	#[arg(long, global = true)]
	pub force_pair: bool,

	/// Seconds to wait for SSDP responses
	#[arg(long, global = true, value_name = "SECS", default_value_t = webos::DEFAULT_DISCOVERY_TIMEOUT.as_secs())]
	pub discover_timeout: u64,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Search the network for a webOS TV
	Discover,

	/// Pair with the TV and store the client key
	Pair,

	/// Volume level
	#[command(subcommand)]
	Volume(VolumeAction),

	/// Mute state
	#[command(subcommand)]
	Mute(MuteAction),

	/// Installed applications
	#[command(subcommand)]
	Apps(AppsAction),

	/// Launch Netflix
	Netflix,

	/// Launch YouTube
	Youtube,

	/// Launch Prime Video
	Prime,

	/// Launch JioHotstar
	Hotstar,

	/// Broadcast channels
	#[command(subcommand)]
	Channel(ChannelAction),

	/// External inputs (HDMI, AV)
	#[command(subcommand)]
	Input(InputAction),

	/// Media playback
	#[command(subcommand)]
	Media(MediaAction),

	/// Power and system information
	#[command(subcommand)]
	Power(PowerAction),

	/// Press a remote-control button
	Button {
		#[arg(value_enum)]
		button: ButtonArg,
	},

	/// Send a raw SSAP request
	Invoke {
		/// SSAP URI, e.g. ssap://audio/getVolume
		uri: String,

		/// JSON object sent as the request payload
		#[arg(long, value_name = "JSON")]
		payload: Option<String>,

		/// Send as a subscription and print the first value
		#[arg(long)]
		subscribe: bool,
	},

	/// Subscribe to a URI and print every pushed value
	Watch {
		uri: String,

		#[arg(long, value_name = "JSON")]
		payload: Option<String>,

		/// Stop after this many values (default: until Ctrl-C)
		#[arg(long, value_name = "N")]
		count: Option<usize>,
	},
}

#[derive(Subcommand, Debug)]
pub enum VolumeAction {
	Get,
	Set {
		#[arg(value_parser = clap::value_parser!(i64).range(0..=webos::MAX_VOLUME), allow_negative_numbers = true)]
		level: i64,
	},
	Up,
	Down,
}

#[derive(Subcommand, Debug)]
pub enum MuteAction {
	On,
	Off,
	Status,
}

#[derive(Subcommand, Debug)]
pub enum AppsAction {
	List,
	LaunchPoints,
	Foreground,
	Launch {
		/// Application id, e.g. com.webos.app.browser
		id: String,

		/// JSON object passed to the app as launch parameters
		#[arg(long, value_name = "JSON")]
		params: Option<String>,
	},
}

#[derive(Subcommand, Debug)]
pub enum ChannelAction {
	List,
	Current,
	Open { id: String },
	Up,
	Down,
}

#[derive(Subcommand, Debug)]
pub enum InputAction {
	List,
	/// Switch to an input id such as HDMI_1
	Switch { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MediaAction {
	Play,
	Pause,
	Stop,
	Rewind,
	Forward,
}

#[derive(Subcommand, Debug)]
pub enum PowerAction {
	Off,
	State,
	Info,
	ScreenOff,
	ScreenOn,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonArg {
	Up,
	Down,
	Left,
	Right,
	Click,
	Back,
	Home,
}

impl From<ButtonArg> for webos::Button {
	fn from(arg: ButtonArg) -> Self {
		match arg {
			ButtonArg::Up => webos::Button::Up,
			ButtonArg::Down => webos::Button::Down,
			ButtonArg::Left => webos::Button::Left,
			ButtonArg::Right => webos::Button::Right,
			ButtonArg::Click => webos::Button::Enter,
			ButtonArg::Back => webos::Button::Back,
			ButtonArg::Home => webos::Button::Home,
		}
	}
}
