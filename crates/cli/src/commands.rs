//! Maps parsed arguments onto [`Tv`] calls.
//!
//! Arguments are turned into a [`Plan`] first, so malformed JSON and other
//! local mistakes fail before discovery or any socket is opened.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde_json::{Value, json};
use webos::{Button, DeviceDescriptor, Session, Tv};

use crate::cli::{AppsAction, ChannelAction, Cli, Commands, InputAction, MediaAction, MuteAction, PowerAction, VolumeAction};
use crate::config::Settings;
use crate::credential_store::EnvFileStore;
use crate::error::{CliError, Result};
use crate::output::print_result;

/// One request against a paired TV, arguments already validated.
#[derive(Debug, Clone, PartialEq)]
pub enum TvCommand {
	Pair,
	GetVolume,
	SetVolume(i64),
	VolumeUp,
	VolumeDown,
	GetMute,
	SetMute(bool),
	ListApps,
	ListLaunchPoints,
	ForegroundApp,
	LaunchApp { id: String, params: Option<Value> },
	Netflix,
	Youtube,
	PrimeVideo,
	Hotstar,
	ChannelList,
	CurrentChannel,
	OpenChannel(String),
	ChannelUp,
	ChannelDown,
	ExternalInputs,
	SwitchInput(String),
	Play,
	Pause,
	Stop,
	Rewind,
	FastForward,
	PowerOff,
	PowerState,
	SystemInfo,
	ScreenOff,
	ScreenOn,
	Press(Button),
	Invoke { uri: String, payload: Value, subscribe: bool },
}

impl TvCommand {
	pub async fn execute(self, tv: &mut Tv) -> webos::Result<Option<Value>> {
		match self {
			TvCommand::Pair => Ok(Some(json!({
				"ip": tv.session().ip(),
				"registered": tv.session().is_registered(),
			}))),
			TvCommand::GetVolume => tv.get_volume().await,
			TvCommand::SetVolume(level) => tv.set_volume(level).await,
			TvCommand::VolumeUp => tv.volume_up().await,
			TvCommand::VolumeDown => tv.volume_down().await,
			TvCommand::GetMute => tv.get_mute().await,
			TvCommand::SetMute(mute) => tv.set_mute(mute).await,
			TvCommand::ListApps => tv.list_apps().await,
			TvCommand::ListLaunchPoints => tv.list_launch_points().await,
			TvCommand::ForegroundApp => tv.get_foreground_app().await,
			TvCommand::LaunchApp { id, params } => tv.launch_app(&id, params).await,
			TvCommand::Netflix => tv.launch_netflix().await,
			TvCommand::Youtube => tv.launch_youtube().await,
			TvCommand::PrimeVideo => tv.launch_prime_video().await,
			TvCommand::Hotstar => tv.launch_hotstar().await,
			TvCommand::ChannelList => tv.get_channel_list().await,
			TvCommand::CurrentChannel => tv.get_current_channel().await,
			TvCommand::OpenChannel(id) => tv.open_channel(&id).await,
			TvCommand::ChannelUp => tv.channel_up().await,
			TvCommand::ChannelDown => tv.channel_down().await,
			TvCommand::ExternalInputs => tv.get_external_inputs().await,
			TvCommand::SwitchInput(id) => tv.switch_input(&id).await,
			TvCommand::Play => tv.play().await,
			TvCommand::Pause => tv.pause().await,
			TvCommand::Stop => tv.stop().await,
			TvCommand::Rewind => tv.rewind().await,
			TvCommand::FastForward => tv.fast_forward().await,
			TvCommand::PowerOff => tv.power_off().await,
			TvCommand::PowerState => tv.get_power_state().await,
			TvCommand::SystemInfo => tv.get_system_info().await,
			TvCommand::ScreenOff => tv.turn_off_screen().await,
			TvCommand::ScreenOn => tv.turn_on_screen().await,
			TvCommand::Press(button) => {
				tv.press(button).await?;
				Ok(Some(json!({ "pressed": button.as_str() })))
			}
			TvCommand::Invoke { uri, payload, subscribe } => tv.invoke(&uri, payload, subscribe).await,
		}
	}
}

/// What a command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
	Discover,
	Run(TvCommand),
	Watch { uri: String, payload: Value, count: Option<usize> },
}

impl Plan {
	pub fn from_command(command: Commands) -> Result<Self> {
		let run = |command| Ok(Plan::Run(command));

		match command {
			Commands::Discover => Ok(Plan::Discover),
			Commands::Pair => run(TvCommand::Pair),
			Commands::Volume(action) => run(match action {
				VolumeAction::Get => TvCommand::GetVolume,
				VolumeAction::Set { level } => TvCommand::SetVolume(level),
				VolumeAction::Up => TvCommand::VolumeUp,
				VolumeAction::Down => TvCommand::VolumeDown,
			}),
			Commands::Mute(action) => run(match action {
				MuteAction::On => TvCommand::SetMute(true),
				MuteAction::Off => TvCommand::SetMute(false),
				MuteAction::Status => TvCommand::GetMute,
			}),
			Commands::Apps(action) => run(match action {
				AppsAction::List => TvCommand::ListApps,
				AppsAction::LaunchPoints => TvCommand::ListLaunchPoints,
				AppsAction::Foreground => TvCommand::ForegroundApp,
				AppsAction::Launch { id, params } => TvCommand::LaunchApp {
					id,
					params: parse_object("--params", params)?,
				},
			}),
			Commands::Netflix => run(TvCommand::Netflix),
			Commands::Youtube => run(TvCommand::Youtube),
			Commands::Prime => run(TvCommand::PrimeVideo),
			Commands::Hotstar => run(TvCommand::Hotstar),
			Commands::Channel(action) => run(match action {
				ChannelAction::List => TvCommand::ChannelList,
				ChannelAction::Current => TvCommand::CurrentChannel,
				ChannelAction::Open { id } => TvCommand::OpenChannel(id),
				ChannelAction::Up => TvCommand::ChannelUp,
				ChannelAction::Down => TvCommand::ChannelDown,
			}),
			Commands::Input(action) => run(match action {
				InputAction::List => TvCommand::ExternalInputs,
				InputAction::Switch { id } => TvCommand::SwitchInput(id),
			}),
			Commands::Media(action) => run(match action {
				MediaAction::Play => TvCommand::Play,
				MediaAction::Pause => TvCommand::Pause,
				MediaAction::Stop => TvCommand::Stop,
				MediaAction::Rewind => TvCommand::Rewind,
				MediaAction::Forward => TvCommand::FastForward,
			}),
			Commands::Power(action) => run(match action {
				PowerAction::Off => TvCommand::PowerOff,
				PowerAction::State => TvCommand::PowerState,
				PowerAction::Info => TvCommand::SystemInfo,
				PowerAction::ScreenOff => TvCommand::ScreenOff,
				PowerAction::ScreenOn => TvCommand::ScreenOn,
			}),
			Commands::Button { button } => run(TvCommand::Press(button.into())),
			Commands::Invoke { uri, payload, subscribe } => run(TvCommand::Invoke {
				uri,
				payload: parse_object("--payload", payload)?.unwrap_or_else(|| json!({})),
				subscribe,
			}),
			Commands::Watch { uri, payload, count } => Ok(Plan::Watch {
				uri,
				payload: parse_object("--payload", payload)?.unwrap_or_else(|| json!({})),
				count,
			}),
		}
	}
}

/// Connection options shared by every command.
#[derive(Debug, Clone)]
pub struct Target {
	pub ip: Option<String>,
	pub env_file: PathBuf,
	pub force_pair: bool,
	pub discover_timeout: u64,
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let plan = Plan::from_command(cli.command)?;
	let target = Target {
		ip: cli.ip,
		env_file: cli.env_file,
		force_pair: cli.force_pair,
		discover_timeout: cli.discover_timeout,
	};
	let settings = Settings::load(&target.env_file)?;

	match plan {
		Plan::Discover => {
			let device = discover_device(target.discover_timeout).await?;
			print_result(Some(&serde_json::to_value(&device)?));
			Ok(())
		}
		Plan::Run(command) => {
			let mut tv = connect(&target, &settings).await?;
			let result = command.execute(&mut tv).await;
			close(&mut tv).await;
			print_result(result?.as_ref());
			Ok(())
		}
		Plan::Watch { uri, payload, count } => {
			let mut tv = connect(&target, &settings).await?;
			let result = watch(&mut tv, &uri, payload, count).await;
			close(&mut tv).await;
			result
		}
	}
}

async fn discover_device(secs: u64) -> Result<DeviceDescriptor> {
	tracing::info!(timeout_secs = secs, "searching for a webOS TV");
	webos::discover(Duration::from_secs(secs))
		.await?
		.ok_or(CliError::NoTvFound { secs })
}

/// Resolves the address, builds the session and pairs.
async fn connect(target: &Target, settings: &Settings) -> Result<Tv> {
	let ip: IpAddr = match target.ip.as_ref().or(settings.tv_ip.as_ref()) {
		Some(ip) => ip.parse().with_context(|| format!("invalid TV address {ip:?}"))?,
		None => {
			let device = discover_device(target.discover_timeout).await?;
			tracing::info!(ip = %device.ip, name = %device.friendly_name, "using discovered TV");
			device.ip
		}
	};

	let session = Session::builder(ip.to_string())
		.client_key(settings.client_key.clone())
		.store(Arc::new(EnvFileStore::new(&target.env_file)))
		.build()?;

	let mut tv = Tv::new(session);
	tv.connect(target.force_pair).await?;
	Ok(tv)
}

async fn close(tv: &mut Tv) {
	if let Err(e) = tv.close().await {
		tracing::warn!(error = %e, "failed to close connection");
	}
}

/// Prints pushed values until `count` is reached or Ctrl-C, then unsubscribes.
async fn watch(tv: &mut Tv, uri: &str, payload: Value, count: Option<usize>) -> Result<()> {
	let mut subscription = tv.subscribe(uri, payload).await?;
	let mut received = 0usize;

	while count.is_none_or(|limit| received < limit) {
		tokio::select! {
			next = subscription.next() => {
				print_result(next?.as_ref());
				received += 1;
			}
			_ = tokio::signal::ctrl_c() => {
				tracing::info!("interrupted");
				break;
			}
		}
	}

	subscription.unsubscribe().await?;
	Ok(())
}

fn parse_object(arg: &'static str, raw: Option<String>) -> Result<Option<Value>> {
	let Some(raw) = raw else {
		return Ok(None);
	};

	let value: Value = serde_json::from_str(&raw).map_err(|e| CliError::InvalidJson {
		arg,
		reason: e.to_string(),
	})?;
	if !value.is_object() {
		return Err(CliError::InvalidJson {
			arg,
			reason: "expected a JSON object".to_string(),
		});
	}
	Ok(Some(value))
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use webos::runtime::{MemoryConnector, MemoryTransport, Transport};

	use super::*;

	fn plan(args: &[&str]) -> Result<Plan> {
		let mut argv = vec!["webos"];
		argv.extend_from_slice(args);
		Plan::from_command(Cli::try_parse_from(argv).unwrap().command)
	}

	#[test]
	fn maps_subcommands() {
		assert_eq!(plan(&["mute", "on"]).unwrap(), Plan::Run(TvCommand::SetMute(true)));
		assert_eq!(plan(&["mute", "status"]).unwrap(), Plan::Run(TvCommand::GetMute));
		assert_eq!(plan(&["volume", "set", "30"]).unwrap(), Plan::Run(TvCommand::SetVolume(30)));
		assert_eq!(plan(&["prime"]).unwrap(), Plan::Run(TvCommand::PrimeVideo));
		assert_eq!(plan(&["media", "forward"]).unwrap(), Plan::Run(TvCommand::FastForward));
		assert_eq!(plan(&["power", "info"]).unwrap(), Plan::Run(TvCommand::SystemInfo));
		assert_eq!(plan(&["button", "home"]).unwrap(), Plan::Run(TvCommand::Press(Button::Home)));
		assert_eq!(
			plan(&["input", "switch", "HDMI_1"]).unwrap(),
			Plan::Run(TvCommand::SwitchInput("HDMI_1".into()))
		);
		assert_eq!(plan(&["discover"]).unwrap(), Plan::Discover);
	}

	#[test]
	fn invoke_payload_defaults_to_empty_object() {
		assert_eq!(
			plan(&["invoke", "ssap://audio/getVolume", "--subscribe"]).unwrap(),
			Plan::Run(TvCommand::Invoke {
				uri: "ssap://audio/getVolume".into(),
				payload: json!({}),
				subscribe: true,
			})
		);
	}

	#[test]
	fn launch_params_are_parsed() {
		let parsed = plan(&["apps", "launch", "youtube.leanback.v4", "--params", r#"{"contentTarget":"v=abc"}"#]).unwrap();
		assert_eq!(
			parsed,
			Plan::Run(TvCommand::LaunchApp {
				id: "youtube.leanback.v4".into(),
				params: Some(json!({ "contentTarget": "v=abc" })),
			})
		);
	}

	#[test]
	fn rejects_bad_json_arguments() {
		let err = plan(&["invoke", "ssap://x", "--payload", "{not json"]).unwrap_err();
		assert!(matches!(err, CliError::InvalidJson { arg: "--payload", .. }));

		let err = plan(&["apps", "launch", "netflix", "--params", "[1, 2]"]).unwrap_err();
		assert!(matches!(err, CliError::InvalidJson { arg: "--params", .. }));
	}

	#[test]
	fn watch_keeps_count() {
		assert_eq!(
			plan(&["watch", "ssap://audio/getVolume", "--count", "3"]).unwrap(),
			Plan::Watch {
				uri: "ssap://audio/getVolume".into(),
				payload: json!({}),
				count: Some(3),
			}
		);
	}

	async fn paired() -> (Tv, MemoryTransport, Arc<MemoryConnector>) {
		let connector = Arc::new(MemoryConnector::new());
		let mut peer = connector.listen("wss://10.1.1.5:3001");
		peer.send(json!({ "type": "registered", "id": "register_0" }).to_string())
			.await
			.unwrap();

		let session = Session::builder("10.1.1.5")
			.connector(connector.clone())
			.client_key(Some("k".into()))
			.build()
			.unwrap();
		let mut tv = Tv::new(session);
		tv.connect(false).await.unwrap();
		peer.recv().await.unwrap();
		(tv, peer, connector)
	}

	#[tokio::test]
	async fn pair_reports_registration() {
		let (mut tv, _peer, _) = paired().await;
		let value = TvCommand::Pair.execute(&mut tv).await.unwrap().unwrap();
		assert_eq!(value, json!({ "ip": "10.1.1.5", "registered": true }));
	}

	#[tokio::test]
	async fn execute_sends_mapped_request() {
		let (mut tv, mut peer, _) = paired().await;
		peer.send(json!({ "type": "response", "id": "cmd_1", "payload": { "returnValue": true } }).to_string())
			.await
			.unwrap();

		let value = TvCommand::SetMute(false).execute(&mut tv).await.unwrap();
		assert_eq!(value, Some(json!({ "returnValue": true })));

		let frame: Value = serde_json::from_str(&peer.recv().await.unwrap().unwrap()).unwrap();
		assert_eq!(frame["uri"], "ssap://audio/setMute");
		assert_eq!(frame["payload"], json!({ "mute": false }));
	}

	#[tokio::test]
	async fn press_reports_button() {
		let (mut tv, mut peer, connector) = paired().await;
		let input_url = "wss://10.1.1.5:3001/resources/x/netinput.pointer.sock";
		let mut input = connector.listen(input_url);
		peer.send(json!({ "type": "response", "id": "cmd_1", "payload": { "socketPath": input_url } }).to_string())
			.await
			.unwrap();

		let value = TvCommand::Press(Button::Back).execute(&mut tv).await.unwrap();
		assert_eq!(value, Some(json!({ "pressed": "BACK" })));
		assert_eq!(input.recv().await.unwrap().as_deref(), Some("type:button\nname:BACK\n\n"));
	}
}
