use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("no webOS TV answered within {secs}s")]
	NoTvFound { secs: u64 },

	#[error("invalid JSON for {arg}: {reason}")]
	InvalidJson { arg: &'static str, reason: String },

	#[error("cannot read {path}")]
	EnvFile {
		path: PathBuf,
		#[source]
		source: dotenvy::Error,
	},

	#[error(transparent)]
	Tv(#[from] webos::Error),

	#[error(transparent)]
	Discovery(#[from] webos::DiscoveryError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	/// Remediation printed under the error, when there is an obvious one.
	pub fn hint(&self) -> Option<&'static str> {
		match self {
			CliError::Tv(err) if err.is_permission() => Some(
				"the stored pairing lacks this permission: remove the device from the TV's paired list and re-pair with --force-pair",
			),
			CliError::Tv(err) if err.is_timeout() => {
				Some("accept the pairing prompt on the TV, or check that the TV is on and reachable")
			}
			CliError::Tv(webos::Error::ConnectionFailed { .. }) => {
				Some("check the address and that \"LG Connect Apps\" is enabled on the TV")
			}
			CliError::Tv(err) if err.is_desync() => {
				Some("the TV answered out of order and this connection can no longer be trusted; run the command again to reconnect")
			}
			CliError::NoTvFound { .. } => Some("pass --ip or set TV_IP if multicast is blocked on this network"),
			_ => None,
		}
	}
}
