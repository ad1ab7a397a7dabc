//! Startup settings from the env file and the process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CliError, Result};

pub const CLIENT_KEY_VAR: &str = "CLIENT_KEY";
pub const TV_IP_VAR: &str = "TV_IP";

/// Values read once at startup and passed explicitly into the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
	pub client_key: Option<String>,
	pub tv_ip: Option<String>,
}

impl Settings {
	/// Reads `env_file` (a missing file is fine), then lets the process
	/// environment override it.
	pub fn load(env_file: &Path) -> Result<Self> {
		let file = read_env_file(env_file).map_err(|source| CliError::EnvFile {
			path: env_file.to_path_buf(),
			source,
		})?;
		Ok(Self::resolve(|name| std::env::var(name).ok(), &file))
	}

	fn resolve(env: impl Fn(&str) -> Option<String>, file: &HashMap<String, String>) -> Self {
		let lookup = |name: &str| {
			env(name)
				.or_else(|| file.get(name).cloned())
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
		};

		Self {
			client_key: lookup(CLIENT_KEY_VAR),
			tv_ip: lookup(TV_IP_VAR),
		}
	}
}

/// Parses an env file without touching the process environment.
pub(crate) fn read_env_file(path: &Path) -> std::result::Result<HashMap<String, String>, dotenvy::Error> {
	match dotenvy::from_path_iter(path) {
		Ok(entries) => entries.collect(),
		Err(e) if e.not_found() => Ok(HashMap::new()),
		Err(e) => Err(e),
	}
}
