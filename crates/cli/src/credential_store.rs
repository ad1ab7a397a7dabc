//! `CLIENT_KEY` persistence in an env file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use webos::{CredentialStore, Error, Result};

use crate::config::{CLIENT_KEY_VAR, read_env_file};

/// Stores the pairing key as `CLIENT_KEY="<value>"` in an env file.
///
/// Saving rewrites an existing assignment in place (dropping duplicates) or
/// appends one, keeping every other line. The file is created when missing.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
	path: PathBuf,
}

impl EnvFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl CredentialStore for EnvFileStore {
	fn load(&self) -> Result<Option<String>> {
		let entries = read_env_file(&self.path)
			.map_err(|e| Error::Credential(format!("cannot read {}: {e}", self.path.display())))?;
		Ok(entries.get(CLIENT_KEY_VAR).filter(|key| !key.is_empty()).cloned())
	}

	fn save(&self, client_key: &str) -> Result<()> {
		let (existing, created) = match fs::read_to_string(&self.path) {
			Ok(content) => (content, false),
			Err(e) if e.kind() == ErrorKind::NotFound => (String::new(), true),
			Err(e) => return Err(e.into()),
		};

		let assignment = format!("{CLIENT_KEY_VAR}=\"{}\"", escape(client_key));
		let mut replaced = false;
		let mut lines: Vec<String> = Vec::new();
		for line in existing.lines() {
			if !assigns_client_key(line) {
				lines.push(line.to_string());
			} else if !replaced {
				lines.push(assignment.clone());
				replaced = true;
			}
		}
		if !replaced {
			lines.push(assignment);
		}

		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		fs::write(&self.path, lines.join("\n") + "\n")?;

		#[cfg(unix)]
		if created {
			use std::os::unix::fs::PermissionsExt;
			fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
		}
		#[cfg(not(unix))]
		let _ = created;

		tracing::debug!(path = %self.path.display(), "wrote client key");
		Ok(())
	}
}

fn assigns_client_key(line: &str) -> bool {
	let line = line.trim_start();
	let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
	line.strip_prefix(CLIENT_KEY_VAR)
		.is_some_and(|rest| rest.trim_start().starts_with('='))
}

fn escape(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}
