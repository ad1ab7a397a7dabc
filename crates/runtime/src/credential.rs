//! Pairing credential persistence seam.
//!
//! The session engine never decides where the `client-key` lives. It calls
//! [`CredentialStore::load`] once when a session is built without an explicit
//! key, and [`CredentialStore::save`] when the TV issues a new one.

use parking_lot::Mutex;

use crate::error::Result;

pub trait CredentialStore: Send + Sync {
	fn load(&self) -> Result<Option<String>>;
	fn save(&self, client_key: &str) -> Result<()>;
}

/// Keeps the credential in memory only. Useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
	key: Mutex<Option<String>>,
	saves: Mutex<Vec<String>>,
}

impl MemoryCredentialStore {
	pub fn new(initial: Option<&str>) -> Self {
		Self {
			key: Mutex::new(initial.map(str::to_string)),
			saves: Mutex::new(Vec::new()),
		}
	}

	pub fn current(&self) -> Option<String> {
		self.key.lock().clone()
	}

	/// Every value passed to `save`, oldest first.
	pub fn saved(&self) -> Vec<String> {
		self.saves.lock().clone()
	}
}

impl CredentialStore for MemoryCredentialStore {
	fn load(&self) -> Result<Option<String>> {
		Ok(self.current())
	}

	fn save(&self, client_key: &str) -> Result<()> {
		*self.key.lock() = Some(client_key.to_string());
		self.saves.lock().push(client_key.to_string());
		Ok(())
	}
}
