use thiserror::Error;

/// Failure while searching for a TV or reading its description document.
#[derive(Debug, Error)]
pub enum DiscoveryError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("{location} answered with status {status}")]
	Status { location: String, status: u16 },

	#[error("malformed device description: {0}")]
	Xml(#[from] roxmltree::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
