//! UPnP device description documents.

use roxmltree::Document;

use super::error::Result;

/// Namespace of the elements read from a description document.
pub const UPNP_DEVICE_NAMESPACE: &str = "urn:schemas-upnp-org:device-1-0";

/// The fields of a device description relevant to identifying a TV.
///
/// Missing elements are empty strings. Text is trimmed but otherwise kept as
/// the device reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDescription {
	pub manufacturer: String,
	pub model_name: String,
	pub model_description: String,
	pub friendly_name: String,
}

impl DeviceDescription {
	/// Parses a description document.
	///
	/// Elements are matched by local name in [`UPNP_DEVICE_NAMESPACE`] anywhere
	/// in the tree, so document order and nesting do not matter. When a field
	/// appears more than once (embedded devices), the first occurrence wins,
	/// which is the root device's.
	pub fn parse(xml: &str) -> Result<Self> {
		let doc = Document::parse(xml)?;
		let mut description = Self::default();

		for node in doc.descendants().filter(|node| node.is_element()) {
			let name = node.tag_name();
			if name.namespace() != Some(UPNP_DEVICE_NAMESPACE) {
				continue;
			}

			let slot = match name.name() {
				"manufacturer" => &mut description.manufacturer,
				"modelName" => &mut description.model_name,
				"modelDescription" => &mut description.model_description,
				"friendlyName" => &mut description.friendly_name,
				_ => continue,
			};
			if slot.is_empty() {
				*slot = node.text().unwrap_or_default().trim().to_string();
			}
		}

		Ok(description)
	}

	/// True when the manufacturer contains `vendor` and any name field contains
	/// `platform`, both compared case-insensitively.
	pub fn matches(&self, vendor: &str, platform: &str) -> bool {
		let vendor = vendor.to_lowercase();
		let platform = platform.to_lowercase();

		self.manufacturer.to_lowercase().contains(&vendor)
			&& [&self.model_name, &self.model_description, &self.friendly_name]
				.iter()
				.any(|field| field.to_lowercase().contains(&platform))
	}
}
