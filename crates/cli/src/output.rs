use serde_json::Value;

pub const NO_DATA: &str = "no data";

/// Pretty JSON for a result, or [`NO_DATA`] when the TV returned nothing.
pub fn render(value: Option<&Value>) -> String {
	match value {
		Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
		None => NO_DATA.to_string(),
	}
}

pub fn print_result(value: Option<&Value>) {
	println!("{}", render(value));
}
