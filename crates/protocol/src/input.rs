//! Pointer/input socket frames.
//!
//! The input socket speaks plain text, not JSON: one `key:value` pair per
//! line terminated by a blank line. The TV never answers.

use std::fmt;
use std::str::FromStr;

/// Renders the frame that presses `name` once.
pub fn button_frame(name: &str) -> String {
	format!("type:button\nname:{name}\n\n")
}

/// Remote-control buttons used by the navigation helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
	Up,
	Down,
	Left,
	Right,
	Enter,
	Back,
	Home,
}

impl Button {
	pub const ALL: [Button; 7] = [
		Button::Up,
		Button::Down,
		Button::Left,
		Button::Right,
		Button::Enter,
		Button::Back,
		Button::Home,
	];

	/// Wire name understood by the input socket.
	pub fn as_str(self) -> &'static str {
		match self {
			Button::Up => "UP",
			Button::Down => "DOWN",
			Button::Left => "LEFT",
			Button::Right => "RIGHT",
			Button::Enter => "ENTER",
			Button::Back => "BACK",
			Button::Home => "HOME",
		}
	}
}

impl fmt::Display for Button {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Button {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Button::ALL
			.into_iter()
			.find(|button| button.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("unknown button: {s}"))
	}
}
