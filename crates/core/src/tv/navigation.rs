//! Remote-control buttons over the input socket.
//!
//! The first press opens the pointer socket; later presses reuse it. Buttons
//! are fire-and-forget: the TV sends nothing back on this channel.

use ssap_protocol::Button;
use ssap_runtime::Result;

use super::Tv;

impl Tv {
	/// Presses any remote button.
	pub async fn press(&mut self, button: Button) -> Result<()> {
		self.session.press(button).await
	}

	pub async fn cursor_up(&mut self) -> Result<()> {
		self.press(Button::Up).await
	}

	pub async fn cursor_down(&mut self) -> Result<()> {
		self.press(Button::Down).await
	}

	pub async fn cursor_left(&mut self) -> Result<()> {
		self.press(Button::Left).await
	}

	pub async fn cursor_right(&mut self) -> Result<()> {
		self.press(Button::Right).await
	}

	/// Presses `ENTER`.
	pub async fn cursor_click(&mut self) -> Result<()> {
		self.press(Button::Enter).await
	}

	pub async fn cursor_back(&mut self) -> Result<()> {
		self.press(Button::Back).await
	}

	pub async fn go_home(&mut self) -> Result<()> {
		self.press(Button::Home).await
	}

	pub async fn connect_input(&mut self) -> Result<()> {
		self.session.connect_input().await
	}

	pub async fn disconnect_input(&mut self) -> Result<()> {
		self.session.disconnect_input().await
	}
}
