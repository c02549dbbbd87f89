//! Keyboard input.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates window events through [`translate_window_event`].

mod frame;
mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use platform::winit::{map_physical_key, translate_window_event};
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
