// ABOUTME: TUI module — ratatui full-screen interface for watchparty.
// ABOUTME: Panel rendering, key handling, and the view state both share.

pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

pub use state::*;
