// ABOUTME: TUI widget sub-modules for room messages, forms, the room list, and the status bar.
// ABOUTME: Each widget is a pure rendering function over TuiState pieces.

pub mod chat;
pub mod forms;
pub mod splash;
pub mod status;
