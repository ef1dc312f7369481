// ABOUTME: Library root for watchparty — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod poller;
pub mod router;
pub mod session;
pub mod tui;
