//! Roster server library - HTTP/WebSocket host for the control and display screens.
//!
//! Separated from main.rs to enable integration testing.

pub mod commands;
pub mod config;
pub mod control_ws;
pub mod display_ws;
pub mod logging;
pub mod routes;
pub mod state;
