//! Integration tests for tvremote
//!
//! Tests are organized by component:
//! - playlist_test: M3U parsing, provider mapping and focus movement
//! - api_test: Relay and xtream retrieval against a mock HTTP server
//! - session_test: Login to channel list to playback, driven by logical events
//! - ui_test: Rendering with ratatui's TestBackend
//! - cli_test: Argument parsing and JSON output shapes

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
