//! Surgistream - range-aware media server for surgical training videos
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod media;
pub mod server;
