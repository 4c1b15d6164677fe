//! Curator - sorts media directories into a Stash catalog
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod context;
pub mod logging;
pub mod plugin;
pub mod retry;
pub mod runner;
pub mod scanner;
pub mod sync;
