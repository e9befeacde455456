/// Alert Console - an operator front-end for a subscriber alert backend
///
/// This library lists the subscribers known to the backend and broadcasts
/// text alerts to all of them, rendering results through a pluggable view.
pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod store;
pub mod terminal;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export core types for convenience
pub use crate::core::*;
