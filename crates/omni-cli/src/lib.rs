//! omni library - expose modules for testing
//!
//! The binary in `main.rs` only parses arguments and dispatches to the
//! command handlers defined here.

pub mod commands;
pub mod common;
pub mod logging;

pub use common::GlobalOpts;
