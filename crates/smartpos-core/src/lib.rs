// SPDX-License-Identifier: MIT
//
// smartpos — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod messages;
pub mod types;

pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use types::*;
