// SPDX-License-Identifier: Apache-2.0
//
// Skiff — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::ShellConfig;
pub use error::SkiffError;
pub use types::*;
