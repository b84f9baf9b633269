//! Test utilities shared by the integration suites.
//!
//! Provides fixed platform descriptions, a counting detector and error
//! formatting helpers.

pub mod error;
pub mod os;

pub use error::error_messages;
pub use os::{CountingDetector, linux_os, windows_os};
