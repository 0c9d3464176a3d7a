//! Shared utilities for Hiroba.
//!
//! Logging setup and JST timestamp helpers used by the server crate.

pub mod logger;
pub mod time;
