//! WebSocket chat relay server: HTTP routes, connection handling and the
//! operator console.

mod console;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{run, serve};
