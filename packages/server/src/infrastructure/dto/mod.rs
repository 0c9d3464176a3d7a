//! Data transfer objects for the HTTP API and the WebSocket event stream.

pub mod http;
pub mod websocket;
