//! Server configuration.

use std::{net::IpAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use crate::{domain::RoomName, error::ServerError};

/// Room-based chat relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "hiroba-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Host name or IP address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Directory that holds the `chat_history_<room>.txt` files
    #[arg(long, default_value = ".")]
    pub history_dir: PathBuf,

    /// Room that receives operator console messages (all rooms when omitted)
    #[arg(long)]
    pub operator_room: Option<String>,

    /// Do not read operator messages from stdin
    #[arg(long)]
    pub no_console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            history_dir: PathBuf::from("."),
            operator_room: None,
            no_console: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` as printed in logs, with IPv6 literals bracketed
    pub fn listen_address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    /// Resolve `host` and bind the listener
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.listen_address(),
                source,
            })
    }

    /// Validated operator room
    pub fn operator_room(&self) -> Result<Option<RoomName>, ServerError> {
        self.operator_room
            .clone()
            .map(RoomName::new)
            .transpose()
            .map_err(ServerError::InvalidOperatorRoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        // テスト項目: 引数なしでデフォルト値になる
        // given (前提条件):
        let args = ["hiroba-server"];

        // when (操作):
        let config = ServerConfig::parse_from(args);

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.history_dir, PathBuf::from("."));
        assert!(config.operator_room.is_none());
        assert!(!config.no_console);
        assert_eq!(config.listen_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_parse_all_flags() {
        // テスト項目: すべてのフラグを解釈できる
        // given (前提条件):
        let args = [
            "hiroba-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--history-dir",
            "/tmp/hiroba",
            "--operator-room",
            "lobby",
            "--no-console",
        ];

        // when (操作):
        let config = ServerConfig::parse_from(args);

        // then (期待する結果):
        assert_eq!(config.listen_address(), "127.0.0.1:9000");
        assert_eq!(config.history_dir, PathBuf::from("/tmp/hiroba"));
        assert_eq!(
            config.operator_room().unwrap().map(RoomName::into_string),
            Some("lobby".to_string())
        );
        assert!(config.no_console);
    }

    #[test]
    fn test_invalid_operator_room_is_rejected() {
        // テスト項目: 不正なオペレータールーム名はエラーになる
        // given (前提条件):
        let config = ServerConfig {
            operator_room: Some("a/b".to_string()),
            ..ServerConfig::default()
        };

        // then (期待する結果):
        assert!(matches!(
            config.operator_room(),
            Err(ServerError::InvalidOperatorRoom(_))
        ));
    }

    #[test]
    fn test_listen_address_brackets_ipv6() {
        // テスト項目: IPv6 アドレスは角括弧付きで表示される
        // given (前提条件):
        let config = ServerConfig::parse_from(["hiroba-server", "--host", "::1"]);

        // then (期待する結果):
        assert_eq!(config.host, "::1");
        assert_eq!(config.listen_address(), "[::1]:8000");
    }

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        // テスト項目: IP アドレスではないホスト名（localhost）でも bind できる
        // given (前提条件):
        let config = ServerConfig::parse_from(["hiroba-server", "--host", "localhost", "--port", "0"]);

        // when (操作):
        let listener = config.bind().await.unwrap();

        // then (期待する結果):
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_unresolvable_host_fails() {
        // テスト項目: 解決できないホストは Bind エラーになる
        // given (前提条件):
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 0,
            ..ServerConfig::default()
        };

        // when (操作):
        let result = config.bind().await;

        // then (期待する結果):
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
