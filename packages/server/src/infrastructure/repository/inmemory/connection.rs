//! InMemory Connection Repository 実装
//!
//! 接続 ID → Session の対応表。「現在到達可能なのは誰か」の唯一の情報源です。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRepository, Session};

/// インメモリ Connection Repository 実装
///
/// キーは常に値の `Session::connection_id()` と一致します。
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    sessions: Mutex<HashMap<ConnectionId, Arc<Session>>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn bind(&self, session: Arc<Session>) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.connection_id(), session)
    }

    async fn unbind(&self, connection_id: ConnectionId) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(&connection_id)
    }

    async fn lookup(&self, connection_id: ConnectionId) -> Option<Arc<Session>> {
        let sessions = self.sessions.lock().await;
        sessions.get(&connection_id).cloned()
    }

    async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
