//! Shared server state.

use std::{path::PathBuf, sync::Arc};

use crate::{
    infrastructure::{
        history::FileHistoryLog,
        repository::{
            InMemoryConnectionRepository, InMemoryIdentityRepository, InMemoryRoomRepository,
        },
    },
    usecase::MessageRouter,
};

/// Shared application state
pub struct AppState {
    /// Router（Repository 一式を保持する）
    pub router: MessageRouter,
}

impl AppState {
    /// インメモリ Repository と `history_dir` 上の履歴ファイルで組み立てる
    pub fn new(history_dir: impl Into<PathBuf>) -> Self {
        let router = MessageRouter::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(FileHistoryLog::new(history_dir)),
        );
        Self { router }
    }
}
