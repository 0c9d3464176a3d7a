//! Flat-file history log.
//!
//! One UTF-8 file per room, `chat_history_<room>.txt`, one
//! `[<room>] <sender>: <content>` line per chat message.

use std::{
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};

use crate::domain::{ChatRecord, HistoryError, HistoryLog, RoomName};

/// History log backed by per-room text files in one directory
#[derive(Debug, Clone)]
pub struct FileHistoryLog {
    dir: PathBuf,
}

impl FileHistoryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log file for `room`
    pub fn path_for(&self, room: &RoomName) -> PathBuf {
        self.dir.join(format!("chat_history_{}.txt", room))
    }
}

#[async_trait]
impl HistoryLog for FileHistoryLog {
    async fn append(&self, record: &ChatRecord) -> Result<(), HistoryError> {
        let path = self.path_for(&record.room);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        let mut line = record.to_line();
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn replay(&self, room: &RoomName) -> BoxStream<'static, String> {
        let path = self.path_for(room);
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No history for room '{}' yet", room);
                return stream::empty().boxed();
            }
            Err(e) => {
                tracing::error!("Failed to open history {}: {}", path.display(), e);
                return stream::empty().boxed();
            }
        };

        let lines = BufReader::new(file).lines();
        stream::unfold(lines, move |mut lines| {
            let path = path.clone();
            async move {
                match lines.next_line().await {
                    Ok(Some(line)) => Some((line, lines)),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::error!("Failed to read history {}: {}", path.display(), e);
                        None
                    }
                }
            }
        })
        .boxed()
    }
}
