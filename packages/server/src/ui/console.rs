//! Operator console.
//!
//! 標準入力の各行をオペレーターブロードキャストのキューへ送ります。
//! 読み込みはブロッキング I/O なので専用スレッドで動かします。

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::domain::MessageContent;

/// 入力が尽きるかキューが閉じられるまで行を読み続ける
///
/// 前後の空白を取り除いて空になった行は無視します。
pub fn read_operator_lines<R: BufRead>(reader: R, queue: mpsc::Sender<MessageContent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read operator input: {}", e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let content = match MessageContent::new(trimmed.to_string()) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Operator message rejected: {}", e);
                continue;
            }
        };
        if queue.blocking_send(content).is_err() {
            break;
        }
    }
    tracing::info!("Operator console closed");
}

/// stdin を読む専用スレッドを起動する
pub fn spawn_stdin_console(queue: mpsc::Sender<MessageContent>) {
    let spawned = std::thread::Builder::new()
        .name("operator-console".to_string())
        .spawn(move || read_operator_lines(std::io::stdin().lock(), queue));
    if let Err(e) = spawned {
        tracing::error!("Failed to start operator console: {}", e);
    }
}
