//! チャットメッセージのファンアウト
//!
//! ルームのメンバー一覧をスナップショットとして取得し、ロックを解放してから
//! 配信対象の各接続へ push します。1 件の push 失敗が他の配信を止めることは
//! ありません。失敗した接続は閉じられ、Connection Repository とルームから
//! 取り除かれます（DeliveryFailure は送信者には通知しない）。

use std::sync::Arc;

use crate::domain::{
    ChatKind, ConnectionId, ConnectionRepository, MessageContent, RepositoryError, RoomName,
    RoomRepository, Session, Username,
};

/// 1 回のファンアウトの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// push に成功した接続数
    pub delivered: usize,
    /// push に失敗し、取り除かれた接続
    pub failed: Vec<ConnectionId>,
}

/// ルーム単位の配信
pub struct Fanout {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl Fanout {
    pub fn new(connections: Arc<dyn ConnectionRepository>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { connections, rooms }
    }

    /// 配信対象を計算する
    ///
    /// broadcast はメンバー全員（送信者を含む）、dm は送信者と宛先の
    /// ユーザーに一致するメンバーのみ。
    pub fn delivery_targets(
        members: &[Arc<Session>],
        sender: &Username,
        kind: &ChatKind,
    ) -> Vec<Arc<Session>> {
        members
            .iter()
            .filter(|member| kind.includes(sender, member.username()))
            .cloned()
            .collect()
    }

    /// `room` のメンバーへメッセージを配信する
    ///
    /// # Errors
    ///
    /// ルームが存在しない場合 `RepositoryError::RoomNotFound`
    pub async fn deliver(
        &self,
        room: &RoomName,
        sender: &Username,
        kind: &ChatKind,
        content: &MessageContent,
    ) -> Result<DeliveryReport, RepositoryError> {
        let members = self.rooms.members_of(room).await?;
        let event = kind.to_event(sender, content.as_str(), room);

        let mut report = DeliveryReport::default();
        for member in Self::delivery_targets(&members, sender, kind) {
            match member.push(event.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!("{}; dropping '{}'", e, member.username());
                    self.drop_member(&member).await;
                    report.failed.push(member.connection_id());
                }
            }
        }

        tracing::debug!(
            "Delivered {:?} from '{}' in '{}' to {} recipient(s)",
            kind,
            sender,
            room,
            report.delivered
        );
        Ok(report)
    }

    async fn drop_member(&self, member: &Session) {
        member.connection().close();
        self.connections.unbind(member.connection_id()).await;
        if let Ok(room) = self.rooms.leave(member).await {
            tracing::debug!(
                "Dropped '{}' from room '{}' after delivery failure",
                member.username(),
                room
            );
        }
    }
}
