//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! 受信イベントの振り分けは [`MessageRouter`] が担います。

pub mod create_room;
pub mod disconnect;
pub mod error;
pub mod fanout;
pub mod join_room;
pub mod leave_room;
pub mod operator_broadcast;
pub mod router;
pub mod send_chat;
pub mod signin;
pub mod signout;
pub mod signup;

#[cfg(test)]
pub(crate) mod testing;

pub use create_room::CreateRoomUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::UseCaseError;
pub use fanout::{DeliveryReport, Fanout};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use operator_broadcast::OperatorBroadcastUseCase;
pub use router::MessageRouter;
pub use send_chat::SendChatUseCase;
pub use signin::SigninUseCase;
pub use signout::SignoutUseCase;
pub use signup::SignupUseCase;
