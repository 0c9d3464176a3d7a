//! インメモリ Repository 実装
//!
//! すべてプロセスの生存期間のみ保持されます。

pub mod connection;
pub mod identity;
pub mod room;

pub use connection::InMemoryConnectionRepository;
pub use identity::InMemoryIdentityRepository;
pub use room::InMemoryRoomRepository;
