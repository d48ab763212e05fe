//! インメモリ Repository 実装
//!
//! HashMap をインメモリ DB として使用します。プロセス終了とともに
//! すべての状態が破棄されます（永続化はスコープ外）。

pub mod conversation;
pub mod presence;

pub use conversation::InMemoryConversationStore;
pub use presence::InMemoryPresenceRegistry;
