//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod get_chat_history;
pub mod presence_hub;
pub mod send_message;

pub use error::{ConnectError, HistoryError, SendMessageError};
pub use get_chat_history::GetChatHistoryUseCase;
pub use presence_hub::PresenceHub;
pub use send_message::SendMessageUseCase;
