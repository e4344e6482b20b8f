// アプリケーション層モジュール
pub mod users_handler;

// 再エクスポート
pub use users_handler::{UsersHandler, UsersHandlerError};
