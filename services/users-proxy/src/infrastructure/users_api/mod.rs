// ユーザー管理APIモジュール
//
// - UsersApiConfig: 上流ベースURLとAPIキーの設定
// - UsersApi / ReqwestUsersApi: 取得・作成リクエストを送るクライアント

mod client;
mod config;

pub use client::{ReqwestUsersApi, UsersApi, UsersApiError};
pub use config::{DEFAULT_API_KEY, DEFAULT_BASE_URL, UsersApiConfig, UsersApiConfigError};

#[cfg(test)]
pub use client::tests::{MockUsersApi, RecordedCall};
