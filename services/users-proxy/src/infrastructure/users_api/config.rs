// ユーザー管理API接続設定
//
// 上流APIのベースURLとAPIキーを環境変数から読み込む

use std::fmt;

use thiserror::Error;
use url::Url;

/// ベースURLのデフォルト値
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";

/// APIキーのデフォルト値
pub const DEFAULT_API_KEY: &str = "fake_api_key";

/// ユーザー管理API設定エラー
#[derive(Debug, Error)]
pub enum UsersApiConfigError {
    /// ベースURLが絶対http(s) URLとして解釈できない
    #[error("ベースURLが不正です: {url} ({reason})")]
    InvalidBaseUrl {
        /// 指定されたURL
        url: String,
        /// 不正な理由
        reason: String,
    },
}

/// ユーザー管理APIの設定
///
/// # フィールド
/// - `base_url`: ユーザーリソースのベースURL (例: "https://reqres.in/api/users")
/// - `api_key`: APIキー（現在はリクエストに付与しない）
#[derive(Clone)]
pub struct UsersApiConfig {
    base_url: String,
    api_key: String,
}

impl fmt::Debug for UsersApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsersApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl UsersApiConfig {
    /// 新しい設定を作成
    ///
    /// ベースURL末尾の`/`は取り除く。
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, UsersApiConfigError> {
        let base_url = base_url.into();
        Self::validate_base_url(&base_url)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `USERS_API_BASE_URL`: ベースURL（省略時は`DEFAULT_BASE_URL`）
    /// - `USERS_API_KEY`: APIキー（省略時は`DEFAULT_API_KEY`）
    pub fn from_env() -> Result<Self, UsersApiConfigError> {
        let base_url =
            std::env::var("USERS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("USERS_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());

        Self::new(base_url, api_key)
    }

    fn validate_base_url(base_url: &str) -> Result<(), UsersApiConfigError> {
        let invalid = |reason: String| UsersApiConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("未対応のスキーム: {other}"))),
        }
    }

    /// ベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// APIキーを取得
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
