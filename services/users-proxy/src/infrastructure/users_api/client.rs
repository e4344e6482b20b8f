// UsersApi - ユーザー管理APIクライアント
//
// 上流のユーザー管理APIに対して取得(GET)・作成(POST)を行い、
// レスポンスボディを加工せずに返す。再試行は行わない。

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::config::UsersApiConfig;

/// UsersApi用エラー型
///
/// # エラー種別
/// - `Network`: リクエスト送信時の通信エラー
/// - `Upstream`: 上流が2xx以外のステータスを返した
/// - `Read`: レスポンスボディの読み込みエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsersApiError {
    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 上流エラー（ステータスコード付き）
    #[error("上流APIエラー: status={status}")]
    Upstream {
        /// HTTPステータスコード
        status: u16,
    },

    /// ボディ読み込みエラー
    #[error("レスポンス読み込みエラー: {0}")]
    Read(String),
}

/// ユーザー管理API操作用トレイト
///
/// 実際のHTTPクライアントとテスト用モックを差し替えられるようにする。
/// 成功時は上流のレスポンスボディを生のまま返す。
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// IDでユーザーを取得（GET {base}/{id}）
    async fn fetch_user(&self, id: &str) -> Result<String, UsersApiError>;

    /// ユーザーを作成（POST {base}）
    ///
    /// # 引数
    /// * `body` - 送信するJSON文字列
    async fn create_user(&self, body: &str) -> Result<String, UsersApiError>;
}

/// reqwestによるUsersApi実装
#[derive(Clone)]
pub struct ReqwestUsersApi {
    client: Client,
    config: UsersApiConfig,
}

impl std::fmt::Debug for ReqwestUsersApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestUsersApi")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl ReqwestUsersApi {
    /// 設定からクライアントを作成
    ///
    /// タイムアウトはトランスポートのデフォルトに任せる。
    pub fn new(config: UsersApiConfig) -> Result<Self, reqwest::Error> {
        info!(base_url = config.base_url(), "ReqwestUsersApiを初期化");

        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// 設定を取得
    pub fn config(&self) -> &UsersApiConfig {
        &self.config
    }

    /// ユーザー取得URLを構築（`{base}/{id}`、IDが空なら`{base}/`）
    pub fn user_url(&self, id: &str) -> String {
        format!("{}/{}", self.config.base_url(), id)
    }

    /// ユーザー作成URLを構築
    pub fn users_url(&self) -> String {
        self.config.base_url().to_string()
    }

    /// 送信済みリクエストのレスポンスを検査してボディを読み出す
    ///
    /// 2xx以外の場合はボディを読まずに破棄する。
    async fn read_body(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<String, UsersApiError> {
        let response = response.map_err(|e| {
            error!(error = %e, "上流APIへのリクエスト送信に失敗");
            UsersApiError::Network(e.to_string())
        })?;

        let status = response.status();
        info!(status = %status, "上流APIレスポンス受信");

        if !status.is_success() {
            error!(status = %status, "上流APIがエラーステータスを返却");
            return Err(UsersApiError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "レスポンスボディの読み込みに失敗");
            UsersApiError::Read(e.to_string())
        })?;

        debug!(body = %body, "上流APIレスポンスボディ");
        Ok(body)
    }
}

#[async_trait]
impl UsersApi for ReqwestUsersApi {
    #[instrument(skip(self))]
    async fn fetch_user(&self, id: &str) -> Result<String, UsersApiError> {
        let url = self.user_url(id);
        info!(url = %url, "ユーザーを取得");

        Self::read_body(self.client.get(&url).send().await).await
    }

    #[instrument(skip(self, body))]
    async fn create_user(&self, body: &str) -> Result<String, UsersApiError> {
        let url = self.users_url();
        info!(url = %url, "ユーザーを作成");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await;

        Self::read_body(response).await
    }
}
