/// ユーザーAPI中継ハンドラー
///
/// 受信リクエストをメソッドで振り分け、上流のユーザー管理APIへ中継する。
/// - GET: `id`クエリパラメータでユーザーを取得
/// - POST: ボディの`name`/`job`でユーザーを作成
/// - その他: 上流を呼ばずに405を返す
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{CreateUserPayload, InboundRequest, OutboundResponse, UserRecord};
use crate::infrastructure::{UsersApi, UsersApiError};

/// ハンドラーのエラー型
///
/// いずれもホストランタイムへそのまま伝播する。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsersHandlerError {
    /// POSTボディがJSONとして不正
    #[error("リクエストボディが不正です: {0}")]
    InvalidRequest(String),

    /// 上流への送信失敗
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 上流が2xx以外を返却
    #[error("上流APIエラー: status={status}")]
    Upstream {
        /// HTTPステータスコード
        status: u16,
    },

    /// レスポンスボディの読み込み失敗
    #[error("レスポンス読み込みエラー: {0}")]
    Read(String),

    /// 上流が2xxを返したがボディをパースできない
    #[error("上流レスポンスが不正です: {0}")]
    InvalidResponse(String),
}

impl From<UsersApiError> for UsersHandlerError {
    fn from(err: UsersApiError) -> Self {
        match err {
            UsersApiError::Network(message) => UsersHandlerError::Network(message),
            UsersApiError::Upstream { status } => UsersHandlerError::Upstream { status },
            UsersApiError::Read(message) => UsersHandlerError::Read(message),
        }
    }
}

/// リクエストを上流へ中継するハンドラー
///
/// 状態を持たないため、同じインスタンスを複数の呼び出しで共有できる。
pub struct UsersHandler<A>
where
    A: UsersApi,
{
    /// 上流APIクライアント
    users_api: A,
}

impl<A> UsersHandler<A>
where
    A: UsersApi,
{
    /// 新しいUsersHandlerを作成
    pub fn new(users_api: A) -> Self {
        Self { users_api }
    }

    /// リクエストをメソッドで振り分けて処理
    ///
    /// # 戻り値
    /// * `Ok(OutboundResponse)` - 200（上流のボディ）または405
    /// * `Err(UsersHandlerError)` - 入力不正・上流エラー
    pub async fn handle(
        &self,
        request: &InboundRequest,
    ) -> Result<OutboundResponse, UsersHandlerError> {
        info!(method = %request.method, body = %request.body, "リクエスト受信");

        match request.method.as_str() {
            "GET" => self.lookup_user(request).await,
            "POST" => self.create_user(request).await,
            other => {
                info!(method = other, "未対応のメソッド");
                Ok(OutboundResponse::method_not_allowed())
            }
        }
    }

    /// `id`クエリパラメータでユーザーを取得
    ///
    /// `id`が無い場合は空文字列として上流に問い合わせる。
    pub async fn lookup_user(
        &self,
        request: &InboundRequest,
    ) -> Result<OutboundResponse, UsersHandlerError> {
        let id = request.query_param("id");

        let body = self.users_api.fetch_user(id).await.map_err(|e| {
            error!(id = id, error = %e, "ユーザー取得に失敗");
            UsersHandlerError::from(e)
        })?;

        let record = Self::parse_user_record(&body)?;
        info!(
            first_name = record.first_name().unwrap_or_default(),
            last_name = record.last_name().unwrap_or_default(),
            "ユーザー取得完了"
        );

        Ok(OutboundResponse::ok(body))
    }

    /// ボディの`name`/`job`でユーザーを作成
    ///
    /// ボディが不正な場合は上流を呼ばずにエラーを返す。
    pub async fn create_user(
        &self,
        request: &InboundRequest,
    ) -> Result<OutboundResponse, UsersHandlerError> {
        let payload = CreateUserPayload::from_json(&request.body).map_err(|e| {
            error!(error = %e, "リクエストボディのパースに失敗");
            UsersHandlerError::InvalidRequest(e.to_string())
        })?;

        let upstream_body = payload
            .to_json()
            .map_err(|e| UsersHandlerError::InvalidRequest(e.to_string()))?;

        let body = self
            .users_api
            .create_user(&upstream_body)
            .await
            .map_err(|e| {
                error!(error = %e, "ユーザー作成に失敗");
                UsersHandlerError::from(e)
            })?;

        let record = Self::parse_user_record(&body)?;
        info!(user_id = %record.id, "ユーザー作成完了");

        Ok(OutboundResponse::ok(body))
    }

    fn parse_user_record(body: &str) -> Result<UserRecord, UsersHandlerError> {
        UserRecord::from_json(body).map_err(|e| {
            error!(error = %e, body = %body, "上流レスポンスのパースに失敗");
            UsersHandlerError::InvalidResponse(e.to_string())
        })
    }
}
