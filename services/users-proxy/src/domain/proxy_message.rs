/// ホストランタイムとの間で受け渡すリクエスト/レスポンス記述子
///
/// Lambda等のホストアダプターはHTTPイベントをInboundRequestに正規化して
/// ハンドラーへ渡し、ハンドラーはOutboundResponseを返却する。
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 405レスポンスの本文
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// 正規化された受信リクエスト
///
/// 1回の呼び出しごとにホストアダプターが生成し、以後変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    /// HTTPメソッド（"GET", "POST"など）
    pub method: String,
    /// クエリパラメータ
    #[serde(default)]
    pub query_params: HashMap<String, String>,
    /// リクエストボディ（空の場合は空文字列）
    #[serde(default)]
    pub body: String,
}

impl InboundRequest {
    /// 新しいリクエストを作成
    pub fn new(
        method: impl Into<String>,
        query_params: HashMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            query_params,
            body: body.into(),
        }
    }

    /// クエリパラメータを取得（存在しない場合は空文字列）
    pub fn query_param(&self, key: &str) -> &str {
        self.query_params.get(key).map(String::as_str).unwrap_or("")
    }
}

/// 正規化された送信レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスボディ
    pub body: String,
}

impl OutboundResponse {
    /// 上流のレスポンスボディをそのまま転送する200レスポンス
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// 未対応メソッドに対する405レスポンス
    pub fn method_not_allowed() -> Self {
        Self {
            status_code: 405,
            body: METHOD_NOT_ALLOWED_BODY.to_string(),
        }
    }

    /// ボディに対応するContent-Type
    ///
    /// 成功時は上流のJSONを転送するため`application/json`、
    /// それ以外はプレーンテキスト。
    pub fn content_type(&self) -> &'static str {
        if (200..300).contains(&self.status_code) {
            "application/json"
        } else {
            "text/plain; charset=utf-8"
        }
    }
}
