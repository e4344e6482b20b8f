/// ユーザーAPI中継 HTTP Lambdaエントリポイント
///
/// API Gatewayプロキシ統合経由のGET/POSTリクエストを
/// 上流のユーザー管理APIへ中継し、レスポンスを返却する。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tokio::sync::OnceCell;
use tracing::{error, info};
use users_proxy::application::UsersHandler;
use users_proxy::infrastructure::{
    init_logging, to_http_response, to_inbound_request, ReqwestUsersApi, UsersApi, UsersApiConfig,
};

/// UsersHandlerの静的インスタンス
///
/// Lambda warm start時にHTTPクライアントを再利用するため、
/// 一度初期化したハンドラーを静的に保持する。
static USERS_HANDLER: OnceCell<UsersHandler<ReqwestUsersApi>> = OnceCell::const_new();

/// UsersHandlerを取得（初期化されていなければ環境変数から初期化）
async fn get_users_handler() -> Result<&'static UsersHandler<ReqwestUsersApi>, Error> {
    USERS_HANDLER
        .get_or_try_init(|| async {
            let config = UsersApiConfig::from_env()?;
            let users_api = ReqwestUsersApi::new(config)?;
            Ok::<_, Error>(UsersHandler::new(users_api))
        })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ユーザーAPI中継Lambda関数を初期化");

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let users_handler = get_users_handler().await?;
    handle_request(users_handler, request).await
}

/// 1件のリクエストを処理
///
/// ハンドラーのエラーはログ出力した上でランタイムへ伝播する。
async fn handle_request<A>(
    users_handler: &UsersHandler<A>,
    request: Request,
) -> Result<Response<Body>, Error>
where
    A: UsersApi,
{
    let inbound = to_inbound_request(&request);

    let outbound = users_handler.handle(&inbound).await.map_err(|err| {
        error!(method = %inbound.method, error = %err, "リクエスト処理エラー");
        err
    })?;

    info!(status_code = outbound.status_code, "レスポンス送信");
    Ok(to_http_response(outbound)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lambda_http::http::Request as HttpRequest;
    use lambda_http::RequestExt;
    use std::collections::HashMap;
    use users_proxy::infrastructure::UsersApiError;

    /// 固定のボディを返す上流API
    struct FixedUsersApi {
        response: Result<String, UsersApiError>,
    }

    #[async_trait]
    impl UsersApi for FixedUsersApi {
        async fn fetch_user(&self, _id: &str) -> Result<String, UsersApiError> {
            self.response.clone()
        }

        async fn create_user(&self, _body: &str) -> Result<String, UsersApiError> {
            self.response.clone()
        }
    }

    fn handler_with(response: Result<String, UsersApiError>) -> UsersHandler<FixedUsersApi> {
        init_logging();
        UsersHandler::new(FixedUsersApi { response })
    }

    fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        }
    }

    #[tokio::test]
    async fn test_get_returns_upstream_body() {
        let body = r#"{"data":{"first_name":"Janet","last_name":"Weaver"}}"#;
        let users_handler = handler_with(Ok(body.to_string()));

        let request = HttpRequest::builder()
            .method("GET")
            .uri("/")
            .body(Body::Empty)
            .unwrap()
            .with_query_string_parameters(HashMap::from([("id".to_string(), "2".to_string())]));

        let response = handle_request(&users_handler, request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_text(&response), body);
    }

    #[tokio::test]
    async fn test_delete_returns_405() {
        let users_handler = handler_with(Ok("{}".to_string()));

        let request = HttpRequest::builder()
            .method("DELETE")
            .uri("/")
            .body(Body::Empty)
            .unwrap();

        let response = handle_request(&users_handler, request).await.unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(body_text(&response), "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_to_runtime() {
        let users_handler = handler_with(Err(UsersApiError::Upstream { status: 404 }));

        let request = HttpRequest::builder()
            .method("GET")
            .uri("/")
            .body(Body::Empty)
            .unwrap();

        let result = handle_request(&users_handler, request).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_invalid_post_body_propagates_to_runtime() {
        let users_handler = handler_with(Ok("{}".to_string()));

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::Text("not-json".to_string()))
            .unwrap();

        let result = handle_request(&users_handler, request).await;

        assert!(result.is_err());
    }
}
