/// lambda_httpのリクエスト/レスポンスとドメイン記述子の相互変換
///
/// API Gatewayプロキシ統合で受け取ったHTTPリクエストをInboundRequestに、
/// OutboundResponseをHTTPレスポンスに変換する。
use std::collections::HashMap;

use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::{Body, Request, RequestExt, Response};

use crate::domain::{InboundRequest, OutboundResponse};

/// HTTPリクエストをInboundRequestに変換
///
/// 同じキーのクエリパラメータが複数ある場合は、API Gatewayの
/// `queryStringParameters`と同じく最後の値を採用する。
/// バイナリボディはUTF-8として解釈できない部分を置換文字に変換する。
pub fn to_inbound_request(request: &Request) -> InboundRequest {
    let mut query_params = HashMap::new();
    for (key, value) in request.query_string_parameters().iter() {
        query_params.insert(key.to_string(), value.to_string());
    }

    let body = match request.body() {
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => String::new(),
    };

    InboundRequest::new(request.method().as_str(), query_params, body)
}

/// OutboundResponseをHTTPレスポンスに変換
pub fn to_http_response(
    response: OutboundResponse,
) -> Result<Response<Body>, lambda_http::http::Error> {
    let content_type = response.content_type();

    Response::builder()
        .status(response.status_code)
        .header(CONTENT_TYPE, content_type)
        .body(Body::Text(response.body))
}
