/// UsersHandlerローカル実行CLI
///
/// Lambdaランタイムを介さずにUsersHandlerを1回だけ呼び出し、
/// OutboundResponseをJSONで標準出力に書き出す。
///
/// # 環境変数
/// - USERS_API_BASE_URL: 上流APIのベースURL（デフォルト: https://reqres.in/api/users）
/// - USERS_API_KEY: APIキー（デフォルト: fake_api_key）
///
/// # ローカル実行
/// ```bash
/// # ユーザー取得
/// cargo run --bin invoke -- --id 2
///
/// # ユーザー作成
/// cargo run --bin invoke -- --method POST --body '{"name":"morpheus","job":"leader"}'
/// ```
use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use users_proxy::application::UsersHandler;
use users_proxy::domain::InboundRequest;
use users_proxy::infrastructure::{init_logging, ReqwestUsersApi, UsersApiConfig};

/// ユーザーAPI中継ハンドラーのローカル実行
#[derive(Parser, Debug)]
#[command(name = "invoke")]
#[command(about = "UsersHandlerをローカルで1回呼び出す")]
struct Args {
    /// HTTPメソッド
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// `id`クエリパラメータ
    #[arg(long)]
    id: Option<String>,

    /// リクエストボディ
    #[arg(short, long, default_value = "")]
    body: String,
}

impl Args {
    fn into_request(self) -> InboundRequest {
        let mut query_params = HashMap::new();
        if let Some(id) = self.id {
            query_params.insert("id".to_string(), id);
        }
        InboundRequest::new(self.method, query_params, self.body)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "呼び出しに失敗");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let config = UsersApiConfig::from_env()?;
    let handler = UsersHandler::new(ReqwestUsersApi::new(config)?);

    let response = handler.handle(&args.into_request()).await?;
    Ok(serde_json::to_string(&response)?)
}
