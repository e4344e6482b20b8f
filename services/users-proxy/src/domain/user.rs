// ユーザー関連のペイロード定義
//
// 受信したPOSTボディと、上流ユーザー管理APIのレスポンスを表す。

use std::fmt;

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSONオブジェクトとしてパース
///
/// トップレベルの`null`は既定値、オブジェクト以外（配列・文字列・数値）はエラー。
/// serdeの派生実装は配列をフィールド順の値として受け付けるため、先に形を確認する。
fn from_json_object<T>(body: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_str::<Value>(body)? {
        Value::Null => Ok(T::default()),
        object @ Value::Object(_) => serde_json::from_value(object),
        other => Err(serde_json::Error::invalid_type(
            unexpected(&other),
            &"a JSON object",
        )),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// `null`を既定値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// ネストしたオブジェクトを読む（`null`はNone、オブジェクト以外はエラー）
fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        object @ Value::Object(_) => serde_json::from_value(object)
            .map(Some)
            .map_err(D::Error::custom),
        other => Err(D::Error::invalid_type(unexpected(&other), &"a JSON object")),
    }
}

/// ユーザー作成リクエストのペイロード
///
/// POSTボディからパースし、同じ形のまま上流へ送信する。
/// 欠落または`null`のフィールドは空文字列として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
}

impl CreateUserPayload {
    /// JSON文字列からパース
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        from_json_object(body)
    }

    /// 上流へ送信する`{"name":..,"job":..}`形式のJSONを生成
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// ユーザー詳細（取得APIのネストされた`data`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserData {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// 上流APIのレスポンスから読み取るユーザーレコード
///
/// 取得APIは`data`にネストした詳細を返し、作成APIはフラットな
/// `id`/`name`/`job`を返す。どちらの形も受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub job: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_object")]
    pub data: Option<UserData>,
}

impl UserRecord {
    /// JSON文字列からパース
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        from_json_object(body)
    }

    /// 名（`data.first_name`）
    pub fn first_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.first_name.as_deref())
    }

    /// 姓（`data.last_name`）
    pub fn last_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.last_name.as_deref())
    }
}

/// `{"id":..,"first_name":..,"last_name":..,"email":..,"avatar":..}`形式で出力
///
/// 欠落したフィールドは空文字列になる。
/// `first_name`は作成APIのトップレベル`name`ではなく、取得APIの`data.first_name`から取る。
impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.clone().unwrap_or_default();
        let field = |value: Option<String>| Value::String(value.unwrap_or_default());

        write!(
            f,
            r#"{{"id":{},"first_name":{},"last_name":{},"email":{},"avatar":{}}}"#,
            Value::String(self.id.clone()),
            field(data.first_name),
            field(data.last_name),
            field(data.email),
            field(data.avatar),
        )
    }
}
