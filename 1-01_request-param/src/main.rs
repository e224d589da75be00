//! 요청 파라미터를 핸들러 인자로 바인딩하는 여러 가지 방법을 보여주는 예제입니다.
//! > GET 쿼리 스트링, POST HTML Form 모두 같은 "요청 파라미터"로 취급합니다.
//!
//! 실행 방법:
//!
//! ```bash
//! cargo run -p example-request-param
//! ```
//!
//! http://localhost:3000/request-param-v2?username=hello&age=20 -> ok

mod params;


use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::Response,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use params::{empty_string_as_none, first_values, group_params, ParamError, Params};

#[tokio::main]
async fn main() {
    // ✨ 로그 필터 설정 (RUST_LOG 가 없으면 debug)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    tracing::debug!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app()).await.unwrap();
}

/// 🧭 라우터 구성
/// 모든 경로가 GET 과 POST 를 같은 핸들러로 받습니다.
fn app() -> Router {
    Router::new()
        .route(
            "/request-param-v1",
            get(request_param_v1).post(request_param_v1),
        )
        .route(
            "/request-param-v2",
            get(request_param_v2).post(request_param_v2),
        )
        .route(
            "/request-param-v3",
            get(request_param_v3).post(request_param_v3),
        )
        .route(
            "/request-param-v4",
            get(request_param_v4).post(request_param_v4),
        )
        .route(
            "/request-param-required",
            get(request_param_required).post(request_param_required),
        )
        .route(
            "/request-param-default",
            get(request_param_default).post(request_param_default),
        )
        .route(
            "/request-param-map",
            get(request_param_map).post(request_param_map),
        )
        .route(
            "/request-param-multi-map",
            get(request_param_multi_map).post(request_param_multi_map),
        )
        .route(
            "/model-attribute-v1",
            get(model_attribute_v1).post(model_attribute_v1),
        )
        .route(
            "/model-attribute-v2",
            get(model_attribute_v2).post(model_attribute_v2),
        )
        .layer(TraceLayer::new_for_http())
}

/// --- 📦 바인딩 대상 구조체

/// 파라미터 이름과 변수 이름이 다른 경우 (`username` → `member_name`)
#[derive(Debug, PartialEq, Deserialize)]
struct MemberParams {
    #[serde(rename = "username")]
    member_name: String,
    #[serde(rename = "age")]
    member_age: i32,
}

/// 파라미터 이름과 필드 이름이 같은 경우
#[derive(Debug, PartialEq, Deserialize)]
struct UserParams {
    username: String,
    age: i32,
}

/// 래퍼 없이 받는 단순 파라미터. username 은 없어도 된다.
#[derive(Debug, PartialEq, Deserialize)]
struct PlainParams {
    username: Option<String>,
    age: i32,
}

/// username 은 필수(빈 문자열 허용), age 는 선택
#[derive(Debug, PartialEq, Deserialize)]
struct RequiredParams {
    username: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<i32>,
}

/// 값이 없거나 비어 있으면 기본값을 쓰는 파라미터
#[derive(Debug, PartialEq, Deserialize)]
struct DefaultParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    username: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<i32>,
}

impl DefaultParams {
    const DEFAULT_USERNAME: &'static str = "guest";
    const DEFAULT_AGE: i32 = -1;

    fn resolve(self) -> (String, i32) {
        (
            self.username
                .unwrap_or_else(|| Self::DEFAULT_USERNAME.to_owned()),
            self.age.unwrap_or(Self::DEFAULT_AGE),
        )
    }
}

/// 모델 객체. 요청 파라미터 이름으로 필드를 찾아 값을 채운다.
/// 없는 필드는 기본값(`""`, `0`)으로 남는다.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct HelloData {
    username: String,
    age: i32,
}

/// --- 🚏 핸들러

/// 파라미터 맵을 직접 읽고, 응답 바디에 "ok" 를 직접 써 넣는다.
async fn request_param_v1(
    Params(pairs): Params<Vec<(String, String)>>,
) -> Result<Response, ParamError> {
    let params = first_values(pairs);
    let username = params
        .get("username")
        .ok_or(ParamError::Missing("username"))?;
    let age = params.get("age").ok_or(ParamError::Missing("age"))?;
    let age: i32 = age.parse().map_err(|_| ParamError::TypeMismatch {
        name: "age",
        value: age.clone(),
    })?;

    tracing::info!("username={}, age={}", username, age);

    let mut response = Response::new(Body::from("ok"));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    Ok(response)
}

async fn request_param_v2(Params(params): Params<MemberParams>) -> &'static str {
    tracing::info!("username={}, age={}", params.member_name, params.member_age);
    "ok"
}

async fn request_param_v3(Params(params): Params<UserParams>) -> &'static str {
    tracing::info!("username={}, age={}", params.username, params.age);
    "ok"
}

/// 래퍼 없이 axum 기본 `Form` 추출기만 사용 (GET 은 쿼리, POST 는 바디)
async fn request_param_v4(Form(params): Form<PlainParams>) -> &'static str {
    tracing::info!("username={:?}, age={}", params.username, params.age);
    "ok"
}

async fn request_param_required(Params(params): Params<RequiredParams>) -> &'static str {
    tracing::info!("username={}, age={:?}", params.username, params.age);
    "ok"
}

async fn request_param_default(Params(params): Params<DefaultParams>) -> &'static str {
    let (username, age) = params.resolve();
    tracing::info!("username={}, age={}", username, age);
    "ok"
}

/// 같은 키가 여러 번 오면 첫 번째 값이 남는다.
async fn request_param_map(Params(pairs): Params<Vec<(String, String)>>) -> &'static str {
    let params = first_values(pairs);
    tracing::info!(
        "username={:?}, age={:?}",
        params.get("username"),
        params.get("age")
    );
    "ok"
}

async fn request_param_multi_map(
    Params(pairs): Params<Vec<(String, String)>>,
) -> &'static str {
    let params = group_params(pairs);
    tracing::info!(?params, "multi-valued request parameters");
    "ok"
}

async fn model_attribute_v1(Params(hello_data): Params<HelloData>) -> &'static str {
    tracing::info!("username={}, age={}", hello_data.username, hello_data.age);
    "ok"
}

/// 래퍼 없이 `Form` 으로 모델 객체를 바로 받는다.
async fn model_attribute_v2(Form(hello_data): Form<HelloData>) -> &'static str {
    tracing::info!("username={}, age={}", hello_data.username, hello_data.age);
    "ok"
}

// 🧪 테스트 예시 (curl)
//
// curl 'http://localhost:3000/request-param-required?username='
// -> ok (빈 문자열로 통과)
//
// curl 'http://localhost:3000/request-param-required'
// -> 400 Failed to deserialize query string: missing field `username`
//
// curl -X POST http://localhost:3000/model-attribute-v1 -d 'username=kim&age=abc'
// -> 400 (age 바인딩 실패)
