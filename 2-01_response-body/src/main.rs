//! 뷰 템플릿 없이 HTTP 메시지 바디에 데이터를 직접 싣는 방법들.
//! > 문자열 바디, 상태 코드 + 바디(엔티티), JSON 바디
//!
//! ```not_rust
//! cargo run -p example-response-body
//! ```
//! http://localhost:3000/response-body-json-v1 -> {"username":"userA","age":20}

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
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

fn app() -> Router {
    Router::new()
        .route("/response-body-string-v1", get(response_body_v1))
        .route("/response-body-string-v2", get(response_body_v2))
        .route("/response-body-string-v3", get(response_body_v3))
        .route("/response-body-json-v1", get(response_body_json_v1))
        .route("/response-body-json-v2", get(response_body_json_v2))
        .route("/response-body-created", get(response_body_created))
        .layer(TraceLayer::new_for_http())
}

/// --- 📦 응답 타입

#[derive(Debug, Clone, Serialize)]
struct HelloData {
    username: String,
    age: i32,
}

impl HelloData {
    fn user_a() -> Self {
        Self {
            username: "userA".to_owned(),
            age: 20,
        }
    }
}

/// 🧾 상태 코드 + 바디를 함께 들고 있는 응답 엔티티
/// 상태 코드를 핸들러 안에서 정할 수 있다.
#[derive(Debug)]
struct ResponseEntity<T> {
    body: T,
    status: StatusCode,
}

impl<T> ResponseEntity<T> {
    fn new(body: T, status: StatusCode) -> Self {
        Self { body, status }
    }
}

impl<T> IntoResponse for ResponseEntity<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}

/// --- 🚏 핸들러

/// 응답 객체를 직접 만들어 바디에 "ok" 를 쓴다
async fn response_body_v1() -> Response {
    let mut response = Response::new(Body::from("ok"));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

async fn response_body_v2() -> ResponseEntity<&'static str> {
    ResponseEntity::new("ok", StatusCode::OK)
}

/// 문자열을 그대로 반환하면 text/plain 바디가 된다
async fn response_body_v3() -> &'static str {
    "ok"
}

async fn response_body_json_v1() -> ResponseEntity<Json<HelloData>> {
    ResponseEntity::new(Json(HelloData::user_a()), StatusCode::OK)
}

// 상태 코드가 핸들러 선언에 고정된다. 조건에 따라 바꾸려면 ResponseEntity 를 쓴다.
const JSON_V2_STATUS: StatusCode = StatusCode::OK;

async fn response_body_json_v2() -> (StatusCode, Json<HelloData>) {
    (JSON_V2_STATUS, Json(HelloData::user_a()))
}

async fn response_body_created() -> ResponseEntity<&'static str> {
    ResponseEntity::new("ok", StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn string_bodies_are_plain_text_ok() {
        for uri in [
            "/response-body-string-v1",
            "/response-body-string-v2",
            "/response-body-string-v3",
        ] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                mime::TEXT_PLAIN_UTF_8.as_ref(),
                "{uri}"
            );
            assert_eq!(body_string(response).await, "ok", "{uri}");
        }
    }

    #[tokio::test]
    async fn json_bodies_serialize_hello_data() {
        for uri in ["/response-body-json-v1", "/response-body-json-v2"] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                mime::APPLICATION_JSON.as_ref(),
                "{uri}"
            );

            let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body, json!({ "username": "userA", "age": 20 }), "{uri}");
        }
    }

    #[tokio::test]
    async fn entity_status_is_chosen_by_handler() {
        let response = get("/response-body-created").await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response).await, "ok");
    }

    #[test]
    fn response_entity_keeps_status_and_headers_of_body() {
        let response = ResponseEntity::new(Json(HelloData::user_a()), StatusCode::ACCEPTED)
            .into_response();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            mime::APPLICATION_JSON.as_ref()
        );
    }
}
