//! `Item` 도메인과 메모리 저장소를 JSON API 로 노출하는 예제.
//!
//! API:
//!
//! - `GET /items`: 전체 상품 목록
//! - `POST /items`: 상품 등록
//! - `DELETE /items`: 저장소 비우기
//! - `GET /items/{item_id}`: 상품 조회
//! - `PATCH /items/{item_id}`: 상품 수정
//!
//! ```not_rust
//! cargo run -p example-item-service
//! ```

mod item;
mod repository;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use item::{Item, ItemParams};
use repository::ItemRepository;

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

    // 확인용 샘플 데이터
    let repository = Arc::new(ItemRepository::default());
    repository.save(Item::new("itemA", 10000, 10));
    repository.save(Item::new("itemB", 20000, 20));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    tracing::debug!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app(repository)).await.unwrap();
}

fn app(repository: Arc<ItemRepository>) -> Router {
    Router::new()
        .route(
            "/items",
            get(items_index).post(items_create).delete(items_clear),
        )
        .route("/items/{item_id}", get(items_show).patch(items_update))
        .layer(TraceLayer::new_for_http())
        .with_state(repository)
}

/// --- 🚏 핸들러

async fn items_index(State(repository): State<Arc<ItemRepository>>) -> AppJson<Vec<Item>> {
    AppJson(repository.find_all())
}

async fn items_create(
    State(repository): State<Arc<ItemRepository>>,
    AppJson(params): AppJson<ItemParams>,
) -> impl IntoResponse {
    let item = repository.save(params.into());
    (StatusCode::CREATED, AppJson(item))
}

async fn items_clear(State(repository): State<Arc<ItemRepository>>) -> StatusCode {
    repository.clear_store();
    StatusCode::NO_CONTENT
}

async fn items_show(
    State(repository): State<Arc<ItemRepository>>,
    AppPath(item_id): AppPath<u64>,
) -> Result<AppJson<Item>, AppError> {
    repository
        .find_by_id(item_id)
        .map(AppJson)
        .ok_or(AppError::ItemNotFound(item_id))
}

async fn items_update(
    State(repository): State<Arc<ItemRepository>>,
    AppPath(item_id): AppPath<u64>,
    AppJson(params): AppJson<ItemParams>,
) -> Result<AppJson<Item>, AppError> {
    repository
        .update(item_id, params)
        .map(AppJson)
        .ok_or(AppError::ItemNotFound(item_id))
}

/// --- 🧩 추출기 래퍼 (실패 시 AppError 로 변환)

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
struct AppJson<T>(T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
struct AppPath<T>(T);

/// --- 🚨 에러 타입

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    #[error("item {0} not found")]
    ItemNotFound(u64),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let (status, message) = match &self {
            AppError::JsonRejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::PathRejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::ItemNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status, AppJson(ErrorResponse { message })).into_response()
    }
}
