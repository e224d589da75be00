//! 공통 경로(prefix)를 가진 라우터를 조합하고, HTTP 메서드로 핸들러를 나누는 예제.
//! > `/mapping/users` 라우터를 `nest` 로 붙이면, 안쪽 라우터는 나머지 경로만 신경 쓰면 된다.
//!
//! 회원 관리 API
//! - 회원 목록 조회: GET    /mapping/users
//! - 회원 등록:     POST   /mapping/users
//! - 회원 조회:     GET    /mapping/users/{userId}
//! - 회원 수정:     PATCH  /mapping/users/{userId}
//! - 회원 삭제:     DELETE /mapping/users/{userId}
//!
//! ```not_rust
//! cargo run -p example-request-mapping
//! ```

use axum::{extract::Path, routing::get, Router};
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
        // 바깥 경로 + 안쪽 경로 = 최종 경로
        .nest("/mapping/users", users())
        .layer(TraceLayer::new_for_http())
}

/// 🧭 `/mapping/users` 아래에 붙는 라우터
fn users() -> Router {
    Router::new()
        .route("/", get(user).post(add_user))
        .route(
            "/{user_id}",
            get(find_user).patch(update_user).delete(delete_user),
        )
}

async fn user() -> &'static str {
    "get users"
}

async fn add_user() -> &'static str {
    "post user"
}

async fn find_user(Path(user_id): Path<String>) -> String {
    tracing::debug!(%user_id, "find user");
    format!("get userId={user_id}")
}

async fn update_user(Path(user_id): Path<String>) -> String {
    tracing::debug!(%user_id, "update user");
    format!("update userId={user_id}")
}

async fn delete_user(Path(user_id): Path<String>) -> String {
    tracing::debug!(%user_id, "delete user");
    format!("delete userId={user_id}")
}
