//! 핸들러가 논리 뷰 이름을 돌려주고, 뷰 리졸버가 템플릿을 찾아 HTML 을 렌더링하는 예제.
//! MiniJinja 로 템플릿을 런타임에 이름으로 등록합니다.
//!
//! ```not_rust
//! cargo run -p example-response-view
//! ```
//! http://localhost:3000/response-view-v1 -> <p>hello!</p>

mod view;

use axum::{
    extract::{MatchedPath, State},
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use view::{Model, ModelAndView, ViewError, ViewResolver};

/// 📦 앱 상태 (뷰 리졸버 공유)
struct AppState {
    views: ViewResolver,
}

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

    // 템플릿 문법 오류는 서버 시작 시점에 드러난다
    let views = ViewResolver::new().unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    tracing::debug!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app(views)).await.unwrap();
}

fn app(views: ViewResolver) -> Router {
    let state = Arc::new(AppState { views });

    Router::new()
        .route("/response-view-v1", get(response_view_v1))
        .route("/response-view-v2", get(response_view_v2))
        .route("/response/hello", get(response_view_v3))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// --- 🚏 핸들러

/// 뷰 이름 + 모델을 한 객체로 반환
async fn response_view_v1(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ViewError> {
    let mav = ModelAndView::new("response/hello").add_object("data", "hello!");
    state.views.render(&mav)
}

/// 모델을 채우고 뷰 이름만 반환
fn hello_view(model: &mut Model) -> &'static str {
    model.add_attribute("data", "hello!");
    "response/hello"
}

async fn response_view_v2(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ViewError> {
    let mut model = Model::default();
    let view_name = hello_view(&mut model);
    state.views.render(&ModelAndView::with_model(view_name, model))
}

/// 뷰 이름을 반환하지 않으면 요청 경로가 곧 뷰 이름 (`/response/hello` → `response/hello`)
async fn response_view_v3(
    State(state): State<Arc<AppState>>,
    path: MatchedPath,
) -> Result<Html<String>, ViewError> {
    let mut model = Model::default();
    model.add_attribute("data", "hello!");

    let view_name = path.as_str().trim_start_matches('/');
    state.views.render(&ModelAndView::with_model(view_name, model))
}
