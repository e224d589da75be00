//! 논리 뷰 이름(`response/hello`) → 템플릿 → HTML 로 바꾸는 뷰 리졸버.
//!
//! MiniJinja `Environment` 에 템플릿을 이름으로 등록해 두고, 핸들러가 돌려준
//! 뷰 이름과 모델로 렌더링합니다.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// 뷰에 넘겨줄 데이터 (이름 → 값)
#[derive(Debug, Default, Clone)]
pub struct Model(BTreeMap<String, Value>);

impl Model {
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// 뷰 이름과 모델을 한 번에 반환할 때 사용
#[derive(Debug, Clone)]
pub struct ModelAndView {
    view_name: String,
    model: Model,
}

impl ModelAndView {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self::with_model(view_name, Model::default())
    }

    pub fn with_model(view_name: impl Into<String>, model: Model) -> Self {
        Self {
            view_name: view_name.into(),
            model,
        }
    }

    pub fn add_object(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.add_attribute(name, value);
        self
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

/// 🗂️ 템플릿 저장소 + 렌더러
pub struct ViewResolver {
    env: Environment<'static>,
}

impl ViewResolver {
    /// `templates/` 아래 템플릿을 뷰 이름으로 등록
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        // 뷰 이름에 확장자가 없으므로 모든 뷰를 HTML 로 이스케이프
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template(
            "response/hello",
            include_str!("../templates/response/hello.html"),
        )?;
        Ok(Self { env })
    }

    pub fn render(&self, mav: &ModelAndView) -> Result<Html<String>, ViewError> {
        let template = self.env.get_template(mav.view_name()).map_err(|err| {
            if err.kind() == ErrorKind::TemplateNotFound {
                ViewError::NotFound(mav.view_name().to_owned())
            } else {
                ViewError::Render(err)
            }
        })?;

        let html = template.render(&mav.model().0)?;
        tracing::debug!(view = mav.view_name(), "rendered view");
        Ok(Html(html))
    }
}

/// 🚨 뷰 렌더링 실패. 클라이언트 입장에서는 모두 서버 오류.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("view not found: {0}")]
    NotFound(String),

    #[error("failed to render view: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "view resolution failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_registered_view_with_model() {
        let views = ViewResolver::new().unwrap();
        let mav = ModelAndView::new("response/hello").add_object("data", "hello!");

        let Html(html) = views.render(&mav).unwrap();

        assert!(html.contains("<p>hello!</p>"), "unexpected html: {html}");
    }

    #[test]
    fn model_values_are_html_escaped() {
        let views = ViewResolver::new().unwrap();
        let mav = ModelAndView::new("response/hello").add_object("data", "<b>hi</b>");

        let Html(html) = views.render(&mav).unwrap();

        assert!(html.contains("&lt;b&gt;hi"), "unexpected html: {html}");
        assert!(!html.contains("<b>"), "unexpected html: {html}");
    }

    #[test]
    fn unknown_view_is_server_error() {
        let views = ViewResolver::new().unwrap();

        let err = views.render(&ModelAndView::new("response/bye")).unwrap_err();

        assert!(matches!(&err, ViewError::NotFound(name) if name == "response/bye"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn model_attributes_are_overwritten_by_name() {
        let mut model = Model::default();
        model.add_attribute("data", "first");
        model.add_attribute("data", "second");

        assert_eq!(model.get("data"), Some(&Value::from("second")));
    }
}
