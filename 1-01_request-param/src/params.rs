//! 요청 파라미터 추출기와 에러 타입.
//!
//! 서블릿의 "요청 파라미터"는 쿼리 스트링과 HTML Form 바디를 구분하지 않습니다.
//! `Params<T>` 는 같은 규칙을 따릅니다.
//! - `application/x-www-form-urlencoded` 요청 → 바디(GET 이면 쿼리)에서 읽음
//! - 그 외 → 쿼리 스트링에서 읽음

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        FromRequest, Query, Request,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
};
use thiserror::Error;

/// 🧩 요청 파라미터를 `T` 로 바인딩하는 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct Params<T>(pub T);

impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = ParamError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| {
                content_type.starts_with("application/x-www-form-urlencoded")
            });

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        // JSON 등 다른 바디는 무시하고 쿼리 스트링만 본다
        let Query(value) = Query::<T>::try_from_uri(req.uri())?;
        Ok(Self(value))
    }
}

/// 🚨 파라미터 바인딩 실패
#[derive(Debug, Error)]
pub enum ParamError {
    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error("Required request parameter '{0}' is not present")]
    Missing(&'static str),

    #[error("Failed to convert value of parameter '{name}': {value:?}")]
    TypeMismatch { name: &'static str, value: String },
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        let status = match &self {
            ParamError::Query(rejection) => rejection.status(),
            // axum 은 바디 역직렬화 실패를 422 로 보내지만, 파라미터 바인딩 실패는 모두 400
            ParamError::Form(FormRejection::FailedToDeserializeFormBody(_)) => {
                StatusCode::BAD_REQUEST
            }
            ParamError::Form(rejection) => rejection.status(),
            ParamError::Missing(_) | ParamError::TypeMismatch { .. } => StatusCode::BAD_REQUEST,
        };

        tracing::debug!(%status, error = %self, "request parameter binding failed");

        (status, self.to_string()).into_response()
    }
}

/// 파라미터는 있지만 값이 비어 있으면(`age=`) `None` 으로 취급
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// 키마다 첫 번째 값만 남긴다 (`key=a&key=b` → `key → a`)
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in pairs {
        values.entry(key).or_insert(value);
    }
    values
}

/// `key=a&key=b` 형태를 `key → [a, b]` 로 묶는다 (MultiValueMap)
pub fn group_params(pairs: Vec<(String, String)>) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_params_keeps_every_value_in_order() {
        let grouped = group_params(vec![
            ("userIds".to_owned(), "id1".to_owned()),
            ("username".to_owned(), "kim".to_owned()),
            ("userIds".to_owned(), "id2".to_owned()),
        ]);

        assert_eq!(grouped["userIds"], vec!["id1", "id2"]);
        assert_eq!(grouped["username"], vec!["kim"]);
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn first_values_keeps_first_of_repeated_keys() {
        let values = first_values(vec![
            ("username".to_owned(), "first".to_owned()),
            ("age".to_owned(), "20".to_owned()),
            ("username".to_owned(), "second".to_owned()),
        ]);

        assert_eq!(values["username"], "first");
        assert_eq!(values["age"], "20");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn missing_parameter_is_bad_request() {
        let response = ParamError::Missing("username").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
