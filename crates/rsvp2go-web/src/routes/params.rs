//! Query strings and form bodies as ordered name/value pairs.
//!
//! Routes branch on whether a parameter is *present*, not on its value, and
//! a repeated name resolves to its first value. Form bodies may be
//! `application/x-www-form-urlencoded` or `multipart/form-data`; both decode
//! to the same [`Params`].

use axum::extract::{Form, FromRequest, FromRequestParts, Multipart, Query, Request};
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;

/// Decoded name/value pairs in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// First value of `name`, or `None` when the name is absent.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Owned copy of [`Params::first`].
    pub fn take(&self, name: &str) -> Option<String> {
        self.first(name).map(str::to_string)
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub Params);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(Params(pairs)))
    }
}

/// Form body extractor accepting url-encoded and multipart submissions.
///
/// Multipart file parts are read as text like any other field.
#[derive(Debug, Clone, Default)]
pub struct FormParams(pub Params);

impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("multipart/form-data"));

        if !multipart {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            return Ok(Self(Params(pairs)));
        }

        let mut body = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        let mut pairs = Vec::new();
        while let Some(field) = body
            .next_field()
            .await
            .map_err(|err| AppError::Validation(err.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|err| AppError::Validation(err.body_text()))?;
            pairs.push((name, value));
        }

        Ok(Self(Params(pairs)))
    }
}
