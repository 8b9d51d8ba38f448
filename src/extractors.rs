use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{rejections::AppError, AppState};

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok())
            .is_some_and(|v| v == "true");
        Ok(IsHtmx(is_htmx))
    }
}

/// Guard extractor that verifies the request's Basic credentials against the
/// shared admin credentials. The `/admin` edge gate uses the same check, so
/// there is a single source of truth for both call sites.
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.admin.matches_headers(&parts.headers) {
            Ok(AdminAuth)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
