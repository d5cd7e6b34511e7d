//! Write-gate extractor: reads stay open, mutations need the bearer token.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Extractor that rejects the request unless it carries
/// `Authorization: Bearer <token>` matching the configured API token.
/// Handlers for mutating verbs take it as an argument; read handlers don't.
#[derive(Clone, Copy, Debug)]
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.settings.api_token.as_deref() else {
            return Err(AppError::WritesDisabled);
        };
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::AuthRequired)?;
        let token = header.strip_prefix("Bearer ").ok_or(AppError::AuthRequired)?;
        if token != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(RequireAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use axum::http::Request;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    fn state(token: Option<&str>) -> AppState {
        let settings = Settings {
            database_url: "postgres://localhost/unused".into(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            api_token: token.map(|t| t.to_string()),
            page_size: 10,
        };
        // lazy pool: never connected by these tests
        let pool = PgPoolOptions::new().connect_lazy(&settings.database_url).unwrap();
        AppState {
            pool,
            settings: Arc::new(settings),
        }
    }

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/products/");
        if let Some(v) = auth {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let err = RequireAuth::from_request_parts(&mut parts(None), &state(Some("s3cret")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthRequired));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_401() {
        let err = RequireAuth::from_request_parts(&mut parts(Some("Basic abc")), &state(Some("s3cret")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthRequired));
    }

    #[tokio::test]
    async fn wrong_token_is_401() {
        let err = RequireAuth::from_request_parts(&mut parts(Some("Bearer nope")), &state(Some("s3cret")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn matching_token_passes() {
        assert!(
            RequireAuth::from_request_parts(&mut parts(Some("Bearer s3cret")), &state(Some("s3cret")))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn unset_token_disables_writes() {
        let err = RequireAuth::from_request_parts(&mut parts(Some("Bearer s3cret")), &state(None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::WritesDisabled));
    }
}
