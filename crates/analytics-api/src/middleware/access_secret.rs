//! Shared-secret gate.
//!
//! When a secret is configured, every request except `GET /` must carry it in the configured
//! header (by default `api-data-gov-secret`, set by the upstream API gateway). Without a
//! configured secret the gate lets everything through.

use crate::error::HttpAppError;
use analytics_core::{AppError, Config};
use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

#[derive(Clone, Debug)]
pub struct AccessSecretState {
    pub header_name: HeaderName,
    pub secret: Option<String>,
}

impl AccessSecretState {
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let header_name = HeaderName::from_bytes(config.access_secret_header().as_bytes())
            .map_err(|e| {
                anyhow::anyhow!(
                    "ACCESS_SECRET_HEADER '{}' is not a valid header name: {}",
                    config.access_secret_header(),
                    e
                )
            })?;
        Ok(Self {
            header_name,
            secret: config.access_secret().map(str::to_string),
        })
    }
}

/// Constant-time comparison of the provided and configured secrets.
fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

pub async fn access_secret_middleware(
    State(state): State<Arc<AccessSecretState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(secret) = state.secret.as_deref() else {
        return next.run(request).await;
    };

    if request.uri().path() == "/" {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(&state.header_name)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(provided) if secure_compare(provided, secret) => next.run(request).await,
        Some(_) => {
            HttpAppError(AppError::Unauthorized("access secret mismatch".to_string()))
                .into_response()
        }
        None => HttpAppError(AppError::Unauthorized(format!(
            "missing {} header",
            state.header_name
        )))
        .into_response(),
    }
}
