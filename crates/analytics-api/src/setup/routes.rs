//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::middleware::{access_secret_middleware, request_id_middleware, AccessSecretState};
use crate::state::AppState;
use analytics_core::Config;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
///
/// Layer order, outermost first: request ID, tracing, CORS, access-secret gate.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let access_state = Arc::new(AccessSecretState::from_config(config)?);

    if access_state.secret.is_none() {
        tracing::warn!("No access secret configured - the access gate is disabled");
    }

    let app = Router::new()
        .route("/", get(handlers::root::current_time))
        .route(
            "/{version}/reports/{report_name}/data",
            get(handlers::reports::get_report_data),
        )
        .route(
            "/{version}/agencies/{report_agency}/reports/{report_name}/data",
            get(handlers::reports::get_agency_report_data),
        )
        .route(
            "/{version}/domain/{domain}/reports/{report_name}/data",
            get(handlers::reports::get_domain_report_data),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(axum::middleware::from_fn_with_state(
            access_state,
            access_secret_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
