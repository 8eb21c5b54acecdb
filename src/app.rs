use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::logging::{log_response, request_span};
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

/// Builds the full route table.
pub fn router(state: AppState, security: &SecurityConfig) -> Router {
    let app = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .merge(admin_routes(&state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response),
        )
        .with_state(state);

    if security.enable_cors {
        app.layer(cors_layer(&security.cors_origins))
    } else {
        app
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::health::root))
        .route("/health", get(public::health::health))
        .route("/api/auth/login", post(public::auth::login))
        .route("/api/users", post(public::users::create_user))
        .route("/api/users/:id/articles", get(public::articles::list_user_articles))
        .route("/api/articles", get(public::articles::list_articles))
        .route("/api/articles/:id", get(public::articles::get_article))
        .route("/api/articles/:id/comments", get(public::comments::list_comments))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/profile", get(protected::auth::profile))
        .route("/api/users/:id", get(protected::users::get_user))
        .route(
            "/api/users/:id/credentials",
            get(protected::credentials::get_credentials).put(protected::credentials::update_credentials),
        )
        .route("/api/articles", post(protected::articles::create_article))
        .route(
            "/api/articles/:id",
            put(protected::articles::update_article).delete(protected::articles::delete_article),
        )
        .route("/api/articles/:id/comments", post(protected::comments::create_comment))
        .route(
            "/api/comments/:id",
            put(protected::comments::update_comment).delete(protected::comments::delete_comment),
        )
        .route_layer(from_fn_with_state(state.authenticator.clone(), require_auth))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(elevated::users::list_users))
        .route("/api/admin/roles", get(elevated::roles::list_roles))
        .route("/api/admin/roles/:id", get(elevated::roles::get_role))
        .route("/api/admin/credentials", post(elevated::credentials::create_credentials))
        .route_layer(from_fn_with_state(state.authenticator.clone(), require_admin))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
