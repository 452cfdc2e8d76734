use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::guard::route_guard;
use crate::handlers::{health, protected, public};
use crate::routes;
use crate::AppState;

/// Full browser-facing router. Every route runs behind the route guard.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state);

    let router = Router::new()
        .route("/health", get(health::health))
        .merge(page_routes())
        .merge(action_routes())
        .merge(workspace_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), route_guard)),
        );

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route(routes::DASHBOARD, get(protected::root))
        .route(routes::LOGIN, get(public::login_page))
        .route(routes::REGISTER, get(public::register_page))
        .route(routes::FORGET, get(public::forget_page))
        .route(routes::TEAM, get(protected::team_page))
}

fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/actions/sign-in", post(public::sign_in))
        .route("/actions/sign-up", post(public::sign_up))
        .route("/actions/sign-out", post(protected::sign_out))
        .route("/actions/switch-team", post(protected::switch_team))
        .route("/actions/create-first-team", post(protected::create_first_team))
        .route("/actions/join-team", post(protected::join_team))
        .route("/actions/leave-team", post(protected::leave_team))
        .route("/actions/update-team/:team_id", post(protected::update_team))
        .route("/actions/refresh-token", post(protected::refresh_token))
        .route("/actions/update-info", post(protected::update_info))
}

// Catch-all team pages; static routes above take precedence
fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/:namespace", get(protected::workspace))
        .route("/:namespace/*rest", get(protected::workspace))
}

fn cors_layer(state: &AppState) -> Option<CorsLayer> {
    let security = &state.config.security;
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();
    Some(CorsLayer::new().allow_origin(origins).allow_credentials(true))
}
