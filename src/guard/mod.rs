//! Route guard run before every navigable request.
//!
//! 1. Protected route without a token goes to the sign-out route.
//! 2. Public route with a token goes to the sign-in route.
//! 3. The root with a token resolves the user's default team and enters it.
//! 4. Anything else passes through.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::context::RequestContext;
use crate::outcome::Outcome;
use crate::routes;
use crate::session::SessionStore;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Public,
    Protected,
    Root,
    Other,
}

pub fn classify(path: &str) -> RouteKind {
    if routes::PUBLIC_ROUTES.contains(&path) {
        RouteKind::Public
    } else if routes::PROTECTED_ROUTES.contains(&path) {
        RouteKind::Protected
    } else if path == routes::DASHBOARD {
        RouteKind::Root
    } else {
        RouteKind::Other
    }
}

/// Paths the guard never sees: backend proxies, static assets and images.
pub fn is_guarded(path: &str) -> bool {
    const SKIPPED_PREFIXES: [&str; 4] = ["/api/", "/static/", "/_next/static/", "/_next/image"];

    if path == "/api" || path == "/favicon.ico" || path.ends_with(".png") {
        return false;
    }
    !SKIPPED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Decides where the request for `path` should go. May store the selected
/// team in the session when resolving the root.
pub fn guard(ctx: &mut RequestContext, path: &str) -> Outcome {
    let has_token = ctx.session.has_token();

    match classify(path) {
        RouteKind::Protected if !has_token => {
            tracing::debug!("Guard: {} requires a session", path);
            Outcome::redirect(routes::SIGN_OUT_ROUTE)
        }
        RouteKind::Public if has_token && path != routes::SIGN_IN_ROUTE => {
            tracing::debug!("Guard: {} is for signed-out users", path);
            Outcome::redirect(routes::SIGN_IN_ROUTE)
        }
        RouteKind::Root if has_token => enter_default_team(&mut ctx.session),
        _ => Outcome::proceed(),
    }
}

/// Picks the user's default team from the cached user info and team list.
fn enter_default_team(session: &mut SessionStore) -> Outcome {
    let default_team_id = session.user_info().and_then(|info| info.default_team_id);
    let teams = session.user_teams().unwrap_or_default();

    let Some(default_team_id) = default_team_id.filter(|_| !teams.is_empty()) else {
        tracing::debug!("Guard: no default team to enter");
        return Outcome::redirect(routes::TEAM);
    };

    let Some(team) = teams.iter().find(|team| team.team_id == default_team_id) else {
        tracing::debug!("Guard: default team {} is not among the user's teams", default_team_id);
        return Outcome::redirect(routes::TEAM);
    };

    if let Err(e) = session.set_selected_team(team) {
        tracing::error!("Failed to store selected team: {}", e);
        return Outcome::redirect(routes::TEAM);
    }

    tracing::debug!("Guard: entering team {}", team.team_namespace);
    Outcome::redirect(routes::team_path(&team.team_namespace, routes::DASHBOARD))
}

/// Middleware form of [`guard`]. Redirects carry the updated cookie jar;
/// passing requests reach the handler untouched.
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_guarded(&path) {
        return next.run(request).await;
    }

    let mut ctx = RequestContext::for_request(request.headers(), &path, &state);
    match guard(&mut ctx, &path) {
        Outcome::Continue(()) => next.run(request).await,
        redirect => ctx.respond(redirect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::types::{Role, Status, UserInfo, UserTeamItem};
    use axum::http::HeaderMap;

    fn signed_in(default_team_id: Option<&str>, teams: &[UserTeamItem]) -> RequestContext {
        let mut ctx = anonymous();
        let now = chrono::Utc::now();
        ctx.session
            .set_token(
                &crate::types::AuthResponse {
                    expire: 3_600_000,
                    token: "tok".to_string(),
                    refresh: None,
                },
                now,
            )
            .unwrap();
        ctx.session
            .set_user_info(&UserInfo {
                user_id: "u1".to_string(),
                unique_id: "x".to_string(),
                email: "alice@acme.io".to_string(),
                username: "alice".to_string(),
                display_name: None,
                avatar: None,
                default_team_id: default_team_id.map(str::to_string),
                status: Status::Active,
                created_at: None,
                updated_at: None,
            })
            .unwrap();
        ctx.session.set_user_teams(teams).unwrap();
        ctx
    }

    fn anonymous() -> RequestContext {
        let state = AppState::new(AppConfig::development()).unwrap();
        RequestContext::for_request(&HeaderMap::new(), "/", &state)
    }

    fn team(id: &str, namespace: &str) -> UserTeamItem {
        UserTeamItem {
            team_id: id.to_string(),
            team_name: namespace.to_string(),
            team_avatar: String::new(),
            team_unique_id: String::new(),
            team_namespace: namespace.to_string(),
            description: String::new(),
            role: Role::Owner,
            joined_at: String::new(),
        }
    }

    #[test]
    fn classification() {
        assert_eq!(classify("/auth/login"), RouteKind::Public);
        assert_eq!(classify("/auth/forget"), RouteKind::Public);
        assert_eq!(classify("/team"), RouteKind::Protected);
        assert_eq!(classify("/"), RouteKind::Root);
        assert_eq!(classify("/acme/setting"), RouteKind::Other);
        assert_eq!(classify("/auth/login/extra"), RouteKind::Other);
    }

    #[test]
    fn matcher_skips_assets_and_api() {
        assert!(is_guarded("/"));
        assert!(is_guarded("/team"));
        assert!(is_guarded("/apiary"));
        assert!(!is_guarded("/api/v1/auth"));
        assert!(!is_guarded("/_next/static/chunk.js"));
        assert!(!is_guarded("/_next/image?url=x"));
        assert!(!is_guarded("/logo.png"));
        assert!(!is_guarded("/favicon.ico"));
    }

    #[test]
    fn protected_without_token_goes_to_login() {
        let mut ctx = anonymous();
        assert_eq!(guard(&mut ctx, "/team"), Outcome::Redirect("/auth/login".to_string()));
    }

    #[test]
    fn public_with_token_goes_to_app() {
        let mut ctx = signed_in(None, &[]);
        assert_eq!(guard(&mut ctx, "/auth/login"), Outcome::Redirect("/".to_string()));
        assert_eq!(guard(&mut ctx, "/auth/register"), Outcome::Redirect("/".to_string()));
    }

    #[test]
    fn public_without_token_passes() {
        let mut ctx = anonymous();
        assert_eq!(guard(&mut ctx, "/auth/login"), Outcome::proceed());
        assert_eq!(guard(&mut ctx, "/"), Outcome::proceed());
    }

    #[test]
    fn root_enters_default_team() {
        let mut ctx = signed_in(Some("t1"), &[team("t0", "zero"), team("t1", "acme")]);
        assert_eq!(guard(&mut ctx, "/"), Outcome::Redirect("/acme".to_string()));
        assert_eq!(ctx.session.selected_team().map(|t| t.team_id), Some("t1".to_string()));
    }

    #[test]
    fn root_with_empty_team_list_goes_to_team_creation() {
        let mut ctx = signed_in(Some("t1"), &[]);
        assert_eq!(guard(&mut ctx, "/"), Outcome::Redirect("/team".to_string()));
    }

    #[test]
    fn root_without_default_team_goes_to_team_creation() {
        let mut ctx = signed_in(None, &[team("t1", "acme")]);
        assert_eq!(guard(&mut ctx, "/"), Outcome::Redirect("/team".to_string()));
    }

    #[test]
    fn root_with_unknown_default_team_goes_to_team_creation() {
        let mut ctx = signed_in(Some("gone"), &[team("t1", "acme")]);
        assert_eq!(guard(&mut ctx, "/"), Outcome::Redirect("/team".to_string()));
        assert!(ctx.session.selected_team().is_none());
    }

    #[test]
    fn protected_with_token_passes() {
        let mut ctx = signed_in(None, &[]);
        assert_eq!(guard(&mut ctx, "/team"), Outcome::proceed());
    }
}
