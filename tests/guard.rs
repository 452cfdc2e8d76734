mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::MockBackend;

#[tokio::test]
async fn team_route_without_session_goes_to_login() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = backend.app().oneshot(common::get("/team", None)).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), Some("/auth/login"));
    assert!(backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_page_with_session_goes_to_app() -> Result<()> {
    let backend = MockBackend::start().await?;
    let cookies = common::signed_in(None, json!([]), None);

    let response = backend
        .app()
        .oneshot(common::get("/auth/login", Some(&cookies)))
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), Some("/"));
    Ok(())
}

#[tokio::test]
async fn root_enters_default_team() -> Result<()> {
    let backend = MockBackend::start().await?;
    let teams = json!([common::team("t0", "zero", "Member"), common::team("t1", "acme", "Owner")]);
    let cookies = common::signed_in(Some("t1"), teams, None);

    let response = backend.app().oneshot(common::get("/", Some(&cookies))).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), Some("/acme"));
    let selected = common::cookie_json(&response, "selected_team").expect("selected team cookie");
    assert_eq!(selected["teamId"], "t1");
    assert_eq!(selected["teamNamespace"], "acme");
    Ok(())
}

#[tokio::test]
async fn root_without_teams_goes_to_team_page() -> Result<()> {
    let backend = MockBackend::start().await?;
    let cookies = common::signed_in(Some("t1"), json!([]), None);

    let response = backend.app().oneshot(common::get("/", Some(&cookies))).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), Some("/team"));
    assert!(common::cookie_json(&response, "selected_team").is_none());
    Ok(())
}

#[tokio::test]
async fn anonymous_root_goes_to_login() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = backend.app().oneshot(common::get("/", None)).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), Some("/auth/login"));
    Ok(())
}

#[tokio::test]
async fn anonymous_login_page_renders() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = backend.app().oneshot(common::get("/auth/login", None)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await?;
    assert_eq!(body["view"], "auth/login");
    assert_eq!(body["data"]["action"], "/actions/sign-in");
    Ok(())
}

#[tokio::test]
async fn health_is_not_redirected() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = backend.app().oneshot(common::get("/health", None)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await?;
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn forget_page_has_no_action() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = backend.app().oneshot(common::get("/auth/forget", None)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await?;
    assert_eq!(body["view"], "auth/forget");
    assert!(body["data"]["action"].is_null());
    Ok(())
}
