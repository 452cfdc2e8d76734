mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{json, Value};

use common::MockBackend;
use mms_web::client::{ApiClient, ApiFailure, Reply};
use mms_web::config::{ApiConfig, SessionConfig};
use mms_web::outcome::Outcome;
use mms_web::services::{AuthService, TeamService};
use mms_web::session::SessionStore;
use mms_web::types::UserTeamItem;

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
        enable_request_logging: true,
    })
    .expect("client")
}

fn session_with_token(token: &str) -> SessionStore {
    let jar = CookieJar::new().add(Cookie::new("token", format!("\"{}\"", token)));
    SessionStore::new(jar, SessionConfig::default())
}

fn data<T>(outcome: Outcome<Reply<T>>) -> Result<T> {
    match outcome {
        Outcome::Continue(reply) => Ok(reply?),
        Outcome::Redirect(path) => anyhow::bail!("unexpected redirect to {}", path),
    }
}

fn anonymous() -> SessionStore {
    SessionStore::new(CookieJar::new(), SessionConfig::default())
}

#[tokio::test]
async fn ok_envelope_returns_data_and_sends_headers() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::GET,
        "/auth/teams",
        common::ok(json!([common::team("t1", "acme", "Owner")])),
    );

    let session = session_with_token("tok");
    let outcome = client(&backend.base_url)
        .get::<Vec<UserTeamItem>>("/auth/teams", &session)
        .await;

    let teams = match outcome {
        Outcome::Continue(Ok(teams)) => teams,
        other => panic!("expected data, got {:?}", other),
    };
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].team_namespace, "acme");

    let calls = backend.calls_to("/auth/teams");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer tok"));
    assert_eq!(calls[0].cache_control.as_deref(), Some("no-store"));
    assert_eq!(calls[0].content_type.as_deref(), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn anonymous_calls_carry_no_authorization() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(Method::POST, "/auth/login", common::ok(common::auth_response("tok")));

    let body = json!({ "email": "alice@acme.io", "password": "secret1" });
    let outcome = client(&backend.base_url)
        .post::<Value, _>("/auth/login", &body, &anonymous())
        .await;
    assert!(matches!(outcome, Outcome::Continue(Ok(_))));

    let calls = backend.calls_to("/auth/login");
    assert_eq!(calls[0].authorization, None);
    assert_eq!(calls[0].body, Some(body));
    Ok(())
}

#[tokio::test]
async fn unauthorized_code_redirects_to_login() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(Method::GET, "/auth/info", common::fail(401, "Token expired"));

    let outcome = client(&backend.base_url)
        .get::<Value>("/auth/info", &session_with_token("stale"))
        .await;

    assert_eq!(outcome, Outcome::Redirect("/auth/login".to_string()));
    Ok(())
}

#[tokio::test]
async fn application_error_is_returned_as_failure() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/team/create",
        common::fail(400, "Team namespace already exists"),
    );

    let outcome = client(&backend.base_url)
        .post::<Value, _>("/team/create", &json!({ "teamName": "Acme" }), &session_with_token("tok"))
        .await;

    assert_eq!(
        outcome,
        Outcome::Continue(Err(ApiFailure::new(400, "Team namespace already exists")))
    );
    Ok(())
}

#[tokio::test]
async fn non_200_http_status_is_a_server_error() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on_status(
        Method::GET,
        "/auth/info",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "oops": true }),
    );

    let outcome = client(&backend.base_url)
        .get::<Value>("/auth/info", &session_with_token("tok"))
        .await;

    assert_eq!(outcome, Outcome::Continue(Err(ApiFailure::server_error())));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_server_error() -> Result<()> {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let outcome = client(&format!("http://{}/api/v1", addr))
        .get::<Value>("/auth/info", &anonymous())
        .await;

    assert_eq!(outcome, Outcome::Continue(Err(ApiFailure::server_error())));
    Ok(())
}

#[tokio::test]
async fn check_sends_value_in_query_string() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(Method::GET, "/auth/check", common::ok(json!(true)));

    let api = client(&backend.base_url);
    let session = anonymous();
    let outcome = AuthService::new(&api, &session)
        .check_email_exists("alice@acme.io")
        .await;

    assert_eq!(outcome, Outcome::Continue(Ok(true)));
    let calls = backend.calls_to("/auth/check");
    assert_eq!(calls[0].method, Method::GET);
    assert_eq!(calls[0].query.as_deref(), Some("email=alice%40acme.io"));
    Ok(())
}

#[tokio::test]
async fn team_service_hits_documented_endpoints() -> Result<()> {
    let backend = MockBackend::start().await?;
    let team_item = json!({
        "teamId": "t1",
        "teamUniqueId": "u-1",
        "teamName": "Acme",
        "teamNamespace": "acme"
    });
    backend
        .on(Method::GET, "/team/list", common::ok(json!([team_item.clone()])))
        .on(Method::GET, "/team/detail/t1", common::ok(team_item))
        .on(Method::GET, "/team/users/t1", common::ok(json!([])))
        .on(Method::POST, "/team/delete/t1", common::ok(json!(null)));

    let api = client(&backend.base_url);
    let session = session_with_token("tok");
    let teams = TeamService::new(&api, &session);

    let list = data(teams.team_list().await)?;
    assert_eq!(list[0].team_namespace, "acme");
    let detail = data(teams.team_detail("t1").await)?;
    assert_eq!(detail.team_name, "Acme");
    assert!(data(teams.team_users("t1").await)?.is_empty());
    assert!(matches!(teams.delete_team("t1").await, Outcome::Continue(Ok(_))));

    let delete = &backend.calls_to("/team/delete/t1")[0];
    assert_eq!(delete.method, Method::POST);
    assert_eq!(delete.body, None);
    Ok(())
}
