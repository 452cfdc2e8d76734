// handlers/protected/team.rs - Team selection, creation and membership
//
// GET  /                          - signed-out fallback for the app root
// GET  /team                      - create-first-team or select-team view
// POST /actions/switch-team       - select one of the user's teams
// POST /actions/create-first-team - create a team and enter it
// POST /actions/join-team         - add a user to a team
// POST /actions/leave-team        - remove a user from a team
// POST /actions/update-team/:id   - change a team's profile

use axum::{
    extract::{rejection::JsonRejection, Path},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::actions::{self, ActionResult};
use crate::context::RequestContext;
use crate::error::AppError;
use crate::handlers::{action_response, respond_with};
use crate::outcome::Outcome;
use crate::proceed;
use crate::response::PageResponse;
use crate::routes;
use crate::services::TeamService;
use crate::types::{UserInfo, UserTeamItem};
use crate::validation::{CreateTeamForm, FieldErrors, JoinTeamForm, LeaveTeamForm, UpdateTeamForm};

/// The guard resolves `/` for signed-in users; whoever reaches this handler
/// has no usable session.
pub async fn root(ctx: RequestContext) -> Response {
    let target = if ctx.session.has_token() {
        routes::TEAM
    } else {
        routes::SIGN_OUT_ROUTE
    };
    ctx.respond::<()>(Outcome::redirect(target))
}

#[derive(Debug, Serialize)]
pub struct TeamView {
    pub user: UserInfo,
    pub teams: Vec<UserTeamItem>,
}

pub async fn team_page(mut ctx: RequestContext) -> Response {
    let result = team_view(&mut ctx).await;
    respond_with(ctx, result)
}

async fn team_view(ctx: &mut RequestContext) -> ActionResult<PageResponse<TeamView>> {
    if ctx.session.user_info().is_none() {
        proceed!(actions::refresh_user_info(ctx).await?);
    }
    if ctx.session.user_teams().is_none() {
        proceed!(actions::refresh_user_teams(ctx).await?);
    }

    let Some(user) = ctx.session.user_info() else {
        return Ok(Outcome::redirect(routes::SIGN_OUT_ROUTE));
    };
    let teams = ctx.session.user_teams().unwrap_or_default();

    if teams.is_empty() {
        return Ok(Outcome::Continue(PageResponse::view("team/create-first", TeamView { user, teams })));
    }

    // A default team the user no longer belongs to would bounce between the
    // root and this page, so it is treated like no default at all.
    let has_default = user
        .default_team_id
        .as_deref()
        .map_or(false, |id| teams.iter().any(|team| team.team_id == id));
    if !has_default {
        return Ok(Outcome::Continue(PageResponse::view("team/select", TeamView { user, teams })));
    }

    Ok(Outcome::redirect(routes::SIGN_IN_ROUTE))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchTeamForm {
    pub team_id: String,
}

pub async fn switch_team(
    mut ctx: RequestContext,
    payload: Result<Json<SwitchTeamForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    let result = switch_to(&mut ctx, &form.team_id).await;
    Ok(action_response(ctx, result))
}

async fn switch_to(ctx: &mut RequestContext, team_id: &str) -> ActionResult {
    if ctx.session.user_teams().is_none() {
        proceed!(actions::refresh_user_teams(ctx).await?);
    }
    actions::refresh_team_info(ctx, Some(team_id)).await
}

pub async fn create_first_team(
    mut ctx: RequestContext,
    payload: Result<Json<CreateTeamForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate()?;

    let taken = TeamService::new(&ctx.client, &ctx.session)
        .check_namespace(&form.team_namespace)
        .await;
    match taken {
        Outcome::Redirect(path) => return Ok(ctx.respond::<()>(Outcome::Redirect(path))),
        Outcome::Continue(Ok(true)) => {
            let mut errors = FieldErrors::new();
            errors.add("teamNamespace", "This namespace is already taken.");
            errors.into_result()?;
        }
        // An unanswered check is left to the backend's own create validation
        Outcome::Continue(_) => {}
    }

    let result = actions::create_first_team(&mut ctx, &form).await;
    Ok(action_response(ctx, result))
}

pub async fn join_team(
    mut ctx: RequestContext,
    payload: Result<Json<JoinTeamForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate()?;

    let result = actions::join_team(&mut ctx, &form).await;
    Ok(action_response(ctx, result))
}

pub async fn leave_team(
    mut ctx: RequestContext,
    payload: Result<Json<LeaveTeamForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate()?;

    let result = actions::leave_team(&mut ctx, &form).await;
    Ok(action_response(ctx, result))
}

pub async fn update_team(
    mut ctx: RequestContext,
    Path(team_id): Path<String>,
    payload: Result<Json<UpdateTeamForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate()?;

    let result = actions::update_team(&mut ctx, &team_id, &form).await;
    Ok(action_response(ctx, result))
}
