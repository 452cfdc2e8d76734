use super::{refresh_user_teams, ActionResult};
use crate::context::RequestContext;
use crate::outcome::Outcome;
use crate::proceed;
use crate::routes;
use crate::services::TeamService;
use crate::session::SELECTED_TEAM_SESSION_KEY;
use crate::validation::{CreateTeamForm, JoinTeamForm, LeaveTeamForm, UpdateTeamForm};

/// Selects a team from the cached team list and navigates into it. Without a
/// `team_id` the first team is used; an empty list or an unknown id sends the
/// user to team selection.
pub async fn refresh_team_info(ctx: &mut RequestContext, team_id: Option<&str>) -> ActionResult {
    let teams = ctx.session.user_teams().unwrap_or_default();
    if teams.is_empty() {
        return Ok(Outcome::redirect(routes::TEAM));
    }

    let selected = match team_id {
        Some(id) => teams.iter().find(|team| team.team_id == id),
        None => teams.first(),
    };
    let Some(team) = selected else {
        tracing::warn!("Team {:?} is not among the user's teams", team_id);
        return Ok(Outcome::redirect(routes::TEAM));
    };

    ctx.session.set_selected_team(team)?;
    Ok(Outcome::redirect(routes::team_path(&team.team_namespace, routes::DASHBOARD)))
}

pub async fn create_first_team(ctx: &mut RequestContext, form: &CreateTeamForm) -> ActionResult {
    proceed!(TeamService::new(&ctx.client, &ctx.session).create_team(form).await)?;
    tracing::info!("Created team {}", form.team_namespace);

    proceed!(refresh_user_teams(ctx).await?);
    refresh_team_info(ctx, None).await
}

pub async fn join_team(ctx: &mut RequestContext, form: &JoinTeamForm) -> ActionResult {
    proceed!(TeamService::new(&ctx.client, &ctx.session).join_team(form).await)?;
    tracing::info!("User {} joined team {} as {:?}", form.user_id, form.team_id, form.role);
    refresh_user_teams(ctx).await
}

/// Leaving the selected team moves the user on to their next team, or to
/// team selection when none is left.
pub async fn leave_team(ctx: &mut RequestContext, form: &LeaveTeamForm) -> ActionResult {
    proceed!(TeamService::new(&ctx.client, &ctx.session).leave_team(form).await)?;
    tracing::info!("User {} left team {}", form.user_id, form.team_id);
    proceed!(refresh_user_teams(ctx).await?);

    if is_selected(ctx, &form.team_id) {
        ctx.session.remove(SELECTED_TEAM_SESSION_KEY)?;
        return refresh_team_info(ctx, None).await;
    }
    Ok(Outcome::proceed())
}

/// Updating the selected team re-enters it, so a new namespace takes effect
/// right away.
pub async fn update_team(
    ctx: &mut RequestContext,
    team_id: &str,
    form: &UpdateTeamForm,
) -> ActionResult {
    proceed!(TeamService::new(&ctx.client, &ctx.session).update_team(team_id, form).await)?;
    proceed!(refresh_user_teams(ctx).await?);

    if is_selected(ctx, team_id) {
        return refresh_team_info(ctx, Some(team_id)).await;
    }
    Ok(Outcome::proceed())
}

fn is_selected(ctx: &RequestContext, team_id: &str) -> bool {
    ctx.session
        .selected_team()
        .map_or(false, |team| team.team_id == team_id)
}
