// handlers/protected/workspace.rs - GET /{namespace} and /{namespace}/*rest
//
// Layout model for every page inside a team: the signed-in user, the team
// switcher, the role-filtered sidebar, the breadcrumb and, on setting pages,
// the setting tabs. Opening another team's namespace switches to that team.

use std::collections::HashMap;

use axum::{extract::Path, response::Response};
use serde::Serialize;

use crate::actions::ActionResult;
use crate::context::RequestContext;
use crate::handlers::respond_with;
use crate::menu::{self, Crumb, MenuView};
use crate::outcome::Outcome;
use crate::response::PageResponse;
use crate::routes;
use crate::types::{Role, UserTeamItem};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavUser {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub user: NavUser,
    pub current_team: UserTeamItem,
    pub teams: Vec<UserTeamItem>,
    pub sidebar: Vec<MenuView>,
    pub breadcrumb: Vec<Crumb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setting_tabs: Option<Vec<MenuView>>,
}

pub async fn workspace(mut ctx: RequestContext, Path(params): Path<HashMap<String, String>>) -> Response {
    let namespace = params.get("namespace").cloned().unwrap_or_default();
    let result = workspace_view(&mut ctx, &namespace);
    respond_with(ctx, result)
}

fn workspace_view(ctx: &mut RequestContext, namespace: &str) -> ActionResult<PageResponse<WorkspaceView>> {
    let Some(user) = ctx.session.user_info() else {
        return Ok(Outcome::redirect(routes::SIGN_OUT_ROUTE));
    };
    let (Some(selected), Some(teams)) = (ctx.session.selected_team(), ctx.session.user_teams()) else {
        return Ok(Outcome::redirect(routes::TEAM));
    };

    let current = if selected.team_namespace == namespace {
        selected
    } else {
        match teams.iter().find(|team| team.team_namespace == namespace) {
            Some(team) => {
                tracing::debug!("Switching to team {} from its url", team.team_namespace);
                ctx.session.set_selected_team(team)?;
                team.clone()
            }
            None => {
                return Ok(Outcome::redirect(routes::team_path(&selected.team_namespace, routes::DASHBOARD)));
            }
        }
    };

    let path = ctx.current_path().to_string();
    let in_settings = menu::is_setting_path(namespace, &path);
    if in_settings && current.role == Role::Guest {
        return Ok(Outcome::redirect(routes::team_path(namespace, routes::DASHBOARD)));
    }

    let view = WorkspaceView {
        user: NavUser {
            name: user.label().to_string(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        },
        sidebar: menu::sidebar(current.role, namespace, &path),
        breadcrumb: menu::breadcrumb(namespace, &path),
        setting_tabs: in_settings.then(|| menu::setting_tabs(namespace, &path)),
        current_team: current,
        teams,
    };

    Ok(Outcome::Continue(PageResponse::view("workspace", view)))
}
