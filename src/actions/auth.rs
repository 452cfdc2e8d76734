use chrono::Utc;

use super::ActionResult;
use crate::context::RequestContext;
use crate::outcome::Outcome;
use crate::proceed;
use crate::routes;
use crate::services::AuthService;
use crate::types::{AuthResponse, UpdateUserInfoPayload};
use crate::validation::{LoginForm, RegisterForm};

pub async fn sign_up(ctx: &mut RequestContext, form: &RegisterForm) -> ActionResult {
    let auth = proceed!(AuthService::new(&ctx.client, &ctx.session).register(form).await)?;
    tracing::info!("Registered account {}", form.username);
    establish_session(ctx, &auth).await
}

pub async fn sign_in(ctx: &mut RequestContext, form: &LoginForm) -> ActionResult {
    let auth = proceed!(AuthService::new(&ctx.client, &ctx.session).login(form).await)?;
    establish_session(ctx, &auth).await
}

/// Logs out on the backend when a token is present, then drops every session
/// cookie. Never fails: the browser always ends up on the sign-in page.
pub async fn sign_out(ctx: &mut RequestContext) -> ActionResult {
    if ctx.session.has_token() {
        match AuthService::new(&ctx.client, &ctx.session).logout().await {
            Outcome::Continue(Err(failure)) => {
                tracing::error!("Backend logout failed, clearing session anyway: {}", failure);
            }
            Outcome::Continue(Ok(_)) | Outcome::Redirect(_) => {}
        }
    }

    ctx.session.clear();
    Ok(Outcome::redirect(routes::SIGN_OUT_ROUTE))
}

pub async fn refresh_user_teams(ctx: &mut RequestContext) -> ActionResult {
    let teams = proceed!(AuthService::new(&ctx.client, &ctx.session).teams_by_user().await)?;
    ctx.session.set_user_teams(&teams)?;
    Ok(Outcome::proceed())
}

pub async fn refresh_user_info(ctx: &mut RequestContext) -> ActionResult {
    let info = proceed!(AuthService::new(&ctx.client, &ctx.session).user_info().await)?;
    ctx.session.set_user_info(&info)?;
    Ok(Outcome::proceed())
}

/// Exchanges the current credential for a fresh token pair.
pub async fn refresh_token(ctx: &mut RequestContext) -> ActionResult {
    let auth = proceed!(AuthService::new(&ctx.client, &ctx.session).reset_token().await)?;
    ctx.session.set_token(&auth, Utc::now())?;
    Ok(Outcome::proceed())
}

pub async fn update_user_info(ctx: &mut RequestContext, payload: &UpdateUserInfoPayload) -> ActionResult {
    proceed!(AuthService::new(&ctx.client, &ctx.session).update_user_info(payload).await)?;
    refresh_user_info(ctx).await
}

// Token first: the team and user lookups authenticate with it.
async fn establish_session(ctx: &mut RequestContext, auth: &AuthResponse) -> ActionResult {
    ctx.session.set_token(auth, Utc::now())?;
    proceed!(refresh_user_teams(ctx).await?);
    proceed!(refresh_user_info(ctx).await?);
    Ok(Outcome::redirect(routes::SIGN_IN_ROUTE))
}
