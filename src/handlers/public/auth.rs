// handlers/public/auth.rs - POST /actions/sign-in, /actions/sign-up
//
// Both validate the form first (422 with field errors), then run the action.
// On success the browser is sent to the app root with the new session cookies.

use axum::{extract::rejection::JsonRejection, response::Response, Json};

use crate::actions;
use crate::context::RequestContext;
use crate::error::AppError;
use crate::handlers::action_response;
use crate::services::AuthService;
use crate::validation::{LoginForm, RegisterForm};

pub async fn sign_in(
    mut ctx: RequestContext,
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate(&AuthService::new(&ctx.client, &ctx.session)).await?;

    let result = actions::sign_in(&mut ctx, &form).await;
    Ok(action_response(ctx, result))
}

pub async fn sign_up(
    mut ctx: RequestContext,
    payload: Result<Json<RegisterForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    form.validate(&AuthService::new(&ctx.client, &ctx.session)).await?;

    let result = actions::sign_up(&mut ctx, &form).await;
    Ok(action_response(ctx, result))
}
