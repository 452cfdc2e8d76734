// handlers/protected/account.rs - Account actions
//
// POST /actions/sign-out      - always ends on the sign-in page
// POST /actions/refresh-token - renew the token pair before it expires
// POST /actions/update-info   - update profile fields, then re-cache user info

use axum::{extract::rejection::JsonRejection, response::Response, Json};

use crate::actions;
use crate::context::RequestContext;
use crate::error::AppError;
use crate::handlers::action_response;
use crate::types::UpdateUserInfoPayload;
use crate::validation::auth::{is_valid_email, USERNAME_MAX_CHARS};
use crate::validation::FieldErrors;

pub async fn sign_out(mut ctx: RequestContext) -> Response {
    let result = actions::sign_out(&mut ctx).await;
    action_response(ctx, result)
}

pub async fn refresh_token(mut ctx: RequestContext) -> Response {
    let result = actions::refresh_token(&mut ctx).await;
    action_response(ctx, result)
}

pub async fn update_info(
    mut ctx: RequestContext,
    payload: Result<Json<UpdateUserInfoPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;

    let mut errors = FieldErrors::new();
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            errors.add("email", "Please enter a valid email address");
        }
    }
    if let Some(username) = &payload.username {
        let len = username.chars().count();
        if len == 0 || len > USERNAME_MAX_CHARS {
            errors.add("username", "Username must be 1 to 12 characters");
        }
    }
    errors.into_result()?;

    let result = actions::update_user_info(&mut ctx, &payload).await;
    Ok(action_response(ctx, result))
}
