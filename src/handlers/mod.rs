// handlers/mod.rs - Browser-facing handlers
//
// Two tiers, both behind the route guard middleware:
// Public (signed-out pages, sign-in/sign-up actions) and
// Protected (team selection, team workspace, account actions).
pub mod health;
pub mod protected;
pub mod public;

use axum::response::{IntoResponse, Response};

use crate::actions::ActionResult;
use crate::client::Envelope;
use crate::context::RequestContext;
use crate::outcome::Outcome;

/// Response for a pipeline: a redirect (303) or the value it produced, with
/// the session's pending cookie writes attached either way.
pub(crate) fn respond_with<R: IntoResponse>(ctx: RequestContext, result: ActionResult<R>) -> Response {
    match result {
        Ok(outcome) => ctx.respond(outcome),
        Err(failure) => ctx.respond(Outcome::Continue(failure)),
    }
}

/// Like [`respond_with`], answering a completed action with the success envelope.
pub(crate) fn action_response(ctx: RequestContext, result: ActionResult) -> Response {
    respond_with(ctx, result.map(|outcome| outcome.map(Envelope::success)))
}
