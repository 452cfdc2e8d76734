//! Server actions: ordered pipelines run on behalf of a form post.
//!
//! Each action works on the request's [`RequestContext`](crate::context::RequestContext).
//! Application errors come back as `Err(ApiFailure)`; a redirect anywhere in
//! the pipeline ends it and is returned as `Ok(Outcome::Redirect(..))`.

pub mod auth;
pub mod team;

use crate::client::ApiFailure;
use crate::outcome::Outcome;

pub type ActionResult<T = ()> = Result<Outcome<T>, ApiFailure>;

pub use auth::{refresh_token, refresh_user_info, refresh_user_teams, sign_in, sign_out, sign_up, update_user_info};
pub use team::{create_first_team, join_team, leave_team, refresh_team_info, update_team};
