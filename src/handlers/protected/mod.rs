// handlers/protected/mod.rs - Pages and actions for signed-in users
//
// The guard only enforces a token for the team route; every handler here
// checks the session state it needs and redirects when it is missing.

pub mod account;
pub mod team;
pub mod workspace;

pub use account::{refresh_token, sign_out, update_info};
pub use team::{
    create_first_team, join_team, leave_team, root, switch_team, team_page, update_team,
};
pub use workspace::workspace;
