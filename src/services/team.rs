use serde_json::Value;

use super::segment;
use crate::client::{ApiClient, Reply};
use crate::outcome::Outcome;
use crate::session::SessionStore;
use crate::types::{TeamItem, TeamUserItem};
use crate::validation::{CreateTeamForm, JoinTeamForm, LeaveTeamForm, UpdateTeamForm};

/// `/team/*` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TeamService<'a> {
    client: &'a ApiClient,
    session: &'a SessionStore,
}

impl<'a> TeamService<'a> {
    pub fn new(client: &'a ApiClient, session: &'a SessionStore) -> Self {
        Self { client, session }
    }

    pub async fn team_list(&self) -> Outcome<Reply<Vec<TeamItem>>> {
        self.client.get("/team/list", self.session).await
    }

    pub async fn team_detail(&self, team_id: &str) -> Outcome<Reply<TeamItem>> {
        let path = format!("/team/detail/{}", segment(team_id));
        self.client.get(&path, self.session).await
    }

    pub async fn team_users(&self, team_id: &str) -> Outcome<Reply<Vec<TeamUserItem>>> {
        let path = format!("/team/users/{}", segment(team_id));
        self.client.get(&path, self.session).await
    }

    /// True when the namespace is already taken.
    pub async fn check_namespace(&self, namespace: &str) -> Outcome<Reply<bool>> {
        let path = format!("/team/check/namespace/{}", segment(namespace));
        self.client.get(&path, self.session).await
    }

    pub async fn create_team(&self, form: &CreateTeamForm) -> Outcome<Reply<Value>> {
        self.client.post("/team/create", form, self.session).await
    }

    pub async fn leave_team(&self, form: &LeaveTeamForm) -> Outcome<Reply<Value>> {
        self.client.post("/team/left-team", form, self.session).await
    }

    pub async fn join_team(&self, form: &JoinTeamForm) -> Outcome<Reply<Value>> {
        self.client.post("/team/join-team", form, self.session).await
    }

    pub async fn update_team(&self, team_id: &str, form: &UpdateTeamForm) -> Outcome<Reply<Value>> {
        let path = format!("/team/update/{}", segment(team_id));
        self.client.post(&path, form, self.session).await
    }

    pub async fn delete_team(&self, team_id: &str) -> Outcome<Reply<Value>> {
        let path = format!("/team/delete/{}", segment(team_id));
        self.client.post_empty(&path, self.session).await
    }
}
