use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldErrors, ValidationError};
use crate::types::Role;

static NAMESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("namespace pattern compiles"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamForm {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTeamForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if self.team_name.trim().is_empty() {
            errors.add("teamName", "Team name is required.");
        }
        check_namespace(&self.team_namespace, &mut errors);
        errors.into_result()
    }
}

/// Partial team update; only the fields present are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateTeamForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if matches!(&self.team_name, Some(name) if name.trim().is_empty()) {
            errors.add("teamName", "Team name is required.");
        }
        if let Some(namespace) = &self.team_namespace {
            check_namespace(namespace, &mut errors);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamForm {
    pub team_id: String,
    pub user_id: String,
    pub role: Role,
}

impl JoinTeamForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        check_ids(&self.team_id, &self.user_id, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTeamForm {
    pub team_id: String,
    pub user_id: String,
}

impl LeaveTeamForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        check_ids(&self.team_id, &self.user_id, &mut errors);
        errors.into_result()
    }
}

pub fn is_valid_namespace(namespace: &str) -> bool {
    NAMESPACE_REGEX.is_match(namespace)
}

fn check_namespace(namespace: &str, errors: &mut FieldErrors) {
    if namespace.is_empty() {
        errors.add("teamNamespace", "Namespace is required.");
    } else if !is_valid_namespace(namespace) {
        errors.add("teamNamespace", "Only alphanumeric characters are allowed.");
    }
}

fn check_ids(team_id: &str, user_id: &str, errors: &mut FieldErrors) {
    if Uuid::parse_str(team_id).is_err() {
        errors.add("teamId", "Invalid team ID.");
    }
    if Uuid::parse_str(user_id).is_err() {
        errors.add("userId", "Invalid user ID.");
    }
}
