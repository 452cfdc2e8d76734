//! Form validation for the auth and team flows.
//!
//! Every rule that fails is recorded; UI code usually shows only the first
//! message per field. Rules that need the backend (does this email exist?)
//! go through [`AccountDirectory`].

pub mod auth;
pub mod team;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

pub use auth::{LoginForm, RegisterForm};
pub use team::{CreateTeamForm, JoinTeamForm, LeaveTeamForm, UpdateTeamForm};

/// Field name to failing-rule messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|messages| messages.first()).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message per field.
    pub fn first_messages(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .filter_map(|(field, messages)| messages.first().map(|m| (field.clone(), m.clone())))
            .collect()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors: self })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationError {
    pub errors: FieldErrors,
}

/// Existence lookups used by the auth forms. `None` means the lookup itself
/// failed and the answer is unknown.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn email_exists(&self, email: &str) -> Option<bool>;
    async fn username_exists(&self, username: &str) -> Option<bool>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashSet;

    /// In-memory directory; `offline` makes every lookup fail.
    #[derive(Default)]
    pub struct FakeDirectory {
        pub emails: HashSet<String>,
        pub usernames: HashSet<String>,
        pub offline: bool,
    }

    impl FakeDirectory {
        pub fn with_account(email: &str, username: &str) -> Self {
            Self {
                emails: [email.to_string()].into_iter().collect(),
                usernames: [username.to_string()].into_iter().collect(),
                offline: false,
            }
        }

        pub fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AccountDirectory for FakeDirectory {
        async fn email_exists(&self, email: &str) -> Option<bool> {
            (!self.offline).then(|| self.emails.contains(email))
        }

        async fn username_exists(&self, username: &str) -> Option<bool> {
            (!self.offline).then(|| self.usernames.contains(username))
        }
    }
}
