//! Typed request functions over the backend REST API.
//!
//! Each service borrows the request's client and session for the duration of
//! a call and returns the client's [`Outcome`](crate::outcome::Outcome)
//! unchanged, so callers decide how to navigate.

pub mod auth;
pub mod team;

pub use auth::{AuthService, CheckKey};
pub use team::TeamService;

/// Encodes a value for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_escapes_separators() {
        assert_eq!(segment("acme"), "acme");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }
}
