use serde::Serialize;

/// Result of a navigation-aware step: either keep going with a value, or stop
/// and send the browser somewhere else.
///
/// The guard, the backend client and every server action return this instead
/// of raising a redirect as an error. A `Redirect` is terminal: callers must
/// not perform further work once they see one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub enum Outcome<T = ()> {
    Continue(T),
    Redirect(String),
}

impl<T> Outcome<T> {
    pub fn redirect(path: impl Into<String>) -> Self {
        Outcome::Redirect(path.into())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Continue(value) => Outcome::Continue(f(value)),
            Outcome::Redirect(path) => Outcome::Redirect(path),
        }
    }
}

impl Outcome<()> {
    pub const fn proceed() -> Self {
        Outcome::Continue(())
    }
}

/// Unwraps `Outcome::Continue`, or returns `Ok(Outcome::Redirect(..))` from the
/// enclosing function. Only usable in functions returning
/// `Result<Outcome<_>, _>`.
#[macro_export]
macro_rules! proceed {
    ($outcome:expr) => {
        match $outcome {
            $crate::outcome::Outcome::Continue(value) => value,
            $crate::outcome::Outcome::Redirect(path) => {
                return Ok($crate::outcome::Outcome::Redirect(path));
            }
        }
    };
}
