// src/core/fetch.rs

//! Explicit fetch state for every piece of remote data a view displays.
//!
//! A view never juggles separate `loading`/`error`/`data` flags: it owns a
//! [`Loadable`] which moves through `Idle -> Loading -> Success | Failure`
//! and ignores answers that belong to an older request.

use tracing::debug;

/// The lifecycle of one remote read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> FetchState<T> {
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Monotonic marker of "which request is current". Bumping it is the only way
/// to ask a view for fresh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn bump(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A [`FetchState`] paired with the token of the request it is waiting for.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    state: FetchState<T>,
    token: RefreshToken,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self { state: FetchState::Idle, token: RefreshToken::default() }
    }
}

impl<T> Loadable<T> {
    /// Data handed over by another view; no request needed.
    pub fn loaded(data: T) -> Self {
        Self { state: FetchState::Success(data), token: RefreshToken::default() }
    }

    /// Starts a new request and returns the token its response must carry.
    pub fn begin(&mut self) -> RefreshToken {
        self.state = FetchState::Loading;
        self.token.bump()
    }

    /// Applies a response. Returns `false` when the response was stale and
    /// therefore dropped.
    pub fn resolve(&mut self, token: RefreshToken, result: Result<T, String>) -> bool {
        if token != self.token {
            debug!(expected = self.token.value(), received = token.value(), "Dropping stale response.");
            return false;
        }
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(message) => FetchState::Failure(message),
        };
        true
    }

    /// Back to `Idle`; any in-flight answer becomes stale.
    pub fn reset(&mut self) {
        self.token.bump();
        self.state = FetchState::Idle;
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    #[cfg(test)]
    pub fn token(&self) -> RefreshToken {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_moves_to_loading_and_bumps_token() {
        let mut loadable: Loadable<u64> = Loadable::default();
        let before = loadable.token();

        let token = loadable.begin();

        assert!(token > before);
        assert!(loadable.state().is_loading());
    }

    #[test]
    fn resolve_applies_current_response() {
        let mut loadable = Loadable::default();
        let token = loadable.begin();

        assert!(loadable.resolve(token, Ok(7_u64)));
        assert_eq!(loadable.state().data(), Some(&7));

        let token = loadable.begin();
        assert!(loadable.resolve(token, Err("boom".to_string())));
        assert_eq!(loadable.state().error(), Some("boom"));
    }

    #[test]
    fn stale_responses_are_ignored() {
        let mut loadable = Loadable::default();
        let first = loadable.begin();
        let second = loadable.begin();

        assert!(!loadable.resolve(first, Ok(1_u64)));
        assert!(loadable.state().is_loading());

        assert!(loadable.resolve(second, Ok(2)));
        assert_eq!(loadable.state(), &FetchState::Success(2));
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut loadable = Loadable::default();
        let token = loadable.begin();
        loadable.reset();

        assert!(!loadable.resolve(token, Ok(3_u64)));
        assert_eq!(loadable.state(), &FetchState::Idle);
    }
}
