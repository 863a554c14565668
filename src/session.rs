//! The session-state collaborator.
//!
//! The sequencer does not own session identity or the three published
//! counters outright — it reads its initial cursor values from, and
//! publishes its progress to, a [`SessionState`] implementation. This
//! mirrors the way `async-raft`'s `RaftCore` is generic over a
//! `RaftStorage` implementation: the sequencer is the algorithm, the
//! session state is swappable storage for its externally-visible cursors.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Shared, per-client-session state: an identity and three monotonically
/// non-decreasing counters.
///
/// All setters use monotonic-max semantics: calling a setter with a value
/// lower than the current one is a no-op. Implementations must uphold this;
/// the sequencer relies on it and never re-checks before writing.
pub trait SessionState {
    /// The identifier of the session this state belongs to.
    fn session_id(&self) -> u64;

    /// Highest command request sequence issued so far.
    fn command_request(&self) -> u64;

    /// Highest state-machine index for which a response has been delivered.
    fn response_index(&self) -> u64;

    /// Highest event index delivered to the application.
    fn event_index(&self) -> u64;

    /// Advance `command_request` to `value` if it is greater than the current value.
    fn set_command_request(&self, value: u64);

    /// Advance `response_index` to `value` if it is greater than the current value.
    fn set_response_index(&self, value: u64);

    /// Advance `event_index` to `value` if it is greater than the current value.
    fn set_event_index(&self, value: u64);
}

/// An `Arc`'d, atomics-backed [`SessionState`].
///
/// Useful when the session state must be visible to other collaborators
/// (transport, metrics reporters) running on other threads, even though the
/// sequencer itself is pinned to a single dispatcher thread (§5).
#[derive(Debug)]
pub struct SharedSessionState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    session_id: u64,
    command_request: AtomicU64,
    response_index: AtomicU64,
    event_index: AtomicU64,
}

impl SharedSessionState {
    /// Create a new session state for `session_id` with all counters at 0.
    pub fn new(session_id: u64) -> Self {
        Self::with_initial(session_id, 0, 0, 0)
    }

    /// Create a new session state with explicit initial counter values, e.g.
    /// when resuming a session after a reconnect that reported its last
    /// known cursors.
    pub fn with_initial(session_id: u64, command_request: u64, response_index: u64, event_index: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                session_id,
                command_request: AtomicU64::new(command_request),
                response_index: AtomicU64::new(response_index),
                event_index: AtomicU64::new(event_index),
            }),
        }
    }
}

impl Clone for SharedSessionState {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl SessionState for SharedSessionState {
    fn session_id(&self) -> u64 {
        self.inner.session_id
    }

    fn command_request(&self) -> u64 {
        self.inner.command_request.load(Ordering::Acquire)
    }

    fn response_index(&self) -> u64 {
        self.inner.response_index.load(Ordering::Acquire)
    }

    fn event_index(&self) -> u64 {
        self.inner.event_index.load(Ordering::Acquire)
    }

    fn set_command_request(&self, value: u64) {
        self.inner.command_request.fetch_max(value, Ordering::AcqRel);
    }

    fn set_response_index(&self, value: u64) {
        self.inner.response_index.fetch_max(value, Ordering::AcqRel);
    }

    fn set_event_index(&self, value: u64) {
        self.inner.event_index.fetch_max(value, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn setters_are_monotonic_max() {
        let state = SharedSessionState::new(1);
        state.set_response_index(5);
        assert_eq!(state.response_index(), 5);
        state.set_response_index(3);
        assert_eq!(state.response_index(), 5, "lower value must not regress the counter");
        state.set_response_index(9);
        assert_eq!(state.response_index(), 9);
    }

    #[test]
    fn with_initial_seeds_counters() {
        let state = SharedSessionState::with_initial(7, 10, 4, 2);
        assert_eq!(state.session_id(), 7);
        assert_eq!(state.command_request(), 10);
        assert_eq!(state.response_index(), 4);
        assert_eq!(state.event_index(), 2);
    }

    #[test]
    fn clone_shares_underlying_state() {
        let a = SharedSessionState::new(1);
        let b = a.clone();
        a.set_event_index(42);
        assert_eq!(b.event_index(), 42);
    }
}
