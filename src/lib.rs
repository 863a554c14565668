//! Client-side response sequencer for a Raft consensus client proxy.
//!
//! A Raft client submits commands and queries against a replicated state
//! machine and, independently, receives a stream of server-pushed *events*
//! correlated with state-machine indices. This crate reorders the two
//! streams so that an application observes them in the exact order the
//! state machine produced them, regardless of the order the transport
//! delivered them in.
//!
//! The [`sequencer::Sequencer`] is the only thing applications need to
//! drive directly; [`session::SessionState`] is the trait it reads/writes
//! its published counters through.

pub mod config;
pub mod error;
pub mod event;
pub mod response;
pub mod sequencer;
pub mod session;

pub use config::Config;
pub use error::SequencerError;
pub use event::Event;
pub use response::Response;
pub use response::ResponseStatus;
pub use sequencer::Completion;
pub use sequencer::Sequencer;
pub use session::SessionState;
pub use session::SharedSessionState;

/// A monotonically increasing per-session request sequence number.
pub type RequestSequence = u64;

/// A monotonically increasing server-side event index.
pub type EventIndex = u64;

/// A state-machine log index (0 for reads that did not advance the state machine).
pub type LogIndex = u64;

/// The identifier of a client session, as assigned by the cluster.
pub type SessionId = u64;
