//! Error types surfaced by the sequencer when [`crate::Config::strict`] is enabled.
//!
//! The sequencer itself cannot fail (§7 of the spec this crate implements):
//! it performs no I/O and has no invariant a well-formed caller can violate.
//! The variants below cover the misuse cases the spec leaves undefined at
//! the contract level; by default they are dropped silently and only
//! logged. They exist as real error values so strict callers — and this
//! crate's own debug-assertions — have something precise to report.

use thiserror::Error;

/// Misuse detected while admitting a response or event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequencerError {
    /// The event's `previous_index` is ahead of the locally observed
    /// `event_index`, implying an intermediate event was lost in transit.
    #[error(
        "event at index {event_index} claims previous_index {previous_index}, but the observed event_index is only {observed}"
    )]
    CausalGap { event_index: u64, previous_index: u64, observed: u64 },

    /// The response's `sequence` has already been delivered.
    #[error("response for sequence {sequence} is stale (responseSequence={response_sequence} already delivered)")]
    StaleOrUnknownSequence { sequence: u64, response_sequence: u64 },

    /// The response's `sequence` was never returned by `next_request()`.
    #[error("response for sequence {sequence} was never allocated (requestSequence={request_sequence})")]
    UnallocatedSequence { sequence: u64, request_sequence: u64 },
}
