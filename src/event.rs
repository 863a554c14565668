//! Server-pushed event values consumed by the sequencer.

/// A server-pushed, state-machine-correlated notification.
///
/// `previous_index` is the event index the server claims immediately
/// precedes this one; the sequencer uses it to detect causal gaps in the
/// event stream (§4.3, §7). `payload` is opaque to the sequencer.
#[derive(Debug, Clone)]
pub struct Event<E> {
    pub event_index: u64,
    pub previous_index: u64,
    pub payload: E,
}

impl<E> Event<E> {
    pub fn new(event_index: u64, previous_index: u64, payload: E) -> Self {
        Self { event_index, previous_index, payload }
    }
}
