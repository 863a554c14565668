//! Response values consumed by the sequencer.

/// The outcome of a command or query, as reported by the server.
///
/// The sequencer never inspects `status` or `payload`; it only reads
/// `index` and `event_index` from whichever variant it is handed (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Error(String),
}

/// A tagged response to a previously-submitted command or query.
///
/// `index` is the state-machine log index at which the request was applied
/// (0 for reads that did not advance the state machine; queries carry the
/// last index they observed). `event_index` is the event index the server
/// had produced at the time it generated this response.
#[derive(Debug, Clone)]
pub enum Response<P> {
    Command { index: u64, event_index: u64, status: ResponseStatus, payload: P },
    Query { index: u64, event_index: u64, status: ResponseStatus, payload: P },
}

impl<P> Response<P> {
    /// The state-machine log index carried by either variant.
    pub fn index(&self) -> u64 {
        match self {
            Response::Command { index, .. } => *index,
            Response::Query { index, .. } => *index,
        }
    }

    /// The event index the server had produced when it generated this response.
    pub fn event_index(&self) -> u64 {
        match self {
            Response::Command { event_index, .. } => *event_index,
            Response::Query { event_index, .. } => *event_index,
        }
    }
}
