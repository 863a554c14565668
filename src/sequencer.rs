//! The core response/event sequencer.
//!
//! See the crate-level docs for the ordering contract this module
//! implements. In one sentence: the sequencer fires the smallest pending
//! response as soon as no pending event "subsumes" it, and fires pending
//! events at or below the head response's `event_index` first — so an
//! event caused by a command is always observed before that command's own
//! response (§4.2, §4.3 of the spec this module implements).

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::Config;
use crate::error::SequencerError;
use crate::event::Event;
use crate::response::Response;
use crate::session::SessionState;

/// A zero-argument completion callback, invoked at most once, on the
/// sequencer's own dispatcher thread (§6).
///
/// Not `Send`: the sequencer and every closure it holds are pinned to a
/// single dispatcher thread (§5), so closures are free to capture
/// thread-local or `Rc`-based state the way application callbacks
/// typically do.
pub type Completion = Box<dyn FnOnce()>;

struct PendingResponse<P> {
    response: Response<P>,
    complete: Completion,
}

struct PendingEvent<E> {
    event: Event<E>,
    complete: Completion,
}

/// Reorders command/query responses and server-pushed events for a single
/// client session so that completion closures fire in the order the state
/// machine actually produced them.
///
/// Not `Send`, not `Sync`, and not meant to be: every public method and
/// every completion closure must run on the same single-threaded
/// dispatcher (§5). If the surrounding runtime is multi-threaded, pin
/// ownership of the sequencer to one executor (worker-affine task, a
/// `LocalSet`, or similar).
pub struct Sequencer<S, P, E> {
    session: S,
    config: Arc<Config>,

    request_sequence: u64,
    response_sequence: u64,
    event_index: u64,

    responses: HashMap<u64, PendingResponse<P>>,
    events: VecDeque<PendingEvent<E>>,

    /// Reentrancy guard for `drain()` (§5): a completion closure that calls
    /// back into the sequencer synchronously must not recurse into the
    /// drain loop; it enqueues its item and the outer loop picks it up.
    draining: bool,
}

impl<S: SessionState, P, E> Sequencer<S, P, E> {
    /// Construct a sequencer bound to `session`, seeding its cursors from
    /// the session's currently-published counters (§3 lifecycle).
    pub fn new(session: S, config: Arc<Config>) -> Self {
        let request_sequence = session.command_request();
        let response_sequence = request_sequence;
        let event_index = session.event_index();
        let initial_capacity = config.initial_capacity;
        Self {
            session,
            config,
            request_sequence,
            response_sequence,
            event_index,
            responses: HashMap::with_capacity(initial_capacity),
            events: VecDeque::with_capacity(initial_capacity),
            draining: false,
        }
    }

    /// The session this sequencer is bound to.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// `(|responses|, |events|)` currently held. Not part of the ordering
    /// contract; useful for logging and tests.
    pub fn pending_counts(&self) -> (usize, usize) {
        (self.responses.len(), self.events.len())
    }

    /// Allocate and return the next request sequence, advancing the
    /// session's `command_request` counter as a side effect. Never fails.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn next_request(&mut self) -> u64 {
        self.request_sequence += 1;
        self.session.set_command_request(self.request_sequence);
        tracing::trace!(sequence = self.request_sequence, "allocated request sequence");
        self.request_sequence
    }

    /// Admit a response for a previously allocated `sequence`. Never fails
    /// unless [`Config::strict`] is set, in which case misuse that would
    /// otherwise be dropped silently is surfaced as a [`SequencerError`].
    #[tracing::instrument(level = "trace", skip(self, response, complete))]
    pub fn sequence_response(
        &mut self,
        sequence: u64,
        response: Response<P>,
        complete: Completion,
    ) -> Result<(), SequencerError> {
        if sequence <= self.response_sequence {
            tracing::warn!(sequence, response_sequence = self.response_sequence, "dropping stale/already-delivered response");
            return if self.config.strict {
                Err(SequencerError::StaleOrUnknownSequence { sequence, response_sequence: self.response_sequence })
            } else {
                Ok(())
            };
        }

        if sequence > self.request_sequence {
            // Under `Config::strict` the caller has opted into a structured
            // `Err` for this exact misuse instead of a panic, so only assert
            // when there is no other way for the caller to learn about it.
            debug_assert!(
                self.config.strict,
                "response for sequence {} was never allocated (requestSequence={})",
                sequence, self.request_sequence
            );
            tracing::warn!(sequence, request_sequence = self.request_sequence, "dropping response for unallocated sequence");
            return if self.config.strict {
                Err(SequencerError::UnallocatedSequence { sequence, request_sequence: self.request_sequence })
            } else {
                Ok(())
            };
        }

        debug_assert!(!self.responses.contains_key(&sequence), "duplicate response admitted for sequence {}", sequence);
        self.responses.insert(sequence, PendingResponse { response, complete });
        self.drain();
        Ok(())
    }

    /// Admit a server-pushed event. Never fails unless [`Config::strict`]
    /// is set, in which case a causal gap is surfaced as a
    /// [`SequencerError::CausalGap`] in addition to being dropped.
    #[tracing::instrument(level = "trace", skip(self, event, complete))]
    pub fn sequence_event(&mut self, event: Event<E>, complete: Completion) -> Result<(), SequencerError> {
        if event.previous_index > self.event_index {
            tracing::warn!(
                event_index = event.event_index,
                previous_index = event.previous_index,
                observed = self.event_index,
                "dropping event with causal gap, awaiting server retransmission"
            );
            return if self.config.strict {
                Err(SequencerError::CausalGap {
                    event_index: event.event_index,
                    previous_index: event.previous_index,
                    observed: self.event_index,
                })
            } else {
                Ok(())
            };
        }

        self.events.push_back(PendingEvent { event, complete });
        self.drain();
        Ok(())
    }

    /// Fire as many pending completions as the ordering contract allows.
    ///
    /// Ties (`headEvent.event_index == headResponse.event_index`) resolve
    /// in the event's favor: the event caused by a command is observed
    /// before that command's own response.
    fn drain(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;

        loop {
            let head_sequence = self.response_sequence + 1;
            let head_response_event_index = self.responses.get(&head_sequence).map(|pending| pending.response.event_index());

            if let Some(response_event_index) = head_response_event_index {
                let event_blocks = match self.events.front() {
                    Some(pending) => pending.event.event_index <= response_event_index,
                    None => false,
                };
                if !event_blocks {
                    let pending = self.responses.remove(&head_sequence).expect("checked above");
                    self.response_sequence = head_sequence;
                    self.session.set_response_index(pending.response.index());
                    // Missing-event path (§4.3, §9): firing unblocked accepts whatever
                    // event-index gap the response's own event_index implies, so the
                    // causal-gap check on later events doesn't re-flag what this
                    // response already subsumed.
                    if pending.response.event_index() > self.event_index {
                        self.event_index = pending.response.event_index();
                        self.session.set_event_index(self.event_index);
                    }
                    tracing::debug!(sequence = head_sequence, index = pending.response.index(), "firing response");
                    (pending.complete)();
                    continue;
                }
            }

            if let Some(pending) = self.events.front() {
                let event_fires = match head_response_event_index {
                    Some(response_event_index) => pending.event.event_index <= response_event_index,
                    None => true,
                };
                if event_fires {
                    let pending = self.events.pop_front().expect("checked above");
                    // A response already fired with a higher event_index can subsume an
                    // event still in flight (§4.3 missing-event path); never let firing
                    // it regress the tracked cursor below what was already observed.
                    if pending.event.event_index > self.event_index {
                        self.event_index = pending.event.event_index;
                        self.session.set_event_index(self.event_index);
                    }
                    tracing::debug!(event_index = pending.event.event_index, "firing event");
                    (pending.complete)();
                    continue;
                }
            }

            break;
        }

        self.draining = false;
    }
}
