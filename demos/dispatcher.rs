//! A minimal single-threaded dispatcher loop driving a [`Sequencer`].
//!
//! Real transports hand the sequencer items as they arrive off the wire;
//! this demo stands in for that with a fixed, deliberately out-of-order
//! queue of incoming responses and events, to show the sequencer putting
//! them back into state-machine order.

use std::sync::Arc;

use raft_client_sequencer::Config;
use raft_client_sequencer::Event;
use raft_client_sequencer::Response;
use raft_client_sequencer::ResponseStatus;
use raft_client_sequencer::Sequencer;
use raft_client_sequencer::SharedSessionState;

enum Incoming {
    Response { sequence: u64, response: Response<&'static str> },
    Event { event: Event<&'static str> },
}

fn main() {
    tracing_subscriber::fmt::init();

    let session = SharedSessionState::new(1);
    let mut sequencer: Sequencer<_, &'static str, &'static str> = Sequencer::new(session, Arc::new(Config::default()));

    let seq1 = sequencer.next_request();
    let seq2 = sequencer.next_request();

    // The transport delivered the second command's response first, and an
    // event that causally precedes the first command's own response.
    let incoming = vec![
        Incoming::Response { sequence: seq2, response: Response::Command { index: 2, event_index: 0, status: ResponseStatus::Ok, payload: "set y" } },
        Incoming::Event { event: Event::new(1, 0, "y created") },
        Incoming::Response { sequence: seq1, response: Response::Command { index: 1, event_index: 1, status: ResponseStatus::Ok, payload: "set x" } },
    ];

    for item in incoming {
        match item {
            Incoming::Response { sequence, response } => {
                sequencer
                    .sequence_response(sequence, response, Box::new(move || println!("delivered response for sequence {}", sequence)))
                    .expect("strict mode is off in this demo");
            }
            Incoming::Event { event } => {
                let event_index = event.event_index;
                sequencer
                    .sequence_event(event, Box::new(move || println!("delivered event {}", event_index)))
                    .expect("strict mode is off in this demo");
            }
        }
    }
}
