//! # Lookup Dispatcher
//!
//! Runs the lookups the controller asks for on a tokio runtime. There is a
//! single pending slot: scheduling a lookup aborts whatever occupied it,
//! whether that task was still waiting out its debounce window or already
//! talking to the API. Progress is reported back over a channel tagged with
//! the request token, and the controller decides whether it is still
//! relevant.

use std::sync::Arc;

use citadel_api::CharacterLookup;
use citadel_core::{Character, Effect, LookupError, LookupRequest, RequestToken};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::trace;

/// Progress of a dispatched lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupEvent {
  /// The debounce window elapsed and the lookup is running
  Started(RequestToken),
  /// The lookup resolved
  Finished(RequestToken, Result<Vec<Character>, LookupError>),
}

pub struct LookupDispatcher<L: CharacterLookup> {
  lookup: Arc<L>,
  runtime: Handle,
  events: UnboundedSender<LookupEvent>,
  pending: Option<JoinHandle<()>>,
}

impl<L: CharacterLookup> LookupDispatcher<L> {
  /// Create a dispatcher spawning onto `runtime`, along with the receiving
  /// end of its event channel
  pub fn new(lookup: L, runtime: Handle) -> (Self, UnboundedReceiver<LookupEvent>) {
    let (events, receiver) = mpsc::unbounded_channel();
    let dispatcher = Self {
      lookup: Arc::new(lookup),
      runtime,
      events,
      pending: None,
    };
    (dispatcher, receiver)
  }

  /// Carry out a controller effect
  pub fn apply(&mut self, effect: Effect) {
    match effect {
      Effect::Schedule(request) => self.schedule(request),
      Effect::CancelPending => self.cancel(),
    }
  }

  /// Replace the pending lookup with `request`
  pub fn schedule(&mut self, request: LookupRequest) {
    self.cancel();
    trace!(token = request.token.value(), query = %request.query, "Dispatching lookup");

    let lookup = Arc::clone(&self.lookup);
    let events = self.events.clone();
    let task = self.runtime.spawn(async move {
      tokio::time::sleep(request.debounce).await;
      if events.send(LookupEvent::Started(request.token)).is_err() {
        return;
      }

      let outcome = lookup.search(&request.query, request.simulated_delay).await;
      // The receiver is gone once the picker exits
      let _ = events.send(LookupEvent::Finished(request.token, outcome));
    });

    self.pending = Some(task);
  }

  /// Abort the pending lookup, if any
  pub fn cancel(&mut self) {
    if let Some(task) = self.pending.take() {
      task.abort();
    }
  }
}

impl<L: CharacterLookup> Drop for LookupDispatcher<L> {
  fn drop(&mut self) {
    self.cancel();
  }
}
