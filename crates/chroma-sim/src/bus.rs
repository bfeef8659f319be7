//! Publish/subscribe event bus.
//!
//! Explicit state owned by the engine and threaded through the
//! simulation step by reference — no global singleton. Dispatch
//! snapshots the subscriber list before iterating, so a subscribe or
//! unsubscribe issued while a notification is in flight never corrupts
//! it. Delivery order is subscription order within a kind, with
//! kind-subscribers notified before global subscribers.
//!
//! A failing subscriber is reported to the logging sink and never
//! aborts the dispatch, the other subscribers, or the tick.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::error::Error;
use std::rc::Rc;

use chroma_core::constants::EVENT_HISTORY_MAX;
use chroma_core::events::{EventKind, GameEvent};

/// Result of one subscriber invocation.
pub type ObserverResult = Result<(), Box<dyn Error>>;

/// A subscriber. Implemented for any `FnMut(&GameEvent) -> ObserverResult`.
pub trait Observer {
    fn on_event(&mut self, event: &GameEvent) -> ObserverResult;
}

impl<F> Observer for F
where
    F: FnMut(&GameEvent) -> ObserverResult,
{
    fn on_event(&mut self, event: &GameEvent) -> ObserverResult {
        self(event)
    }
}

/// Shared subscriber handle. The bus and any external owner (tests,
/// session layer) can hold the same observer.
pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Handle for unsubscribing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

pub struct EventBus {
    kind_subs: BTreeMap<EventKind, Vec<(SubscriberId, SharedObserver)>>,
    global_subs: Vec<(SubscriberId, SharedObserver)>,
    history: VecDeque<GameEvent>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            kind_subs: BTreeMap::new(),
            global_subs: Vec::new(),
            history: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Wrap an observer for sharing with the bus.
    pub fn share(observer: impl Observer + 'static) -> SharedObserver {
        Rc::new(RefCell::new(observer))
    }

    /// Subscribe to a single event kind.
    pub fn subscribe(&mut self, kind: EventKind, observer: SharedObserver) -> SubscriberId {
        let id = self.alloc_id();
        self.kind_subs.entry(kind).or_default().push((id, observer));
        id
    }

    /// Subscribe to every event kind.
    pub fn subscribe_all(&mut self, observer: SharedObserver) -> SubscriberId {
        let id = self.alloc_id();
        self.global_subs.push((id, observer));
        id
    }

    /// Convenience: subscribe a closure to one kind.
    pub fn subscribe_fn(
        &mut self,
        kind: EventKind,
        f: impl FnMut(&GameEvent) -> ObserverResult + 'static,
    ) -> SubscriberId {
        self.subscribe(kind, Self::share(f))
    }

    /// Convenience: subscribe a closure to every kind.
    pub fn subscribe_all_fn(
        &mut self,
        f: impl FnMut(&GameEvent) -> ObserverResult + 'static,
    ) -> SubscriberId {
        self.subscribe_all(Self::share(f))
    }

    /// Remove a subscription by handle.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        for subs in self.kind_subs.values_mut() {
            subs.retain(|(sub_id, _)| *sub_id != id);
        }
        self.global_subs.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Publish one event: record it in the bounded history, then notify
    /// kind-subscribers followed by global subscribers.
    pub fn publish(&mut self, event: &GameEvent) {
        self.history.push_back(event.clone());
        while self.history.len() > EVENT_HISTORY_MAX {
            self.history.pop_front();
        }

        // Snapshot-then-iterate: clone the handles up front so list
        // mutations during dispatch cannot disturb this notification.
        let mut targets: Vec<SharedObserver> = Vec::new();
        if let Some(subs) = self.kind_subs.get(&event.kind) {
            targets.extend(subs.iter().map(|(_, obs)| Rc::clone(obs)));
        }
        targets.extend(self.global_subs.iter().map(|(_, obs)| Rc::clone(obs)));

        for observer in targets {
            if let Err(err) = observer.borrow_mut().on_event(event) {
                log::error!("event subscriber failed on {:?}: {err}", event.kind);
            }
        }
    }

    /// Recent events, oldest first (bounded).
    pub fn history(&self) -> impl Iterator<Item = &GameEvent> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Number of subscribers that would see an event of this kind.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.kind_subs.get(&kind).map_or(0, Vec::len) + self.global_subs.len()
    }

    fn alloc_id(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
