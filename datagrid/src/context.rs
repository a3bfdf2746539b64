//! Host-facing grid context.
//!
//! `GridContext` is constructed once per grid host and passed down to the
//! engines explicitly; grid-wide state never travels through ambient or
//! global lookup. Components push events into the queue; a host render
//! loop that blocks when idle can subscribe via
//! [`GridContext::subscribe_wakeup`] and drain the queue after each
//! signal.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use crate::events::{GridEvent, GridEventKind};
use crate::navigation::ActiveNode;

#[derive(Debug, Default)]
struct ContextInner {
    /// Queued events, drained by the host.
    pending_events: Vec<GridEvent>,
    /// Last committed active node, mirrored for host access.
    active: Option<ActiveNode>,
    /// Last sorted column key and whether it sorted ascending.
    sorted_column: Option<(String, bool)>,
    /// Wakeup signal for the subscribed host, if any.
    wakeup: Option<mpsc::Sender<()>>,
}

/// Shared context between a grid and its host.
///
/// Cheap to clone; all clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct GridContext {
    inner: Arc<RwLock<ContextInner>>,
}

impl GridContext {
    /// Create a new context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe the host render loop to state-change wakeups.
    ///
    /// At most one subscriber is active; subscribing again replaces the
    /// previous one.
    pub fn subscribe_wakeup(&self) -> HostWakeup {
        let (tx, rx) = mpsc::channel(16);
        if let Ok(mut inner) = self.inner.write() {
            inner.wakeup = Some(tx);
        }
        HostWakeup { rx }
    }

    /// Push a grid event to the queue and wake the host.
    pub fn push_event(&self, event: GridEvent) {
        if let Ok(mut inner) = self.inner.write() {
            log::debug!("grid event: {:?} from {}", event.kind, event.source);
            inner.pending_events.push(event);
        }
        self.wake();
    }

    fn wake(&self) {
        if let Ok(inner) = self.inner.read()
            && let Some(wakeup) = &inner.wakeup
        {
            // Non-blocking; a full buffer already holds a pending wakeup.
            let _ = wakeup.try_send(());
        }
    }

    /// Drain all pending events.
    ///
    /// Returns the events and clears the queue.
    pub fn drain_events(&self) -> Vec<GridEvent> {
        self.inner
            .write()
            .ok()
            .map(|mut inner| std::mem::take(&mut inner.pending_events))
            .unwrap_or_default()
    }

    /// Check whether an event of the given kind is pending.
    pub fn has_event(&self, kind: GridEventKind) -> bool {
        self.inner
            .read()
            .map(|inner| inner.pending_events.iter().any(|e| e.kind == kind))
            .unwrap_or(false)
    }

    /// Set the mirrored active node (called by the grid on commit).
    pub fn set_active(&self, node: Option<ActiveNode>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.active = node;
        }
    }

    /// Get the last committed active node.
    pub fn active(&self) -> Option<ActiveNode> {
        self.inner.read().ok().and_then(|inner| inner.active.clone())
    }

    /// Set the last sorted column info (key, ascending).
    pub fn set_sorted(&self, key: impl Into<String>, ascending: bool) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sorted_column = Some((key.into(), ascending));
        }
    }

    /// Get the last sorted column info.
    pub fn sorted_column(&self) -> Option<(String, bool)> {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.sorted_column.clone())
    }

    /// Clear the sorted column info.
    pub fn clear_sorted(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sorted_column = None;
        }
    }
}

/// Receiver side of the host wakeup subscription.
///
/// Signals carry no payload; after a wakeup the host re-reads grid state
/// and drains the event queue.
#[derive(Debug)]
pub struct HostWakeup {
    rx: mpsc::Receiver<()>,
}

impl HostWakeup {
    /// Wait for the next state-change signal.
    ///
    /// Returns `false` once every clone of the context is gone.
    pub async fn wait(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Check for a pending signal without waiting.
    pub fn pending(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Discard buffered signals.
    ///
    /// Multiple buffered wakeups collapse into a single render.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}
