//! Default windowing primitive.
//!
//! A fixed-row-height windowed list: the rendering layer reports viewport
//! size and row count, the grid issues scroll-to-index commands, and
//! anything awaiting settlement is notified after a layout pass. Layout
//! here is plain arithmetic, so `scroll_to_index` settles synchronously;
//! an external primitive with asynchronous layout notifies via
//! [`Window::notify_settled`] once its own pass completes.

use std::ops::Range;
use std::sync::{Arc, RwLock};

use tokio::sync::oneshot;

use crate::viewport::WindowedList;

#[derive(Debug, Default)]
struct WindowInner {
    /// Height of a single row, in px.
    row_height: u32,
    /// Total number of rows in the view.
    row_count: usize,
    /// Vertical scroll offset in px.
    scroll_offset: u32,
    /// Viewport height in px (set by the renderer).
    viewport_height: u32,
    /// Pending settle subscriptions.
    subscribers: Vec<oneshot::Sender<()>>,
}

impl WindowInner {
    fn max_offset(&self) -> u32 {
        (self.row_count as u32 * self.row_height).saturating_sub(self.viewport_height)
    }

    fn visible_range(&self) -> Range<usize> {
        if self.row_count == 0 || self.viewport_height == 0 || self.row_height == 0 {
            return 0..0;
        }
        let start = (self.scroll_offset / self.row_height) as usize;
        let visible = self.viewport_height.div_ceil(self.row_height) as usize;
        let end = (start + visible).min(self.row_count);
        start..end
    }
}

/// A windowed row list with reactive scroll state.
///
/// Cheap to clone; all clones share the same state.
#[derive(Debug, Clone)]
pub struct Window {
    inner: Arc<RwLock<WindowInner>>,
}

impl Window {
    /// Create a window with the given row height in px.
    pub fn new(row_height: u32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(WindowInner {
                row_height: row_height.max(1),
                ..Default::default()
            })),
        }
    }

    /// Set the total row count (called when the view changes).
    pub fn set_row_count(&self, count: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.row_count = count;
            guard.scroll_offset = guard.scroll_offset.min(guard.max_offset());
        }
    }

    /// Set the viewport height in px (called by the renderer).
    pub fn set_viewport_height(&self, height: u32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport_height = height;
            guard.scroll_offset = guard.scroll_offset.min(guard.max_offset());
        }
    }

    /// Current vertical scroll offset in px.
    pub fn scroll_offset(&self) -> u32 {
        self.inner.read().map(|g| g.scroll_offset).unwrap_or(0)
    }

    /// Notify everything awaiting settlement that layout has settled.
    pub fn notify_settled(&self) {
        let subscribers = self
            .inner
            .write()
            .map(|mut guard| std::mem::take(&mut guard.subscribers))
            .unwrap_or_default();
        for subscriber in subscribers {
            let _ = subscriber.send(());
        }
    }
}

impl WindowedList for Window {
    fn scroll_to_index(&self, index: usize) {
        if let Ok(mut guard) = self.inner.write() {
            // Out-of-range commands are no-ops but still settle below.
            if index < guard.row_count && guard.viewport_height > 0 {
                let row_top = index as u32 * guard.row_height;
                let row_bottom = row_top + guard.row_height;

                if row_top < guard.scroll_offset {
                    guard.scroll_offset = row_top;
                } else if row_bottom > guard.scroll_offset + guard.viewport_height {
                    guard.scroll_offset = row_bottom.saturating_sub(guard.viewport_height);
                }
            }
        }
        // Layout is synchronous here: settle immediately.
        self.notify_settled();
    }

    fn visible_range(&self) -> Range<usize> {
        self.inner
            .read()
            .map(|g| g.visible_range())
            .unwrap_or(0..0)
    }

    fn settled(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        if let Ok(mut guard) = self.inner.write() {
            guard.subscribers.push(tx);
        }
        rx
    }
}
