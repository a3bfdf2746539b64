//! Virtualization coordinator.
//!
//! Navigation targets may point at rows outside the rendered window. The
//! [`Viewport`] bridges the gap: it asks the windowing primitive whether a
//! row is rendered and, if not, issues a scroll command and awaits the
//! primitive's settle signal before the caller commits any state that
//! depends on the row existing in the window. There is no timeout and no
//! polling; the primitive owns the notion of "settled".

use std::ops::Range;
use std::sync::{Arc, RwLock};

use tokio::sync::oneshot;

/// A vertical windowing primitive the grid can drive.
///
/// Implemented by the built-in [`Window`] and by any external virtualizer
/// a host embeds instead.
///
/// [`Window`]: crate::window::Window
pub trait WindowedList: Send + Sync {
    /// Scroll so the row at `index` is inside the rendered window.
    fn scroll_to_index(&self, index: usize);

    /// The currently rendered row range.
    fn visible_range(&self) -> Range<usize>;

    /// Subscribe to the next settle signal.
    ///
    /// The sender fires once, after the next layout pass completes. If the
    /// primitive is torn down first the receiver resolves with an error,
    /// which awaiters treat as settled.
    fn settled(&self) -> oneshot::Receiver<()>;
}

/// Horizontal extent of a cell, in px from the left edge of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalSpan {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Default)]
struct Horizontal {
    /// Horizontal scroll offset in px.
    offset: u32,
    /// Viewport width in px.
    width: u32,
}

/// Coordinates scrolling between the grid and its windowing primitive.
///
/// Vertical positioning goes through the primitive and is awaited;
/// horizontal positioning is plain offset arithmetic owned here.
#[derive(Clone)]
pub struct Viewport {
    window: Arc<dyn WindowedList>,
    horizontal: Arc<RwLock<Horizontal>>,
}

impl Viewport {
    /// Create a viewport over a windowing primitive.
    pub fn new(window: Arc<dyn WindowedList>) -> Self {
        Self {
            window,
            horizontal: Arc::new(RwLock::new(Horizontal::default())),
        }
    }

    /// Set the viewport width in px (called by the renderer).
    pub fn set_viewport_width(&self, width: u32) {
        if let Ok(mut guard) = self.horizontal.write() {
            guard.width = width;
        }
    }

    /// Current horizontal scroll offset in px.
    pub fn scroll_offset_x(&self) -> u32 {
        self.horizontal.read().map(|g| g.offset).unwrap_or(0)
    }

    /// The currently rendered row range.
    pub fn visible_rows(&self) -> Range<usize> {
        self.window.visible_range()
    }

    /// Bring a row (and optionally a horizontal span) into view.
    ///
    /// Resolves immediately when the row is already rendered. Otherwise
    /// subscribes to the settle signal exactly once, issues the scroll
    /// command, and awaits the signal. A torn-down primitive resolves the
    /// subscription with an error and is treated as settled, so teardown
    /// never leaves an awaiter pending forever.
    pub async fn ensure_visible(&self, row: usize, span: Option<HorizontalSpan>) {
        if let Some(span) = span {
            self.scroll_into_span(span);
        }

        if self.window.visible_range().contains(&row) {
            return;
        }

        // Subscribe before commanding the scroll so a synchronously
        // settling primitive cannot signal into the void.
        let settled = self.window.settled();
        self.window.scroll_to_index(row);
        let _ = settled.await;
    }

    /// Adjust the horizontal offset so the span is fully visible.
    ///
    /// Scrolls the minimum distance; a span wider than the viewport (or a
    /// degenerate one with `end <= start`) aligns its start edge.
    fn scroll_into_span(&self, span: HorizontalSpan) {
        if let Ok(mut guard) = self.horizontal.write() {
            if guard.width == 0 {
                return;
            }
            if span.start < guard.offset || span.end.saturating_sub(span.start) > guard.width {
                guard.offset = span.start;
            } else if span.end > guard.offset + guard.width {
                guard.offset = span.end - guard.width;
            }
        }
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("visible_rows", &self.window.visible_range())
            .field("scroll_offset_x", &self.scroll_offset_x())
            .finish()
    }
}
