//! The observer interface between the editing surface and its listeners.
//!
//! The surface notifies observers of edits, block-count changes and
//! scrolling. Observers read text only through [`TextBlocks`] and answer only
//! by pushing [`SurfaceRequest`]s; the surface decides how to carry them out.

use std::ops::Range;

use crate::geometry::PixelRect;
use crate::highlight::StyleSpan;

/// Read access to the text, one block (line) at a time.
pub trait TextBlocks {
    /// Number of blocks; never zero.
    fn block_count(&self) -> usize;
    /// Text of `block` without its line terminator.
    fn block_text(&self, block: usize) -> Option<String>;
}

/// Something an observer asks the surface to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceRequest {
    /// Replace the formats of one block.
    SetBlockFormats { block: usize, spans: Vec<StyleSpan> },
    /// The gutter width changed; the host should lay out again.
    GeometryInvalidated,
    /// Repaint this gutter region.
    PaintRegion(PixelRect),
    /// Shift the gutter contents by `dy` and repaint `exposed`.
    ScrollGutter { dy: f32, exposed: PixelRect },
}

/// Requests collected during one dispatch.
#[derive(Debug, Default)]
pub struct RequestQueue {
    requests: Vec<SurfaceRequest>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: SurfaceRequest) {
        self.requests.push(request);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SurfaceRequest> {
        self.requests.drain(..)
    }
}

impl IntoIterator for RequestQueue {
    type Item = SurfaceRequest;
    type IntoIter = std::vec::IntoIter<SurfaceRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

/// Listener for editing-surface events. All methods default to no-ops.
pub trait SurfaceObserver {
    /// Blocks in `changed` were inserted or modified.
    fn on_text_changed(
        &mut self,
        _blocks: &dyn TextBlocks,
        _changed: Range<usize>,
        _requests: &mut RequestQueue,
    ) {
    }

    fn on_block_count_changed(&mut self, _count: usize, _requests: &mut RequestQueue) {}

    /// The view scrolled; gutter contents move by `dy` (positive = down).
    /// `rect` is the area that needs updating.
    fn on_viewport_scrolled(&mut self, _rect: PixelRect, _dy: f32, _requests: &mut RequestQueue) {}
}
