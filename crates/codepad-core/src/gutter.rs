//! Line-number gutter: width computation, painting and scroll patching.
//!
//! The renderer paints through a [`GutterCanvas`] and reads the layout
//! through a [`ViewportSource`], so it has no toolkit dependency. Gutter
//! coordinates start at `(0, 0)` in the gutter's top-left corner.

use codepad_config::HexColor;

use crate::geometry::PixelRect;
use crate::observer::{RequestQueue, SurfaceObserver, SurfaceRequest};
use crate::viewport::ViewportSource;

/// Drawing surface the gutter paints on.
pub trait GutterCanvas {
    fn fill_rect(&mut self, rect: PixelRect, color: HexColor);
    /// Draws `text` right-aligned and vertically centered in `rect`.
    fn draw_number(&mut self, rect: PixelRect, text: &str, color: HexColor);
    /// Moves the existing contents down by `dy` (up when negative).
    fn scroll(&mut self, dy: f32);
}

/// Font-dependent sizing of the gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterMetrics {
    /// Advance width of the digit `9` in the editor font.
    pub digit_width: f32,
    pub padding: f32,
    /// Gap between the numbers and the gutter's right edge.
    pub right_margin: f32,
}

impl Default for GutterMetrics {
    fn default() -> Self {
        Self {
            digit_width: 8.0,
            padding: 10.0,
            right_margin: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterColors {
    pub background: HexColor,
    pub number: HexColor,
}

impl Default for GutterColors {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(0x38, 0x3A, 0x59),
            number: HexColor::rgb(0x62, 0x72, 0xA4),
        }
    }
}

/// What part of the gutter must be brought up to date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GutterRepaint {
    /// Shift the contents by `dy`, then paint only `exposed`.
    Scroll { dy: f32, exposed: PixelRect },
    /// Paint this region.
    Region(PixelRect),
}

/// Number of decimal digits in `n`, counting 0 as one digit.
pub fn decimal_digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

#[derive(Debug, Clone)]
pub struct GutterRenderer {
    metrics: GutterMetrics,
    colors: GutterColors,
    block_count: usize,
    /// Last known gutter height, for scroll patching.
    height: f32,
    dirty: bool,
}

impl GutterRenderer {
    pub fn new(metrics: GutterMetrics, colors: GutterColors) -> Self {
        Self {
            metrics,
            colors,
            block_count: 1,
            height: 0.0,
            dirty: false,
        }
    }

    pub fn metrics(&self) -> GutterMetrics {
        self.metrics
    }

    pub fn colors(&self) -> GutterColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: GutterColors) {
        self.colors = colors;
    }

    /// Replaces the metrics; returns whether the width changed.
    pub fn set_metrics(&mut self, metrics: GutterMetrics) -> bool {
        let before = self.compute_width();
        self.metrics = metrics;
        let changed = self.compute_width() != before;
        self.dirty |= changed;
        changed
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// `padding + digit_width * digits(block_count)`.
    pub fn compute_width(&self) -> f32 {
        let digits = decimal_digits(self.block_count.max(1));
        self.metrics.padding + self.metrics.digit_width * digits as f32
    }

    /// Whether the width changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Paints the part of the gutter inside `rect`.
    pub fn paint(&self, viewport: &dyn ViewportSource, rect: PixelRect, canvas: &mut dyn GutterCanvas) {
        canvas.fill_rect(rect, self.colors.background);

        let number_width = (self.compute_width() - self.metrics.right_margin).max(0.0);
        let count = viewport.block_count();
        let mut block = viewport.first_visible_block();
        let mut top = viewport.first_block_top();

        while block < count && top < rect.bottom() {
            if viewport.is_hidden(block) {
                block += 1;
                continue;
            }
            let height = viewport.block_height(block);
            if rect.overlaps_rows(top, top + height) {
                let row = PixelRect::new(0.0, top, number_width, height);
                canvas.draw_number(row, &(block + 1).to_string(), self.colors.number);
            }
            top += height;
            block += 1;
        }
    }

    /// Decides how to update the gutter after the view changed.
    ///
    /// A scroll reuses the shifted contents and only exposes the uncovered
    /// band; anything else repaints the gutter strip beside `rect`.
    pub fn on_viewport_update(&self, rect: PixelRect, dy: f32, gutter_height: f32) -> GutterRepaint {
        let width = self.compute_width();
        if dy != 0.0 {
            let exposed = if dy.abs() >= gutter_height {
                PixelRect::new(0.0, 0.0, width, gutter_height)
            } else if dy > 0.0 {
                PixelRect::new(0.0, 0.0, width, dy)
            } else {
                PixelRect::new(0.0, gutter_height + dy, width, -dy)
            };
            GutterRepaint::Scroll { dy, exposed }
        } else {
            GutterRepaint::Region(PixelRect::new(0.0, rect.y, width, rect.height))
        }
    }

    pub fn apply(&self, repaint: GutterRepaint, viewport: &dyn ViewportSource, canvas: &mut dyn GutterCanvas) {
        match repaint {
            GutterRepaint::Scroll { dy, exposed } => {
                canvas.scroll(dy);
                self.paint(viewport, exposed, canvas);
            }
            GutterRepaint::Region(rect) => self.paint(viewport, rect, canvas),
        }
    }
}

impl SurfaceObserver for GutterRenderer {
    fn on_block_count_changed(&mut self, count: usize, requests: &mut RequestQueue) {
        let before = self.compute_width();
        self.block_count = count.max(1);
        if self.compute_width() != before {
            tracing::trace!("Gutter width changed for {} blocks", self.block_count);
            self.dirty = true;
            requests.push(SurfaceRequest::GeometryInvalidated);
        }
    }

    fn on_viewport_scrolled(&mut self, rect: PixelRect, dy: f32, requests: &mut RequestQueue) {
        let request = match self.on_viewport_update(rect, dy, self.height) {
            GutterRepaint::Scroll { dy, exposed } => SurfaceRequest::ScrollGutter { dy, exposed },
            GutterRepaint::Region(rect) => SurfaceRequest::PaintRegion(rect),
        };
        requests.push(request);
    }
}
