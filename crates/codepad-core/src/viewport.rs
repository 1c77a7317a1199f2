//! Viewport state: which blocks are visible and where they sit on screen.
//!
//! Every block has the same pixel height. Hidden (collapsed) blocks take no
//! vertical space but keep their index, so line numbers after them still
//! count them.

use std::collections::BTreeSet;

use crate::geometry::PixelRect;

/// Read-only view of the viewport, as seen by observers.
pub trait ViewportSource {
    /// Index of the first block drawn at the top of the viewport.
    fn first_visible_block(&self) -> usize;
    /// Y offset of that block's top edge; zero or negative when partially scrolled out.
    fn first_block_top(&self) -> f32;
    fn block_height(&self, block: usize) -> f32;
    fn block_count(&self) -> usize;
    fn is_hidden(&self, block: usize) -> bool;
}

#[derive(Debug, Clone)]
pub struct ViewportState {
    first_block: usize,
    first_block_top: f32,
    block_height: f32,
    block_count: usize,
    hidden: BTreeSet<usize>,
    /// Scroll position in pixels from the top of the first visible row.
    scroll_y: f32,
    /// Height of the visible area in pixels.
    height: f32,
}

impl ViewportState {
    pub fn new(block_height: f32, height: f32) -> Self {
        Self {
            first_block: 0,
            first_block_top: 0.0,
            block_height: block_height.max(1.0),
            block_count: 1,
            hidden: BTreeSet::new(),
            scroll_y: 0.0,
            height: height.max(0.0),
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Visible area in viewport coordinates, `width` wide.
    pub fn rect(&self, width: f32) -> PixelRect {
        PixelRect::new(0.0, 0.0, width, self.height)
    }

    pub fn visible_block_count(&self) -> usize {
        self.block_count.saturating_sub(self.hidden.len())
    }

    pub fn content_height(&self) -> f32 {
        self.visible_block_count() as f32 * self.block_height
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.height).max(0.0)
    }

    /// Scrolls by `delta` pixels (positive moves further down the document).
    /// Returns the distance actually scrolled after clamping.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.scroll_to(self.scroll_y + delta)
    }

    /// Scrolls to an absolute offset. Returns the distance actually scrolled.
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        let before = self.scroll_y;
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        self.relayout();
        self.scroll_y - before
    }

    /// Scrolls the minimum distance that brings `block` fully into view.
    /// Hidden blocks are left alone. Returns the distance scrolled.
    pub fn ensure_visible(&mut self, block: usize) -> f32 {
        let Some(row) = self.visible_row(block) else {
            return 0.0;
        };
        let top = row as f32 * self.block_height;
        let bottom = top + self.block_height;
        if top < self.scroll_y {
            self.scroll_to(top)
        } else if bottom > self.scroll_y + self.height {
            self.scroll_to(bottom - self.height)
        } else {
            0.0
        }
    }

    pub fn resize(&mut self, height: f32) {
        self.height = height.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        self.relayout();
    }

    pub fn set_block_height(&mut self, block_height: f32) {
        // Keep the same row at the top
        let row = self.scroll_y / self.block_height;
        self.block_height = block_height.max(1.0);
        self.scroll_y = (row * self.block_height).clamp(0.0, self.max_scroll());
        self.relayout();
    }

    /// Sets the block count (at least 1), dropping hidden marks past the end.
    pub fn set_block_count(&mut self, count: usize) {
        self.block_count = count.max(1);
        let count = self.block_count;
        self.hidden.retain(|&b| b < count);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        self.relayout();
    }

    /// Shifts hidden marks after an edit replaced `removed` blocks starting
    /// at `first` with `inserted` blocks. Marks inside the replaced range are cleared.
    pub fn apply_block_change(&mut self, first: usize, removed: usize, inserted: usize) {
        let end = first + removed;
        self.hidden = self
            .hidden
            .iter()
            .filter_map(|&b| {
                if b < first {
                    Some(b)
                } else if b < end {
                    None
                } else {
                    Some(b - removed + inserted)
                }
            })
            .collect();
    }

    /// Hides or shows a block. Returns whether anything changed.
    pub fn set_hidden(&mut self, block: usize, hidden: bool) -> bool {
        if block >= self.block_count {
            return false;
        }
        let changed = if hidden {
            // At least one block stays visible
            self.visible_block_count() > 1 && self.hidden.insert(block)
        } else {
            self.hidden.remove(&block)
        };
        if changed {
            self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
            self.relayout();
        }
        changed
    }

    /// Visible row of `block`, or `None` when it is hidden or out of range.
    fn visible_row(&self, block: usize) -> Option<usize> {
        if block >= self.block_count || self.hidden.contains(&block) {
            return None;
        }
        Some(block - self.hidden.range(..block).count())
    }

    /// Block shown in visible row `row`, clamped to the last visible block.
    fn block_for_row(&self, row: usize) -> usize {
        let mut block = row;
        for &h in &self.hidden {
            if h <= block {
                block += 1;
            } else {
                break;
            }
        }
        if block >= self.block_count {
            // Past the end: last visible block
            (0..self.block_count)
                .rev()
                .find(|b| !self.hidden.contains(b))
                .unwrap_or(0)
        } else {
            block
        }
    }

    /// Top edge of `block` in viewport coordinates, `None` if hidden.
    pub fn block_top(&self, block: usize) -> Option<f32> {
        self.visible_row(block)
            .map(|row| row as f32 * self.block_height - self.scroll_y)
    }

    /// Block under viewport y coordinate `y`.
    pub fn block_at_y(&self, y: f32) -> usize {
        let row = ((y + self.scroll_y) / self.block_height).floor().max(0.0) as usize;
        self.block_for_row(row)
    }

    fn relayout(&mut self) {
        let row = (self.scroll_y / self.block_height).floor() as usize;
        self.first_block = self.block_for_row(row);
        self.first_block_top = self.block_top(self.first_block).unwrap_or(0.0);
    }
}

impl ViewportSource for ViewportState {
    fn first_visible_block(&self) -> usize {
        self.first_block
    }

    fn first_block_top(&self) -> f32 {
        self.first_block_top
    }

    fn block_height(&self, _block: usize) -> f32 {
        self.block_height
    }

    fn block_count(&self) -> usize {
        self.block_count
    }

    fn is_hidden(&self, block: usize) -> bool {
        self.hidden.contains(&block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(blocks: usize) -> ViewportState {
        let mut vp = ViewportState::new(20.0, 100.0);
        vp.set_block_count(blocks);
        vp
    }

    #[test]
    fn test_block_count_is_at_least_one() {
        let mut vp = viewport(5);
        vp.set_block_count(0);
        assert_eq!(vp.block_count(), 1);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = viewport(10);
        // 10 blocks * 20px = 200px content, 100px visible
        assert_eq!(vp.scroll_by(500.0), 100.0);
        assert_eq!(vp.scroll_by(10.0), 0.0);
        assert_eq!(vp.scroll_by(-1000.0), -100.0);
    }

    #[test]
    fn test_first_block_tracks_scroll() {
        let mut vp = viewport(10);
        vp.scroll_to(30.0);
        assert_eq!(vp.first_visible_block(), 1);
        assert_eq!(vp.first_block_top(), -10.0);
    }

    #[test]
    fn test_hidden_blocks_take_no_space() {
        let mut vp = viewport(10);
        assert!(vp.set_hidden(1, true));
        assert!(vp.set_hidden(2, true));
        assert_eq!(vp.block_top(3), Some(20.0));
        assert_eq!(vp.block_top(2), None);
        assert_eq!(vp.block_at_y(25.0), 3);
        vp.scroll_to(20.0);
        assert_eq!(vp.first_visible_block(), 3);
    }

    #[test]
    fn test_last_visible_block_cannot_be_hidden() {
        let mut vp = viewport(2);
        assert!(vp.set_hidden(0, true));
        assert!(!vp.set_hidden(1, true));
        assert_eq!(vp.visible_block_count(), 1);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut vp = viewport(10);
        assert_eq!(vp.ensure_visible(2), 0.0);
        // Block 6 spans 120..140; bottom aligns with 100px viewport
        assert_eq!(vp.ensure_visible(6), 40.0);
        assert_eq!(vp.ensure_visible(0), -40.0);
    }

    #[test]
    fn test_apply_block_change_shifts_hidden_marks() {
        let mut vp = viewport(10);
        vp.set_hidden(2, true);
        vp.set_hidden(5, true);
        vp.set_hidden(8, true);
        vp.set_block_count(12);
        // Block 4 and 5 replaced by four blocks
        vp.apply_block_change(4, 2, 4);
        assert!(vp.is_hidden(2));
        assert!(!vp.is_hidden(5));
        assert!(vp.is_hidden(10));
    }
}
