//! The editing surface: a document wired to its highlighter and gutter.
//!
//! `EditorSurface` owns the document, the viewport and both observers. Each
//! edit is dispatched to the observers; block formats they request are
//! applied to the document directly, while geometry and paint requests are
//! queued for the host (see [`EditorSurface::take_requests`]).

use std::path::Path;

use anyhow::Result;
use codepad_config::{LanguageRegistry, SyntaxTheme};

use crate::cursor::Position;
use crate::document::{BlockChange, CursorMotion, Document};
use crate::geometry::PixelRect;
use crate::gutter::{GutterCanvas, GutterColors, GutterMetrics, GutterRenderer, GutterRepaint};
use crate::highlight::{Highlighter, StyledRun};
use crate::observer::{RequestQueue, SurfaceObserver, SurfaceRequest};
use crate::viewport::{ViewportSource, ViewportState};

/// Cursor and document facts for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in chars.
    pub column: usize,
    pub char_count: usize,
    pub language: String,
}

#[derive(Debug)]
pub struct EditorSurface {
    document: Document,
    highlighter: Highlighter,
    gutter: GutterRenderer,
    viewport: ViewportState,
    pending: Vec<SurfaceRequest>,
}

impl EditorSurface {
    pub fn new(document: Document, metrics: GutterMetrics, block_height: f32) -> Self {
        let mut surface = Self {
            document,
            highlighter: Highlighter::default(),
            gutter: GutterRenderer::new(metrics, GutterColors::default()),
            viewport: ViewportState::new(block_height, 0.0),
            pending: Vec::new(),
        };
        surface.sync_block_count();
        surface.rehighlight_all();
        surface
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for metadata (path, title). Text edits must go through
    /// the surface so observers see them.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn gutter(&self) -> &GutterRenderer {
        &self.gutter
    }

    pub fn gutter_width(&self) -> f32 {
        self.gutter.compute_width()
    }

    /// Requests for the host, oldest first. Clears the queue.
    pub fn take_requests(&mut self) -> Vec<SurfaceRequest> {
        std::mem::take(&mut self.pending)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn route(&mut self, requests: RequestQueue) {
        for request in requests {
            match request {
                SurfaceRequest::SetBlockFormats { block, spans } => {
                    self.document.set_block_formats(block, spans);
                }
                other => self.pending.push(other),
            }
        }
    }

    fn dispatch_edit(&mut self, change: BlockChange) {
        tracing::trace!(
            "Edit at block {}: {} -> {} blocks",
            change.first,
            change.removed,
            change.inserted
        );
        let mut requests = RequestQueue::new();
        if change.changes_block_count() {
            self.viewport
                .apply_block_change(change.first, change.removed, change.inserted);
            let count = self.document.block_count();
            self.viewport.set_block_count(count);
            self.gutter.on_block_count_changed(count, &mut requests);
        }
        self.highlighter
            .on_text_changed(&self.document, change.changed_range(), &mut requests);
        if let Some(rect) = self.edit_region(change) {
            self.gutter.on_viewport_scrolled(rect, 0.0, &mut requests);
        }
        self.route(requests);
    }

    /// Gutter rows whose numbers or colors may differ after `change`.
    /// When blocks were added or removed, every row below the edit shifts.
    fn edit_region(&self, change: BlockChange) -> Option<PixelRect> {
        let count = self.document.block_count();
        let top = (change.first..count).find_map(|b| self.viewport.block_top(b))?;
        let bottom = if change.changes_block_count() {
            self.viewport.height()
        } else {
            let last = change.changed_range().end.saturating_sub(1).max(change.first);
            self.viewport
                .block_top(last)
                .map_or(top, |t| t + ViewportSource::block_height(&self.viewport, last))
        };
        let top = top.max(0.0);
        let bottom = bottom.min(self.viewport.height());
        (bottom > top).then(|| PixelRect::new(0.0, top, self.gutter.compute_width(), bottom - top))
    }

    fn dispatch_scroll(&mut self, scrolled: f32) {
        if scrolled == 0.0 {
            return;
        }
        // Content moves opposite to the scroll direction
        let dy = -scrolled;
        let rect = self.viewport.rect(self.gutter.compute_width());
        let mut requests = RequestQueue::new();
        self.highlighter.on_viewport_scrolled(rect, dy, &mut requests);
        self.gutter.on_viewport_scrolled(rect, dy, &mut requests);
        self.route(requests);
    }

    fn request_full_gutter_paint(&mut self) {
        let rect = self.viewport.rect(self.gutter.compute_width());
        self.pending.push(SurfaceRequest::PaintRegion(rect));
    }

    fn sync_block_count(&mut self) {
        let count = self.document.block_count();
        self.viewport.set_block_count(count);
        let mut requests = RequestQueue::new();
        self.gutter.on_block_count_changed(count, &mut requests);
        self.route(requests);
    }

    fn rehighlight_all(&mut self) {
        let mut requests = RequestQueue::new();
        self.highlighter.rehighlight_all(&self.document, &mut requests);
        self.route(requests);
    }

    // ── Editing ──────────────────────────────────────────────────────

    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        let change = self.document.insert_text(text)?;
        self.dispatch_edit(change);
        Ok(())
    }

    pub fn insert_newline(&mut self) -> Result<()> {
        self.insert_text("\n")
    }

    pub fn backspace(&mut self) -> Result<()> {
        if let Some(change) = self.document.backspace()? {
            self.dispatch_edit(change);
        }
        Ok(())
    }

    pub fn delete_forward(&mut self) -> Result<()> {
        if let Some(change) = self.document.delete_forward()? {
            self.dispatch_edit(change);
        }
        Ok(())
    }

    /// Replaces the selection with `text` (inserts at the cursor if none).
    pub fn replace_selection(&mut self, text: &str) -> Result<()> {
        self.insert_text(text)
    }

    /// Replaces the char range `[start..end)` without moving the cursor
    /// past the document end.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        let change = self.document.replace_range(start, end, text)?;
        let pos = self.document.cursor.position;
        self.document.set_cursor(pos, false);
        self.dispatch_edit(change);
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let change = self.document.set_text(text)?;
        self.dispatch_edit(change);
        self.viewport.scroll_to(0.0);
        self.request_full_gutter_paint();
        Ok(())
    }

    /// Reverts the latest undo step. Returns `false` if there was none.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(ops) = self.document.history.undo() else {
            return Ok(false);
        };
        let steps = ops.iter().rev().map(|op| {
            let end = op.position + op.inserted.chars().count();
            (op.position, end, op.deleted.as_str())
        });
        self.replay(steps)?;
        if let Some(first) = ops.first() {
            self.document.set_cursor(first.cursor_before, false);
        }
        Ok(true)
    }

    /// Reapplies the latest undone step. Returns `false` if there was none.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(ops) = self.document.history.redo() else {
            return Ok(false);
        };
        let steps = ops.iter().map(|op| {
            let end = op.position + op.deleted.chars().count();
            (op.position, end, op.inserted.as_str())
        });
        self.replay(steps)?;
        if let Some(last) = ops.last() {
            self.document.set_cursor(last.cursor_after, false);
        }
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.document.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.history.can_redo()
    }

    /// Applies history edits without recording them, notifying observers
    /// after each one.
    fn replay<'a>(&mut self, steps: impl Iterator<Item = (usize, usize, &'a str)>) -> Result<()> {
        self.document.history.pause_recording();
        let mut result = Ok(());
        for (start, end, text) in steps {
            match self.document.replace_range(start, end, text) {
                Ok(change) => self.dispatch_edit(change),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.document.history.resume_recording();
        result
    }

    // ── Cursor ───────────────────────────────────────────────────────

    pub fn move_cursor(&mut self, motion: CursorMotion, extend: bool) {
        self.document.move_cursor(motion, extend);
    }

    pub fn set_cursor(&mut self, pos: Position, extend: bool) {
        self.document.set_cursor(pos, extend);
    }

    pub fn select_range(&mut self, start: usize, end: usize) {
        self.document.select_range(start, end);
    }

    // ── Viewport ─────────────────────────────────────────────────────

    /// Scrolls by `delta` pixels (positive = down the document).
    pub fn scroll_by(&mut self, delta: f32) {
        let scrolled = self.viewport.scroll_by(delta);
        self.dispatch_scroll(scrolled);
    }

    /// Scrolls so that `block` is at the top, as far as the range allows.
    pub fn scroll_to_block(&mut self, block: usize) {
        let Some(top) = self.viewport.block_top(block) else {
            return;
        };
        let scrolled = self.viewport.scroll_to(self.viewport.scroll_y() + top);
        self.dispatch_scroll(scrolled);
    }

    pub fn ensure_cursor_visible(&mut self) {
        let line = self.document.cursor.position.line;
        let scrolled = self.viewport.ensure_visible(line);
        self.dispatch_scroll(scrolled);
    }

    pub fn resize_viewport(&mut self, height: f32) {
        if self.viewport.height() == height && self.gutter.height() == height {
            return;
        }
        self.viewport.resize(height);
        self.gutter.set_height(height);
        self.request_full_gutter_paint();
    }

    pub fn set_block_height(&mut self, block_height: f32) {
        self.viewport.set_block_height(block_height);
        self.request_full_gutter_paint();
    }

    /// Replaces the gutter font metrics, invalidating geometry if the width changed.
    pub fn set_gutter_metrics(&mut self, metrics: GutterMetrics) {
        if self.gutter.set_metrics(metrics) {
            self.pending.push(SurfaceRequest::GeometryInvalidated);
        }
    }

    pub fn set_gutter_colors(&mut self, colors: GutterColors) {
        if self.gutter.colors() != colors {
            self.gutter.set_colors(colors);
            self.request_full_gutter_paint();
        }
    }

    /// Collapses or expands a block.
    pub fn set_block_hidden(&mut self, block: usize, hidden: bool) {
        if self.viewport.set_hidden(block, hidden) {
            self.request_full_gutter_paint();
        }
    }

    // ── Highlighting ─────────────────────────────────────────────────

    pub fn set_syntax_theme(&mut self, theme: SyntaxTheme) {
        self.highlighter.set_theme(theme);
        self.rehighlight_all();
    }

    pub fn load_syntax_theme(&mut self, path: &Path) {
        self.highlighter.load_theme(path);
        self.rehighlight_all();
    }

    /// Looks up the document's language and loads its syntax theme.
    /// Returns the language label.
    pub fn apply_language(&mut self, registry: &LanguageRegistry) -> &str {
        let lang = registry.resolve(self.document.file_path.as_deref());
        tracing::debug!(
            "Language for {}: {} ({})",
            self.document.title,
            lang.name,
            lang.theme_path.display()
        );
        self.load_syntax_theme(&lang.theme_path);
        self.document.language = lang.name;
        &self.document.language
    }

    pub fn block_runs(&self, block: usize) -> Vec<StyledRun> {
        self.document.block_runs(block)
    }

    // ── Gutter ───────────────────────────────────────────────────────

    pub fn paint_gutter(&self, rect: PixelRect, canvas: &mut dyn GutterCanvas) {
        self.gutter.paint(&self.viewport, rect, canvas);
    }

    pub fn apply_gutter_repaint(&self, repaint: GutterRepaint, canvas: &mut dyn GutterCanvas) {
        self.gutter.apply(repaint, &self.viewport, canvas);
    }

    /// Whether the gutter width changed since the last call.
    pub fn take_gutter_dirty(&mut self) -> bool {
        self.gutter.take_dirty()
    }

    // ── Status ───────────────────────────────────────────────────────

    pub fn status(&self) -> StatusInfo {
        let pos = self.document.cursor.position;
        StatusInfo {
            line: pos.line + 1,
            column: pos.col + 1,
            char_count: self.document.buffer.len_chars(),
            language: self.document.language.clone(),
        }
    }

    pub fn first_visible_block(&self) -> usize {
        self.viewport.first_visible_block()
    }
}
