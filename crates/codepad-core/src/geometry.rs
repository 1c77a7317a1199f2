/// Toolkit-independent pixel rectangle used by the gutter and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the vertical span `[top, bottom)` overlaps this rect's.
    pub fn overlaps_rows(&self, top: f32, bottom: f32) -> bool {
        bottom > self.top() && top < self.bottom()
    }
}
