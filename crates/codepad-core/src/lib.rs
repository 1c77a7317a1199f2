//! Editor core: text model, rule-based highlighting and the line-number
//! gutter, connected through an observer interface with no toolkit types.

pub mod buffer;
pub mod cursor;
pub mod document;
pub mod geometry;
pub mod gutter;
pub mod highlight;
pub mod history;
pub mod observer;
pub mod search;
pub mod surface;
pub mod viewport;

pub use document::{BlockChange, CursorMotion, Document};
pub use geometry::PixelRect;
pub use gutter::{GutterCanvas, GutterColors, GutterMetrics, GutterRenderer, GutterRepaint};
pub use highlight::{Highlighter, StyleSpan, StyledRun};
pub use history::{EditOperation, UndoManager};
pub use observer::{RequestQueue, SurfaceObserver, SurfaceRequest, TextBlocks};
pub use surface::{EditorSurface, StatusInfo};
pub use viewport::{ViewportSource, ViewportState};
