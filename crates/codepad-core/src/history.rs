//! In-memory undo/redo history.
//!
//! Edits that arrive within the grouping timeout of each other form one
//! undo step, so undoing a typed word removes the whole word rather than
//! a single character.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::cursor::Position;

const DEFAULT_MAX_DEPTH: usize = 1_000;
const DEFAULT_GROUP_TIMEOUT: Duration = Duration::from_millis(500);

/// One text replacement: `deleted` at char `position` became `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub position: usize,
    pub inserted: String,
    pub deleted: String,
    pub cursor_before: Position,
    pub cursor_after: Position,
}

/// Edits undone and redone together.
#[derive(Debug, Clone, Default)]
struct EditGroup {
    operations: Vec<EditOperation>,
}

#[derive(Debug)]
pub struct UndoManager {
    undo_stack: VecDeque<EditGroup>,
    redo_stack: Vec<EditGroup>,
    recording: bool,
    last_edit_time: Option<Instant>,
    group_timeout: Duration,
    max_depth: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_GROUP_TIMEOUT)
    }
}

impl UndoManager {
    pub fn new(max_depth: usize, group_timeout: Duration) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            recording: true,
            last_edit_time: None,
            group_timeout,
            max_depth: max_depth.max(1),
        }
    }

    /// Records an edit. Clears the redo stack.
    pub fn record(&mut self, op: EditOperation) {
        if !self.recording {
            return;
        }
        self.redo_stack.clear();

        let now = Instant::now();
        let extends_group = self
            .last_edit_time
            .is_some_and(|t| now.duration_since(t) < self.group_timeout);
        self.last_edit_time = Some(now);

        match self.undo_stack.back_mut() {
            Some(group) if extends_group => group.operations.push(op),
            _ => {
                self.undo_stack.push_back(EditGroup {
                    operations: vec![op],
                });
                if self.undo_stack.len() > self.max_depth {
                    self.undo_stack.pop_front();
                }
            }
        }
    }

    /// Makes the next recorded edit start a new undo step.
    pub fn force_group_break(&mut self) {
        self.last_edit_time = None;
    }

    /// Pops the latest step. Its operations are in the order they were made.
    pub fn undo(&mut self) -> Option<Vec<EditOperation>> {
        let group = self.undo_stack.pop_back()?;
        let ops = group.operations.clone();
        self.redo_stack.push(group);
        self.last_edit_time = None;
        Some(ops)
    }

    pub fn redo(&mut self) -> Option<Vec<EditOperation>> {
        let group = self.redo_stack.pop()?;
        let ops = group.operations.clone();
        self.undo_stack.push_back(group);
        self.last_edit_time = None;
        Some(ops)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Stops recording, used while replaying history into the buffer.
    pub fn pause_recording(&mut self) {
        self.recording = false;
    }

    pub fn resume_recording(&mut self) {
        self.recording = true;
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_edit_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(position: usize, inserted: &str, deleted: &str) -> EditOperation {
        EditOperation {
            position,
            inserted: inserted.to_string(),
            deleted: deleted.to_string(),
            cursor_before: Position::new(0, position),
            cursor_after: Position::new(0, position + inserted.len()),
        }
    }

    #[test]
    fn test_undo_redo_basic() {
        let mut mgr = UndoManager::default();
        mgr.record(op(0, "a", ""));
        mgr.force_group_break();
        mgr.record(op(1, "b", ""));

        let ops = mgr.undo().unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].inserted, "b");

        assert!(mgr.can_redo());
        let ops = mgr.redo().unwrap();
        assert_eq!(ops[0].inserted, "b");
        assert!(!mgr.can_redo());
    }

    #[test]
    fn test_edits_within_timeout_are_grouped() {
        let mut mgr = UndoManager::default();
        mgr.record(op(0, "a", ""));
        mgr.record(op(1, "b", ""));

        assert_eq!(mgr.undo().unwrap().len(), 2);
        assert!(!mgr.can_undo());
    }

    #[test]
    fn test_zero_timeout_never_groups() {
        let mut mgr = UndoManager::new(10, Duration::ZERO);
        mgr.record(op(0, "a", ""));
        mgr.record(op(1, "b", ""));
        assert_eq!(mgr.undo().unwrap().len(), 1);
        assert!(mgr.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut mgr = UndoManager::default();
        mgr.record(op(0, "a", ""));
        mgr.undo();
        assert!(mgr.can_redo());
        mgr.record(op(0, "c", ""));
        assert!(!mgr.can_redo());
    }

    #[test]
    fn test_paused_edits_are_not_recorded() {
        let mut mgr = UndoManager::default();
        mgr.pause_recording();
        mgr.record(op(0, "a", ""));
        assert!(!mgr.can_undo());
        mgr.resume_recording();
        mgr.record(op(0, "b", ""));
        assert!(mgr.can_undo());
    }

    #[test]
    fn test_depth_limit_drops_oldest() {
        let mut mgr = UndoManager::new(2, Duration::ZERO);
        for (i, text) in ["a", "b", "c"].into_iter().enumerate() {
            mgr.record(op(i, text, ""));
        }
        assert_eq!(mgr.undo().unwrap()[0].inserted, "c");
        assert_eq!(mgr.undo().unwrap()[0].inserted, "b");
        assert!(mgr.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut mgr = UndoManager::default();
        mgr.record(op(0, "a", ""));
        mgr.clear();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
    }
}
