//! Linear undo history.
//!
//! Frames are immutable [`Document`] snapshots shared through [`Arc`]. The
//! cursor points at the present frame; pushing after an undo discards the
//! frames ahead of the cursor.

use std::sync::Arc;

use define_model::Document;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    frames: Vec<Arc<Document>>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Start a history with `initial` as its only frame. A limit of zero is
    /// treated as one.
    pub fn new(initial: Document, limit: usize) -> Self {
        Self {
            frames: vec![Arc::new(initial)],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn present(&self) -> &Arc<Document> {
        &self.frames[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn frames(&self) -> &[Arc<Document>] {
        &self.frames
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.frames.len()
    }

    /// Append a frame after the cursor, dropping any redo frames and the
    /// oldest frames beyond the limit.
    pub fn push(&mut self, document: Document) {
        self.frames.truncate(self.cursor + 1);
        self.frames.push(Arc::new(document));
        if self.frames.len() > self.limit {
            let excess = self.frames.len() - self.limit;
            self.frames.drain(..excess);
        }
        self.cursor = self.frames.len() - 1;
    }

    /// Replace all frames with a single one.
    pub fn reset(&mut self, document: Document) {
        self.frames = vec![Arc::new(document)];
        self.cursor = 0;
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
