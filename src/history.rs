use std::sync::Arc;

use image::RgbaImage;

use crate::error::{Result, WhiteboardError};
use crate::surface::Surface;

/// A PNG-encoded copy of the whole surface at one instant.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    pub fn capture(surface: &Surface) -> Result<Self> {
        Ok(Self::from_png(surface.encode_png()?))
    }

    pub fn from_png(png: Vec<u8>) -> Self {
        Self { png: png.into() }
    }

    pub fn decode(&self) -> Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .map_err(WhiteboardError::Decode)?;
        Ok(image.to_rgba8())
    }

    pub fn byte_len(&self) -> usize {
        self.png.len()
    }
}

/// Snapshot-based undo/redo.
///
/// The bottom of the undo stack is always the pristine surface, so the stack is
/// never empty and undoing past it does nothing. The top of the undo stack is
/// the state currently shown.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl SnapshotHistory {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            undo_stack: vec![initial],
            redo_stack: Vec::new(),
        }
    }

    /// Record a committed operation. Any redo branch is discarded.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if !self.redo_stack.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Step back one entry and return the snapshot that should now be shown.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        let undone = self.undo_stack.pop()?;
        self.redo_stack.push(undone);
        self.undo_stack.last().cloned()
    }

    /// Step forward one entry and return the snapshot that should now be shown.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let redone = self.redo_stack.pop()?;
        self.undo_stack.push(redone.clone());
        Some(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    /// Total encoded size of all entries.
    pub fn byte_len(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(&self.redo_stack)
            .map(Snapshot::byte_len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> Snapshot {
        Snapshot::from_png(vec![tag])
    }

    #[test]
    fn test_undo_at_bottom_is_noop() {
        let mut history = SnapshotHistory::new(snap(0));
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.undo(), None);
        assert_eq!(history.undo_stack().len(), 1);
        assert!(history.redo_stack().is_empty());
    }

    #[test]
    fn test_undo_redo_walks_the_stack() {
        let mut history = SnapshotHistory::new(snap(0));
        history.push(snap(1));
        history.push(snap(2));

        assert_eq!(history.undo(), Some(snap(1)));
        assert_eq!(history.undo(), Some(snap(0)));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo_stack().len(), 2);

        assert_eq!(history.redo(), Some(snap(1)));
        assert_eq!(history.redo(), Some(snap(2)));
        assert_eq!(history.redo(), None);
        assert_eq!(history.undo_stack().last(), Some(&snap(2)));
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = SnapshotHistory::new(snap(0));
        history.push(snap(1));
        history.push(snap(2));
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.push(snap(3));

        assert!(!history.can_redo());
        assert_eq!(history.undo_stack(), &[snap(0), snap(3)]);
    }
}
