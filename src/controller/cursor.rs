use super::view::ViewMode;

/// Cursor value meaning "nothing highlighted"
pub const NO_SELECTION: isize = -1;

/// Single highlight index into whichever candidate list is active.
///
/// Invariant: `-1 <= index < count` after every mutation, where `count` is
/// the length passed to that mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCursor {
    index: isize,
    owner: ViewMode,
}

impl Default for SelectionCursor {
    fn default() -> Self {
        SelectionCursor {
            index: NO_SELECTION,
            owner: ViewMode::MainList,
        }
    }
}

impl SelectionCursor {
    pub fn index(&self) -> isize {
        self.index
    }

    pub fn owner(&self) -> ViewMode {
        self.owner
    }

    /// The highlighted position, if any
    pub fn selected(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    /// A cursor issued for another mode is stale and must be ignored
    pub fn is_current(&self, mode: ViewMode) -> bool {
        self.owner == mode
    }

    pub fn move_down(&mut self, count: usize) {
        self.index = (self.index + 1).min(count as isize - 1);
    }

    pub fn move_up(&mut self, count: usize) {
        self.index = if count == 0 {
            NO_SELECTION
        } else {
            (self.index - 1).max(0).min(count as isize - 1)
        };
    }

    /// Back to the resting position for `mode`: the first row while a tag is
    /// being picked, nothing otherwise.
    pub fn reset(&mut self, mode: ViewMode, tag_active: bool, count: usize) {
        self.owner = mode;
        self.index = if tag_active && count > 0 { 0 } else { NO_SELECTION };
    }

    /// Pull the index back inside a list that shrank to `count` while the
    /// highlight should survive. The controller never needs this: it always
    /// refilters through a full [`reset`](Self::reset).
    pub fn clamp_to(&mut self, count: usize) {
        if self.index >= count as isize {
            self.index = count as isize - 1;
        }
    }

    /// Point at `index` (pointer hover). Out-of-range positions are ignored.
    pub fn set(&mut self, index: usize, count: usize) -> bool {
        if index < count {
            self.index = index as isize;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.index = NO_SELECTION;
    }
}

/// Request for a list view to bring a row into view.
///
/// Only honored by the view whose mode matches `mode`; a scroll issued just
/// before a mode switch is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub index: usize,
    pub mode: ViewMode,
}
