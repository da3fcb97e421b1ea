//! The selection state machine.
//!
//! [`SelectionEngine`] is the sole mutator of the active cell and selection
//! range. Pointer and keyboard events arrive as already-resolved operations
//! (the browser shell in `viewer` does hit testing and coordinate mapping);
//! every committed transition synchronously notifies registered observers,
//! exactly once.

pub mod autoscroll;
mod keyboard;

pub use keyboard::NavKey;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::types::{CellPosition, CellRange, DragKind, SelectionKind};

/// Observer invoked with the new selection range (or `None` on clear).
pub type SelectionObserver = Box<dyn FnMut(Option<CellRange>)>;
/// Observer invoked with the new active cell (or `None` on clear).
pub type ActiveObserver = Box<dyn FnMut(Option<CellPosition>)>;

/// Event-driven selection state machine over a fixed-size grid.
///
/// States are implicit in `(active_cell, selection, drag)`. The gesture kind
/// is a single enum field, so conflicting gestures (say, a row-header and a
/// column-header drag at once) cannot be represented.
pub struct SelectionEngine {
    config: EngineConfig,
    active_cell: Option<CellPosition>,
    selection: Option<CellRange>,
    kind: SelectionKind,
    drag: DragKind,
    selection_observers: Vec<SelectionObserver>,
    active_observers: Vec<ActiveObserver>,
}

impl SelectionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active_cell: None,
            selection: None,
            kind: SelectionKind::default(),
            drag: DragKind::None,
            selection_observers: Vec::new(),
            active_observers: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn active_cell(&self) -> Option<CellPosition> {
        self.active_cell
    }

    pub fn selection(&self) -> Option<CellRange> {
        self.selection
    }

    pub fn selection_kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn drag_kind(&self) -> DragKind {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_cell_selected(&self, row: u32, col: u32) -> bool {
        self.selection.is_some_and(|range| range.contains(row, col))
    }

    /// Register an observer for committed selection-range changes.
    pub fn observe_selection(&mut self, observer: impl FnMut(Option<CellRange>) + 'static) {
        self.selection_observers.push(Box::new(observer));
    }

    /// Register an observer for committed active-cell changes.
    pub fn observe_active(&mut self, observer: impl FnMut(Option<CellPosition>) + 'static) {
        self.active_observers.push(Box::new(observer));
    }

    fn clamp(&self, row: u32, col: u32) -> CellPosition {
        CellPosition {
            row: row.min(self.config.last_row()),
            col: col.min(self.config.last_col()),
        }
    }

    /// Commit a transition, notifying each observer list only when its value
    /// actually changed.
    fn commit(
        &mut self,
        selection: Option<CellRange>,
        kind: SelectionKind,
        active: Option<CellPosition>,
    ) {
        let selection_changed = self.selection != selection;
        let active_changed = self.active_cell != active;
        self.selection = selection;
        self.kind = kind;
        self.active_cell = active;
        if selection_changed {
            for observer in &mut self.selection_observers {
                observer(selection);
            }
        }
        if active_changed {
            for observer in &mut self.active_observers {
                observer(active);
            }
        }
    }

    /// Pointer-down on a cell body. Returns the cell to scroll into view for
    /// a fresh (non-extending) selection.
    ///
    /// Ignored entirely while a header drag is in progress - a bubbled
    /// pointer-down must not re-anchor a gesture already underway.
    pub fn pointer_down_cell(&mut self, row: u32, col: u32, shift: bool) -> Option<CellPosition> {
        if matches!(self.drag, DragKind::RowHeader | DragKind::ColumnHeader) {
            return None;
        }
        let cell = self.clamp(row, col);
        self.drag = DragKind::Cell;
        if shift {
            if let Some(existing) = self.selection {
                // Extend from the previous anchor.
                self.commit(
                    Some(existing.with_end(cell)),
                    SelectionKind::CellRange,
                    Some(cell),
                );
                return None;
            }
        }
        self.commit(Some(CellRange::single(cell.row, cell.col)), SelectionKind::CellRange, Some(cell));
        Some(cell)
    }

    /// Pointer-down on a row header: select the full-width row, or extend the
    /// existing range's row span when shift is held.
    pub fn pointer_down_row_header(&mut self, row: u32, shift: bool) {
        let row = row.min(self.config.last_row());
        let last_col = self.config.last_col();
        self.drag = DragKind::RowHeader;
        let range = match self.selection {
            Some(existing) if shift => existing.with_end(CellPosition::new(row, last_col)),
            _ => CellRange::new(
                CellPosition::new(row, 0),
                CellPosition::new(row, last_col),
            ),
        };
        self.commit(Some(range), SelectionKind::RowRange, Some(range.end));
    }

    /// Pointer-down on a column header; symmetric to the row-header case.
    pub fn pointer_down_col_header(&mut self, col: u32, shift: bool) {
        let col = col.min(self.config.last_col());
        let last_row = self.config.last_row();
        self.drag = DragKind::ColumnHeader;
        let range = match self.selection {
            Some(existing) if shift => existing.with_end(CellPosition::new(last_row, col)),
            _ => CellRange::new(
                CellPosition::new(0, col),
                CellPosition::new(last_row, col),
            ),
        };
        self.commit(Some(range), SelectionKind::ColumnRange, Some(range.end));
    }

    /// Corner control: select the whole grid in a single transition. No drag
    /// tracking follows - the range cannot grow past everything.
    pub fn pointer_down_corner(&mut self) {
        self.drag = DragKind::Corner;
        let range = CellRange::new(
            CellPosition::new(0, 0),
            CellPosition::new(self.config.last_row(), self.config.last_col()),
        );
        // The focused cell in a select-all is the origin.
        self.commit(Some(range), SelectionKind::All, Some(range.start));
    }

    /// Commit a new cursor during a drag, respecting the gesture's axis lock.
    /// Returns whether anything changed (no notification on a no-op move).
    pub fn drag_to(&mut self, cell: CellPosition) -> bool {
        let cell = self.clamp(cell.row, cell.col);
        let end = match self.drag {
            DragKind::None | DragKind::Corner => return false,
            DragKind::Cell => cell,
            // Header drags never shrink into the opposite axis.
            DragKind::RowHeader => CellPosition::new(cell.row, self.config.last_col()),
            DragKind::ColumnHeader => CellPosition::new(self.config.last_row(), cell.col),
        };
        let Some(existing) = self.selection else {
            return false;
        };
        if existing.end == end {
            return false;
        }
        self.commit(Some(existing.with_end(end)), self.kind, Some(end));
        true
    }

    /// End the gesture unconditionally.
    pub fn pointer_up(&mut self) {
        self.drag = DragKind::None;
    }

    /// Clear both fields. Suppressed mid-gesture so a stray mouse-up on the
    /// background never wipes an in-progress selection; idempotent otherwise.
    pub fn clear_selection(&mut self) {
        if self.drag.is_active() {
            return;
        }
        if self.selection.is_none() && self.active_cell.is_none() {
            return;
        }
        self.commit(None, SelectionKind::default(), None);
    }

    /// Keyboard navigation. Returns the cell to scroll into view when the key
    /// was handled.
    ///
    /// With no prior selection the first navigation key establishes the
    /// origin. Shift extends the cursor while the anchor stays; otherwise the
    /// selection collapses to the new active cell.
    pub fn key_down(&mut self, key: NavKey, shift: bool, ctrl: bool) -> Option<CellPosition> {
        let Some(current) = self.active_cell else {
            let origin = CellPosition::new(0, 0);
            self.commit(
                Some(CellRange::single(0, 0)),
                SelectionKind::CellRange,
                Some(origin),
            );
            return Some(origin);
        };

        let last_row = self.config.last_row();
        let last_col = self.config.last_col();
        let target = match (key, ctrl) {
            (NavKey::ArrowUp, _) => CellPosition::new(current.row.saturating_sub(1), current.col),
            (NavKey::ArrowDown, _) => CellPosition::new((current.row + 1).min(last_row), current.col),
            (NavKey::ArrowLeft, _) => CellPosition::new(current.row, current.col.saturating_sub(1)),
            (NavKey::ArrowRight, _) => CellPosition::new(current.row, (current.col + 1).min(last_col)),
            (NavKey::Home, false) => CellPosition::new(current.row, 0),
            (NavKey::Home, true) => CellPosition::new(0, 0),
            (NavKey::End, false) => CellPosition::new(current.row, last_col),
            (NavKey::End, true) => CellPosition::new(last_row, last_col),
        };

        let range = if shift {
            let anchor = self
                .selection
                .map_or(current, |existing| existing.start);
            CellRange::new(anchor, target)
        } else {
            CellRange::single(target.row, target.col)
        };
        self.commit(Some(range), SelectionKind::CellRange, Some(target));
        Some(target)
    }
}
