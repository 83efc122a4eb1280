use crate::time::{Cell, Compress, Day, RangeError, TimeRange};
use std::collections::BTreeSet;

/// Whether a drag adds cells to the selection or removes them. Decided at
/// press time by whether the pressed cell was already selected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragMode {
    Select,
    Deselect,
}

/// Gesture state as an explicit value. The anchor, mode and provisional
/// rectangle live here rather than in side-channel mutable cells, so every
/// transition is inspectable.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        mode: DragMode,
        anchor: Cell,
        provisional: BTreeSet<Cell>,
    },
}

/// Display state of a single grid cell, for renderers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellState {
    Unselected,
    Selected,
    /// In the provisional rectangle of a select drag, not yet committed.
    Provisional,
    /// Committed but inside a deselect drag's rectangle.
    PendingDeselect,
}

/// One submitter's in-progress grid selection plus the press-drag-release
/// gesture acting on it. Nothing is persisted until the caller submits the
/// committed set; releasing the pointer is the only mutation of it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    committed: BTreeSet<Cell>,
    gesture: Gesture,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Rebuilds a selection from previously stored range labels, for the
    /// edit-and-resubmit flow.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Selection, RangeError> {
        let mut committed = BTreeSet::new();
        for label in labels {
            let range: TimeRange = label.as_ref().parse()?;
            committed.extend(range.cells());
        }
        Ok(Selection {
            committed,
            gesture: Gesture::Idle,
        })
    }

    /// Pointer pressed on `cell`: enters `Dragging`. The drag deselects if
    /// the cell was already committed, otherwise it selects.
    pub fn press(&mut self, cell: Cell) {
        let mode = if self.committed.contains(&cell) {
            DragMode::Deselect
        } else {
            DragMode::Select
        };
        let mut provisional = BTreeSet::new();
        provisional.insert(cell);
        self.gesture = Gesture::Dragging {
            mode,
            anchor: cell,
            provisional,
        };
    }

    /// Pointer entered `cell` mid-drag: the provisional set becomes the
    /// rectangle spanning the anchor and `cell`. A deselect drag only marks
    /// cells that are actually committed. No-op while idle.
    pub fn pointer_enter(&mut self, cell: Cell) {
        let (mode, anchor) = match &self.gesture {
            Gesture::Dragging { mode, anchor, .. } => (*mode, *anchor),
            Gesture::Idle => return,
        };

        let (day_lo, day_hi) = ordered(anchor.day, cell.day);
        let (slot_lo, slot_hi) = ordered(anchor.slot, cell.slot);

        let rectangle = Day::ALL
            .into_iter()
            .filter(|day| (day_lo..=day_hi).contains(day))
            .flat_map(|day| (slot_lo..=slot_hi).map(move |slot| Cell::new(day, slot)));

        let provisional = match mode {
            DragMode::Select => rectangle.collect(),
            DragMode::Deselect => rectangle
                .filter(|cell| self.committed.contains(cell))
                .collect(),
        };

        self.gesture = Gesture::Dragging {
            mode,
            anchor,
            provisional,
        };
    }

    /// Pointer released: commits the provisional rectangle into the
    /// selection (union for a select drag, difference for a deselect drag)
    /// and returns to `Idle`.
    pub fn release(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Dragging {
                mode, provisional, ..
            } => match mode {
                DragMode::Select => self.committed.extend(provisional),
                DragMode::Deselect => {
                    for cell in &provisional {
                        self.committed.remove(cell);
                    }
                }
            },
        }
    }

    pub fn is_selected(&self, cell: Cell) -> bool {
        self.committed.contains(&cell)
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// How `cell` should currently be drawn, combining the committed set
    /// with any in-flight gesture.
    pub fn cell_state(&self, cell: Cell) -> CellState {
        let committed = self.committed.contains(&cell);
        match &self.gesture {
            Gesture::Dragging {
                mode, provisional, ..
            } if provisional.contains(&cell) => match (*mode, committed) {
                (DragMode::Deselect, _) => CellState::PendingDeselect,
                (DragMode::Select, true) => CellState::Selected,
                (DragMode::Select, false) => CellState::Provisional,
            },
            _ if committed => CellState::Selected,
            _ => CellState::Unselected,
        }
    }

    /// Minimal maximal ranges covering the committed cells.
    pub fn ranges(&self) -> Vec<TimeRange> {
        self.committed.iter().compress()
    }

    /// Formatted range labels, the payload shape stored per submission.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::selection::Selection;
    /// use rota_libs::time::{Cell, Day};
    ///
    /// let mut selection = Selection::new();
    /// selection.press(Cell::new(Day::Monday, 0));
    /// selection.pointer_enter(Cell::new(Day::Monday, 1));
    /// selection.release();
    ///
    /// assert_eq!(selection.range_labels(), vec!["Monday 9:00-10:00"]);
    /// ```
    pub fn range_labels(&self) -> Vec<String> {
        self.ranges().into_iter().map(TimeRange::label).collect()
    }

    /// The committed cells in grid order. Equals the cells of
    /// `ranges().iter().segmented()`, which is what the round-trip
    /// property tests pin down.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.committed.iter().copied()
    }
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
