//! Drag-and-drop row reordering.
//!
//! The controller owns no rows. It re-splices [`Ledger`] rows in place while a drag is active
//! and reports when the final order needs persisting. Row geometry is an input supplied by
//! whatever draws the grid, listed in the ledger's current row order.

use crate::ledger::Ledger;

/// Vertical placement of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBox {
    pub top: f64,
    pub height: f64,
}

impl RowBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// `count` rows of equal `height` stacked from y = 0.
    pub fn uniform(count: usize, height: f64) -> Vec<RowBox> {
        (0..count)
            .map(|index| RowBox::new(index as f64 * height, height))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
    },
}

#[derive(Debug, Default)]
pub struct ReorderController {
    state: DragState,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Current index of the row being dragged.
    pub fn dragging(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { index } => Some(index),
            DragState::Idle => None,
        }
    }

    /// Marks `index` as the drag subject. Out-of-range indices leave the controller idle.
    pub fn drag_start(&mut self, index: usize, row_count: usize) -> bool {
        if index >= row_count {
            tracing::debug!(index, row_count, "ignoring drag start outside the grid");
            return false;
        }
        self.state = DragState::Dragging { index };
        true
    }

    /// Repositions the dragged row for a pointer at `pointer_y`.
    ///
    /// Returns the row's new index when the order changed. Idle controllers, layouts that do
    /// not describe every row and non-finite pointers are ignored.
    pub fn drag_over(
        &mut self,
        ledger: &mut Ledger,
        layout: &[RowBox],
        pointer_y: f64,
    ) -> Option<usize> {
        let dragged = self.dragging()?;
        if layout.len() != ledger.len() || dragged >= ledger.len() || !pointer_y.is_finite() {
            return None;
        }
        let target = insertion_target(layout, dragged, pointer_y);
        let destination = destination_index(dragged, target, ledger.len());
        if destination == dragged {
            return None;
        }
        ledger.move_row(dragged, destination).ok()?;
        self.state = DragState::Dragging { index: destination };
        tracing::debug!(from = dragged, to = destination, "row repositioned");
        Some(destination)
    }

    /// Ends the drag. Returns the final index when a drag was active, meaning the order
    /// should now be persisted.
    pub fn drag_end(&mut self) -> Option<usize> {
        let finished = self.dragging();
        self.state = DragState::Idle;
        finished
    }

    /// Abandons any drag without reporting a final order.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Picks the sibling the dragged row should land in front of: among rows other than
/// `dragged`, the one whose midpoint lies below the pointer by the smallest distance.
/// `None` means the pointer is below every sibling.
pub fn insertion_target(layout: &[RowBox], dragged: usize, pointer_y: f64) -> Option<usize> {
    let mut closest: Option<(usize, f64)> = None;
    for (index, row) in layout.iter().enumerate() {
        if index == dragged {
            continue;
        }
        let offset = pointer_y - row.midpoint();
        if offset < 0.0 && closest.map_or(true, |(_, best)| offset > best) {
            closest = Some((index, offset));
        }
    }
    closest.map(|(index, _)| index)
}

/// Index the dragged row occupies after being placed before `target` (or at the end).
pub fn destination_index(dragged: usize, target: Option<usize>, len: usize) -> usize {
    match target {
        Some(target) if target > dragged => target - 1,
        Some(target) => target,
        None => len.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerRow;

    const ROW_HEIGHT: f64 = 30.0;

    fn lettered(count: usize) -> Ledger {
        let rows = (0..count)
            .map(|i| LedgerRow::new(((b'A' + i as u8) as char).to_string(), [i as f64]))
            .collect();
        Ledger::with_rows(2026, rows)
    }

    fn order(ledger: &Ledger) -> String {
        ledger.rows().iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn target_is_first_midpoint_below_pointer() {
        let layout = RowBox::uniform(4, ROW_HEIGHT);
        // midpoints: 15, 45, 75, 105
        assert_eq!(insertion_target(&layout, 3, 10.0), Some(0));
        assert_eq!(insertion_target(&layout, 3, 44.0), Some(1));
        assert_eq!(insertion_target(&layout, 0, 50.0), Some(2));
        assert_eq!(insertion_target(&layout, 0, 200.0), None);
        // exactly on a midpoint counts as passed
        assert_eq!(insertion_target(&layout, 3, 45.0), Some(2));
    }

    #[test]
    fn dragged_row_is_never_its_own_target() {
        let layout = RowBox::uniform(3, ROW_HEIGHT);
        assert_eq!(insertion_target(&layout, 1, 40.0), Some(2));
    }

    #[test]
    fn dragging_last_row_to_top() {
        let mut ledger = lettered(3);
        let mut controller = ReorderController::new();
        assert!(controller.drag_start(2, ledger.len()));
        let layout = RowBox::uniform(3, ROW_HEIGHT);
        assert_eq!(controller.drag_over(&mut ledger, &layout, 5.0), Some(0));
        assert_eq!(order(&ledger), "CAB");
        assert_eq!(controller.dragging(), Some(0));
        assert_eq!(controller.drag_end(), Some(0));
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn moving_below_everything_appends() {
        let mut ledger = lettered(4);
        let mut controller = ReorderController::new();
        controller.drag_start(0, ledger.len());
        let layout = RowBox::uniform(4, ROW_HEIGHT);
        assert_eq!(controller.drag_over(&mut ledger, &layout, 500.0), Some(3));
        assert_eq!(order(&ledger), "BCDA");
    }

    #[test]
    fn hovering_over_own_slot_changes_nothing() {
        let mut ledger = lettered(3);
        let before = ledger.clone();
        let mut controller = ReorderController::new();
        controller.drag_start(1, ledger.len());
        let layout = RowBox::uniform(3, ROW_HEIGHT);
        assert_eq!(controller.drag_over(&mut ledger, &layout, 40.0), None);
        assert_eq!(ledger, before);
        assert_eq!(controller.dragging(), Some(1));
    }

    #[test]
    fn repeated_drag_over_follows_the_pointer() {
        let mut ledger = lettered(4);
        let mut controller = ReorderController::new();
        controller.drag_start(0, ledger.len());
        let layout = RowBox::uniform(4, ROW_HEIGHT);
        controller.drag_over(&mut ledger, &layout, 70.0);
        assert_eq!(order(&ledger), "BACD");
        controller.drag_over(&mut ledger, &layout, 100.0);
        assert_eq!(order(&ledger), "BCAD");
        controller.drag_over(&mut ledger, &layout, 1.0);
        assert_eq!(order(&ledger), "ABCD");
    }

    #[test]
    fn malformed_events_are_no_ops() {
        let mut ledger = lettered(3);
        let before = ledger.clone();
        let mut controller = ReorderController::new();
        let layout = RowBox::uniform(3, ROW_HEIGHT);

        assert_eq!(controller.drag_over(&mut ledger, &layout, 0.0), None);
        assert_eq!(controller.drag_end(), None);
        assert!(!controller.drag_start(7, ledger.len()));

        controller.drag_start(2, ledger.len());
        assert_eq!(controller.drag_over(&mut ledger, &layout[..2], 0.0), None);
        assert_eq!(controller.drag_over(&mut ledger, &layout, f64::NAN), None);
        assert_eq!(ledger, before);
    }

    #[test]
    fn destination_accounts_for_removal() {
        assert_eq!(destination_index(0, Some(2), 4), 1);
        assert_eq!(destination_index(3, Some(1), 4), 1);
        assert_eq!(destination_index(1, None, 4), 3);
    }
}
