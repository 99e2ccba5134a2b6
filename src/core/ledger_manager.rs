use crate::{
    config::Config,
    errors::Result,
    ledger::{AggregateSnapshot, Column, Ledger, LedgerRow, MONTHS},
    storage::{read_typed, write_json, KeyValueStore, StorageKeys},
};

use super::{
    reorder::{DragState, ReorderController, RowBox},
    services::SummaryService,
};

/// Receives the ledger and fresh totals after every change. Rendering layers implement this
/// and never write back.
pub trait LedgerObserver: Send {
    fn ledger_changed(&mut self, ledger: &Ledger, snapshot: &AggregateSnapshot);
}

/// Facade that owns the active year's ledger, its totals, the drag state and persistence.
///
/// Every mutation recomputes the snapshot, persists where required and notifies observers
/// before returning, so callers always observe a consistent state.
pub struct LedgerManager {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
    ledger: Ledger,
    snapshot: AggregateSnapshot,
    reorder: ReorderController,
    active_tab: String,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl LedgerManager {
    /// Loads `year` and restores the persisted tab (or `default_tab`).
    pub fn open(
        store: Box<dyn KeyValueStore>,
        keys: StorageKeys,
        year: i32,
        default_tab: &str,
    ) -> Self {
        let ledger = Ledger::load(store.as_ref(), &keys, year);
        let snapshot = SummaryService::compute(&ledger);
        let active_tab = read_typed::<String>(store.as_ref(), keys.tab_key())
            .unwrap_or_else(|| default_tab.to_string());
        Self {
            store,
            keys,
            ledger,
            snapshot,
            reorder: ReorderController::new(),
            active_tab,
            observers: Vec::new(),
        }
    }

    pub fn with_config(store: Box<dyn KeyValueStore>, config: &Config, year: i32) -> Self {
        Self::open(store, config.storage_keys(), year, &config.default_tab)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn year(&self) -> i32 {
        self.ledger.year()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn snapshot(&self) -> &AggregateSnapshot {
        &self.snapshot
    }

    /// The twelve values the monthly chart plots.
    pub fn chart_series(&self) -> [f64; MONTHS] {
        self.snapshot.month_totals
    }

    pub fn drag_state(&self) -> DragState {
        self.reorder.state()
    }

    /// Registers an observer and hands it the current state right away.
    pub fn subscribe(&mut self, mut observer: Box<dyn LedgerObserver>) {
        observer.ledger_changed(&self.ledger, &self.snapshot);
        self.observers.push(observer);
    }

    /// Drops the current year from memory and loads `year`. Nothing is written: the previous
    /// year was persisted as it changed. Any drag in progress is abandoned.
    pub fn switch_year(&mut self, year: i32) {
        self.reorder.cancel();
        self.ledger = Ledger::load(self.store.as_ref(), &self.keys, year);
        tracing::debug!(year, rows = self.ledger.len(), "switched year");
        self.refresh();
    }

    /// Re-reads the active year from the store.
    pub fn reload(&mut self) {
        self.switch_year(self.ledger.year());
    }

    /// Appends a row and persists. Returns the new row's index.
    pub fn add_row(&mut self, initial: Option<LedgerRow>) -> Result<usize> {
        let index = self.ledger.add_row(initial);
        self.commit()?;
        Ok(index)
    }

    /// Applies one cell edit and persists. Invalid addresses change nothing.
    pub fn set_cell(&mut self, row: usize, column: Column, input: &str) -> Result<()> {
        self.ledger.set_cell(row, column, input)?;
        self.commit()
    }

    pub fn begin_drag(&mut self, index: usize) -> bool {
        self.reorder.drag_start(index, self.ledger.len())
    }

    /// Live reposition of the dragged row. Totals are refreshed but nothing is persisted
    /// until [`LedgerManager::end_drag`].
    pub fn drag_over(&mut self, layout: &[RowBox], pointer_y: f64) -> Option<usize> {
        let moved = self.reorder.drag_over(&mut self.ledger, layout, pointer_y);
        if moved.is_some() {
            self.refresh();
        }
        moved
    }

    /// Finishes a drag and persists the resulting order. Returns `false` when no drag was
    /// active.
    pub fn end_drag(&mut self) -> Result<bool> {
        match self.reorder.drag_end() {
            Some(index) => {
                tracing::debug!(year = self.year(), index, "drag finished");
                self.ledger.persist(self.store.as_ref(), &self.keys)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves a row in one step and persists, for hosts without pointer geometry.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<()> {
        self.reorder.cancel();
        self.ledger.move_row(from, to)?;
        self.commit()
    }

    /// Deletes the stored data for the active year and reloads it as a fresh year.
    /// Without confirmation this is a no-op returning `false`.
    pub fn clear_year(&mut self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            tracing::debug!(year = self.year(), "clear declined");
            return Ok(false);
        }
        Ledger::clear(self.store.as_ref(), &self.keys, self.year())?;
        self.reload();
        Ok(true)
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub fn select_tab(&mut self, tab: impl Into<String>) -> Result<()> {
        self.active_tab = tab.into();
        write_json(self.store.as_ref(), self.keys.tab_key(), &self.active_tab)
    }

    /// Recompute, persist, then notify. Observers hear about the change even when the write
    /// fails, because the in-memory ledger has already moved on.
    fn commit(&mut self) -> Result<()> {
        self.snapshot = SummaryService::compute(&self.ledger);
        let persisted = self.ledger.persist(self.store.as_ref(), &self.keys);
        self.notify();
        persisted
    }

    fn refresh(&mut self) {
        self.snapshot = SummaryService::compute(&self.ledger);
        self.notify();
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.ledger_changed(&self.ledger, &self.snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(i32, usize, f64)>>>,
    }

    impl LedgerObserver for Recorder {
        fn ledger_changed(&mut self, ledger: &Ledger, snapshot: &AggregateSnapshot) {
            self.calls
                .lock()
                .unwrap()
                .push((ledger.year(), ledger.len(), snapshot.year_total));
        }
    }

    fn manager() -> LedgerManager {
        LedgerManager::open(
            Box::new(MemoryStore::new()),
            StorageKeys::default(),
            2026,
            "ledger",
        )
    }

    #[test]
    fn observers_see_every_mutation() {
        let mut manager = manager();
        let recorder = Recorder::default();
        manager.subscribe(Box::new(recorder.clone()));
        manager.set_cell(0, Column::Month(0), "250").unwrap();
        manager.add_row(None).unwrap();
        manager.switch_year(2025);
        let calls = recorder.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (2026, 1, 0.0),
                (2026, 1, 250.0),
                (2026, 2, 250.0),
                (2025, 1, 0.0)
            ]
        );
    }

    #[test]
    fn rejected_edit_does_not_notify() {
        let mut manager = manager();
        let recorder = Recorder::default();
        manager.subscribe(Box::new(recorder.clone()));
        assert!(manager.set_cell(5, Column::Description, "x").is_err());
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn drag_persists_only_on_end() {
        let mut manager = manager();
        manager.set_cell(0, Column::Description, "first").unwrap();
        manager
            .add_row(Some(LedgerRow::new("second", [1.0])))
            .unwrap();
        let key = manager.keys().year_key(2026);
        let stored_before = manager.store().get(&key).unwrap();

        assert!(manager.begin_drag(1));
        let layout = RowBox::uniform(2, 20.0);
        assert_eq!(manager.drag_over(&layout, 2.0), Some(0));
        assert_eq!(manager.snapshot().row_totals, vec![1.0, 0.0]);
        assert_eq!(manager.store().get(&key).unwrap(), stored_before);

        assert!(manager.end_drag().unwrap());
        let reloaded = Ledger::load(manager.store(), manager.keys(), 2026);
        assert_eq!(&reloaded, manager.ledger());
        assert!(!manager.end_drag().unwrap());
    }

    #[test]
    fn switching_year_abandons_drag() {
        let mut manager = manager();
        manager.begin_drag(0);
        manager.switch_year(2027);
        assert_eq!(manager.drag_state(), DragState::Idle);
        assert_eq!(manager.year(), 2027);
    }

    #[test]
    fn tab_selection_survives_reopen() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = LedgerManager::open(
            Box::new(store.clone()),
            StorageKeys::default(),
            2026,
            "ledger",
        );
        assert_eq!(manager.active_tab(), "ledger");
        manager.select_tab("goals").unwrap();
        let reopened = LedgerManager::open(
            Box::new(store),
            StorageKeys::default(),
            2026,
            "ledger",
        );
        assert_eq!(reopened.active_tab(), "goals");
    }
}
