//! Lock-free, read-mostly holder for the currently loaded [`MetricTable`].
//!
//! Readers call [`SnapshotStore::load`] which hands out an `Arc<MetricTable>`
//! with no locking. A data refresh calls [`SnapshotStore::replace`] to swap in
//! a complete new table atomically; readers see either the old or the new
//! table, never a mix. Tables are never mutated in place.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::models::table::MetricTable;

#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<MetricTable>,
}

impl SnapshotStore {
    pub fn new(table: MetricTable) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Current snapshot. Holding the `Arc` pins that table even if a refresh
    /// replaces it meanwhile.
    pub fn load(&self) -> Arc<MetricTable> {
        self.current.load_full()
    }

    /// Swap in a freshly loaded table and return the one it replaced.
    pub fn replace(&self, table: MetricTable) -> Arc<MetricTable> {
        info!(
            metrics = table.len(),
            days = table.days(),
            last_date = ?table.last_date(),
            "replacing metric snapshot"
        );
        self.current.swap(Arc::new(table))
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(MetricTable::new())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::series::Series;

    fn table(values: &[f64]) -> MetricTable {
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        MetricTable::new()
            .with("Confirmed Cases", Series::from_values(start, values.iter().copied()).unwrap())
            .unwrap()
    }

    #[test]
    fn readers_keep_their_snapshot_across_replace() {
        let store = SnapshotStore::new(table(&[1.0, 2.0]));
        let before = store.load();

        let old = store.replace(table(&[1.0, 2.0, 3.0]));
        assert!(Arc::ptr_eq(&before, &old));

        assert_eq!(before.days(), 2); // pinned snapshot is untouched
        assert_eq!(store.load().days(), 3);
    }

    #[test]
    fn concurrent_readers_see_whole_tables() {
        let store = Arc::new(SnapshotStore::new(table(&[1.0; 3])));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snap = store.load();
                        let days = snap.days();
                        assert!(days == 3 || days == 9);
                        let s = snap.get("Confirmed Cases").unwrap();
                        assert_eq!(s.len(), days);
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            store.replace(table(&[2.0; 9]));
            store.replace(table(&[1.0; 3]));
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
