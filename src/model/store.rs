use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use super::exchange::{Exchange, ExchangeSummary};

/// In-memory collection of exchanges, keyed by auto-increment ID.
///
/// Exchanges live for the process only: a participant list is rebuilt for
/// each run of the exchange, and pairings are never stored at all.
#[derive(Debug, Default)]
pub struct ExchangeStore {
    exchanges: RwLock<HashMap<u32, Exchange>>,
    next_id: AtomicU32,
}

impl ExchangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty exchange and return its ID.
    pub fn create(&self, name: String) -> u32 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut exchanges = self.exchanges.write().expect("exchange store lock poisoned");
        exchanges.insert(id, Exchange::new(id, name));
        id
    }

    /// Run `f` against the exchange with this ID, if it exists.
    pub fn with<T>(&self, id: u32, f: impl FnOnce(&Exchange) -> T) -> Option<T> {
        let exchanges = self.exchanges.read().expect("exchange store lock poisoned");
        exchanges.get(&id).map(f)
    }

    /// Run `f` against the exchange with this ID mutably, if it exists.
    pub fn with_mut<T>(&self, id: u32, f: impl FnOnce(&mut Exchange) -> T) -> Option<T> {
        let mut exchanges = self.exchanges.write().expect("exchange store lock poisoned");
        exchanges.get_mut(&id).map(f)
    }

    /// Summaries of every exchange, sorted by ID.
    pub fn list(&self) -> Vec<ExchangeSummary> {
        let exchanges = self.exchanges.read().expect("exchange store lock poisoned");
        let mut summaries: Vec<_> = exchanges.values().map(Exchange::summary).collect();
        summaries.sort_by_key(|summary| summary.id);
        summaries
    }

    /// Delete an exchange; returns whether it existed.
    pub fn remove(&self, id: u32) -> bool {
        let mut exchanges = self.exchanges.write().expect("exchange store lock poisoned");
        exchanges.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increment_from_zero() {
        let store = ExchangeStore::new();
        assert_eq!(store.create("first".to_string()), 0);
        assert_eq!(store.create("second".to_string()), 1);
        assert_eq!(store.create("third".to_string()), 2);
    }

    #[test]
    fn with_and_with_mut_target_the_right_exchange() {
        let store = ExchangeStore::new();
        let id = store.create("Office 2023".to_string());
        store.create("Family".to_string());

        store
            .with_mut(id, |exchange| {
                exchange.exclusions.add_exclusion("Alice", "Bob");
            })
            .unwrap();

        let forbids = store
            .with(id, |exchange| exchange.exclusions.forbids("Alice", "Bob"))
            .unwrap();
        assert!(forbids);

        assert_eq!(store.with(99, |exchange| exchange.id), None);
    }

    #[test]
    fn list_is_sorted_by_id() {
        let store = ExchangeStore::new();
        for name in ["a", "b", "c"] {
            store.create(name.to_string());
        }
        let ids: Vec<u32> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn remove_reports_existence() {
        let store = ExchangeStore::new();
        let id = store.create("gone soon".to_string());
        assert!(store.remove(id));
        assert!(!store.remove(id));
    }
}
