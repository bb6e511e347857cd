//! In-memory entity store.
//!
//! Serves a fixed backing set as if it were the API: `fetch_all` copies it
//! into the cache and `fetch_by_id` answers 404 for unknown ids. Used for
//! offline previews and tests; counts calls so warm-up behaviour can be
//! observed.

use async_trait::async_trait;
use classroom_model::Entity;
use std::cell::{Cell, RefCell};

use super::EntityStore;
use crate::error::StoreError;

pub struct MemoryStore<E> {
    backing: Vec<E>,
    items: RefCell<Vec<E>>,
    failure: Option<u16>,
    fetch_all_calls: Cell<usize>,
    fetch_by_id_calls: Cell<usize>,
}

impl<E: Entity> MemoryStore<E> {
    /// A store whose backend holds `backing`; the cache starts empty.
    pub fn new(backing: Vec<E>) -> Self {
        Self {
            backing,
            items: RefCell::new(Vec::new()),
            failure: None,
            fetch_all_calls: Cell::new(0),
            fetch_by_id_calls: Cell::new(0),
        }
    }

    /// A store whose cache is already filled.
    pub fn populated(items: Vec<E>) -> Self {
        let store = Self::new(items.clone());
        *store.items.borrow_mut() = items;
        store
    }

    /// Make every fetch fail with this HTTP status.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.get()
    }

    pub fn fetch_by_id_calls(&self) -> usize {
        self.fetch_by_id_calls.get()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure {
            Some(status) => Err(StoreError::Status {
                status,
                message: "simulated failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl<E: Entity> EntityStore for MemoryStore<E> {
    type Entity = E;

    fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn entities(&self) -> Vec<E> {
        self.items.borrow().clone()
    }

    fn get(&self, id: &str) -> Option<E> {
        self.items.borrow().iter().find(|e| e.id() == id).cloned()
    }

    async fn fetch_all(&self) -> Result<(), StoreError> {
        self.fetch_all_calls.set(self.fetch_all_calls.get() + 1);
        self.check_failure()?;
        *self.items.borrow_mut() = self.backing.clone();
        Ok(())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<E, StoreError> {
        self.fetch_by_id_calls.set(self.fetch_by_id_calls.get() + 1);
        self.check_failure()?;
        self.backing
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::Status {
                status: 404,
                message: format!("{} {id} not found", E::KIND),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_model::Student;

    fn student(id: &str) -> Student {
        Student {
            student_id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_all_copies_backing() {
        let store = MemoryStore::new(vec![student("1"), student("2")]);
        assert!(!store.is_populated());
        tokio_test::block_on(store.fetch_all()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch_all_calls(), 1);
    }

    #[test]
    fn test_fetch_by_id_404_for_unknown() {
        let store = MemoryStore::populated(vec![student("1")]);
        assert!(store.is_populated());
        let err = tokio_test::block_on(store.fetch_by_id("2")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.fetch_by_id_calls(), 1);
    }

    #[test]
    fn test_failing_store_reports_status() {
        let store = MemoryStore::new(vec![student("1")]).failing_with(500);
        let err = tokio_test::block_on(store.fetch_all()).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(store.is_empty());
    }
}
