//! Entity stores: in-memory collections of students and teachers plus the
//! fetch operations that fill them.

use async_trait::async_trait;
use classroom_model::{Entity, Student, Teacher};
use std::rc::Rc;

use crate::error::StoreError;

pub mod http;
pub mod memory;

pub use http::{ApiClient, HttpEntityStore, ReqwestClient};
pub use memory::MemoryStore;

/// A fetch-and-cache collection of one entity kind.
///
/// Stores are single-threaded: their futures are not `Send` and they are
/// shared through `Rc`.
#[async_trait(?Send)]
pub trait EntityStore {
    type Entity: Entity;

    /// Number of cached entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the warm-up fetch has filled the collection.
    fn is_populated(&self) -> bool {
        !self.is_empty()
    }

    /// Snapshot of the cached collection, in store order.
    fn entities(&self) -> Vec<Self::Entity>;

    /// Cached entity by id, without fetching.
    fn get(&self, id: &str) -> Option<Self::Entity>;

    /// Replace the collection with everything the backend has.
    async fn fetch_all(&self) -> Result<(), StoreError>;

    /// Fetch one entity. Fails with status 404 when it does not exist.
    async fn fetch_by_id(&self, id: &str) -> Result<Self::Entity, StoreError>;
}

/// The two stores the router warms up and its guards probe.
#[derive(Clone)]
pub struct Stores {
    pub students: Rc<dyn EntityStore<Entity = Student>>,
    pub teachers: Rc<dyn EntityStore<Entity = Teacher>>,
}

impl Stores {
    pub fn new(
        students: Rc<dyn EntityStore<Entity = Student>>,
        teachers: Rc<dyn EntityStore<Entity = Teacher>>,
    ) -> Self {
        Self { students, teachers }
    }

    /// HTTP-backed stores sharing one API client.
    pub fn http(client: ReqwestClient) -> Self {
        let client = Rc::new(client);
        Self {
            students: Rc::new(HttpEntityStore::<Student>::new(client.clone())),
            teachers: Rc::new(HttpEntityStore::<Teacher>::new(client)),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("students", &self.students.len())
            .field("teachers", &self.teachers.len())
            .finish()
    }
}
