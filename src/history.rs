//! Session history: keeps the address bar and the router in step.
//!
//! Commits are recorded as new history entries; entries the user walks back
//! or forward to are navigated to like any other request.

use tracing::debug;

use crate::router::{Location, Navigator};

/// The URL shown to the user and the history stack behind it.
pub trait AddressBar {
    /// Path plus query string of the active entry.
    fn current_url(&self) -> String;

    /// Add an entry after the active one and make it active.
    fn push_url(&self, url: &str);
}

/// Record a committed location unless the active entry already shows it.
pub fn record(bar: &dyn AddressBar, location: &Location) {
    let url = location.full_path();
    if bar.current_url() != url {
        bar.push_url(&url);
    }
}

/// Navigate to the entry the browser restored on back/forward.
pub fn restore(bar: &dyn AddressBar, navigator: &Navigator) {
    let url = bar.current_url();
    debug!(%url, "History entry restored");
    navigator.push(url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::routes::route_table;
    use crate::router::{navigation_channel, Router};
    use crate::store::{MemoryStore, Stores};
    use classroom_model::{Student, Teacher};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// History stack with browser push/back semantics.
    struct FakeBar {
        entries: RefCell<Vec<String>>,
        active: Cell<usize>,
    }

    impl FakeBar {
        fn at(url: &str) -> Self {
            Self {
                entries: RefCell::new(vec![url.to_string()]),
                active: Cell::new(0),
            }
        }

        fn back(&self) {
            self.active.set(self.active.get().saturating_sub(1));
        }
    }

    impl AddressBar for FakeBar {
        fn current_url(&self) -> String {
            self.entries.borrow()[self.active.get()].clone()
        }

        fn push_url(&self, url: &str) {
            let mut entries = self.entries.borrow_mut();
            entries.truncate(self.active.get() + 1);
            entries.push(url.to_string());
            self.active.set(entries.len() - 1);
        }
    }

    fn router() -> Router {
        let stores = Stores::new(
            Rc::new(MemoryStore::<Student>::populated(Vec::new())),
            Rc::new(MemoryStore::<Teacher>::populated(Vec::new())),
        );
        Router::new(route_table().unwrap(), stores)
    }

    #[test]
    fn test_commit_pushes_only_new_urls() {
        let bar = FakeBar::at("/");
        let table = route_table().unwrap();

        record(&bar, &table.resolve("/").unwrap());
        record(&bar, &table.resolve("/students?page=2").unwrap());
        record(&bar, &table.resolve("/students?page=2").unwrap());

        assert_eq!(*bar.entries.borrow(), vec!["/", "/students?page=2"]);
        assert_eq!(bar.active.get(), 1);
    }

    #[test]
    fn test_back_navigates_to_restored_entry() {
        let bar = Rc::new(FakeBar::at("/"));
        let commits = Rc::new(RefCell::new(Vec::new()));

        let mut router = router();
        let recorder = bar.clone();
        let sink = commits.clone();
        router.on_commit(move |location| {
            record(&*recorder, location);
            sink.borrow_mut().push(location.full_path());
        });

        tokio_test::block_on(async {
            router.navigate("/students").await.unwrap();
            router.navigate("/teachers").await.unwrap();
        });
        bar.back();

        let (navigator, requests) = navigation_channel();
        restore(&*bar, &navigator);
        drop(navigator);
        tokio_test::block_on(router.run(requests));

        assert_eq!(
            *commits.borrow(),
            vec!["/students", "/teachers", "/students"]
        );
        // The restored entry is not pushed again; forward history survives
        assert_eq!(*bar.entries.borrow(), vec!["/", "/students", "/teachers"]);
        assert_eq!(bar.active.get(), 1);
    }
}
