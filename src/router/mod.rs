//! Client-side router: resolves navigations, runs hooks and guards, and
//! commits the resulting location.
//!
//! Every navigation attempt goes through the same pipeline:
//! 1. progress start
//! 2. resolve the target against the route table
//! 3. warm up the student store, then the teacher store, when empty
//! 4. run guards of newly entered destinations (probes are detached)
//! 5. commit and notify observers
//! 6. progress done
//!
//! A guard may supersede the attempt with an immediate redirect, which is
//! then navigated to as a new attempt. Probes that settle later with a
//! redirect start a fresh navigation from [`Router::run`] or
//! [`Router::settle`].

use futures::channel::mpsc;
use futures::future::poll_fn;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::rc::Rc;
use std::task::Poll;
use tracing::{debug, info, warn};

use classroom_model::EntityKind;

pub mod guard;
pub mod location;
pub mod name;
pub mod pattern;
pub mod props;
pub mod routes;
pub mod table;

pub use guard::EntityGuard;
pub use location::{Location, MatchedView, NavigationTarget, Params, Query};
pub use name::{RouteName, View};
pub use props::{RouteMatch, ViewProps};
pub use table::{Destination, RouteRecord, RouteTable};

use crate::config::{Config, WarmUpPolicy};
use crate::error::{NavigationError, StoreError};
use crate::network::{AlwaysOnline, NetworkStatus};
use crate::progress::{ProgressIndicator, TracingProgress};
use crate::store::Stores;
use guard::Probe;

/// Cloneable handle for requesting navigations from UI code.
#[derive(Clone, Debug)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<NavigationTarget>,
}

impl Navigator {
    /// Queue a navigation. Dropped with a warning if the router is gone.
    pub fn push(&self, target: impl Into<NavigationTarget>) {
        let target = target.into();
        if let Err(e) = self.tx.unbounded_send(target) {
            warn!(target = %e.into_inner(), "Router is not running, navigation dropped");
        }
    }
}

impl PartialEq for Navigator {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_receiver(&other.tx)
    }
}

/// Receiving end of a [`Navigator`], consumed by [`Router::run`].
#[derive(Debug)]
pub struct NavigationRequests {
    rx: mpsc::UnboundedReceiver<NavigationTarget>,
}

/// Create a navigator and the request stream it feeds.
pub fn navigation_channel() -> (Navigator, NavigationRequests) {
    let (tx, rx) = mpsc::unbounded();
    (Navigator { tx }, NavigationRequests { rx })
}

enum Attempt {
    Committed(Location),
    Redirected(NavigationTarget),
}

enum LoopEvent {
    Request(NavigationTarget),
    Probe(Option<NavigationTarget>),
    Closed,
}

type CommitObserver = Box<dyn FnMut(&Location)>;

pub struct Router {
    table: RouteTable,
    stores: Stores,
    progress: Rc<dyn ProgressIndicator>,
    network: Rc<dyn NetworkStatus>,
    warm_up: WarmUpPolicy,
    max_redirects: usize,
    current: Option<Location>,
    probes: FuturesUnordered<Probe>,
    observers: Vec<CommitObserver>,
}

impl Router {
    pub fn new(table: RouteTable, stores: Stores) -> Self {
        let config = Config::default();
        Self {
            table,
            stores,
            progress: Rc::new(TracingProgress),
            network: Rc::new(AlwaysOnline),
            warm_up: config.warm_up,
            max_redirects: config.max_redirects,
            current: None,
            probes: FuturesUnordered::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_progress(mut self, progress: Rc<dyn ProgressIndicator>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_network(mut self, network: Rc<dyn NetworkStatus>) -> Self {
        self.network = network;
        self
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.warm_up = config.warm_up;
        self.max_redirects = config.max_redirects;
        self
    }

    /// Register a callback for every committed location.
    pub fn on_commit(&mut self, observer: impl FnMut(&Location) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Guard probes that have not settled yet.
    pub fn pending_probes(&self) -> usize {
        self.probes.len()
    }

    /// Navigate to `target`, following immediate guard redirects.
    ///
    /// Returns once the final location is committed. Probes spawned on the
    /// way keep running; see [`Router::settle`].
    pub async fn navigate(
        &mut self,
        target: impl Into<NavigationTarget>,
    ) -> Result<Location, NavigationError> {
        let mut target = target.into();
        for _ in 0..=self.max_redirects {
            match self.attempt(&target).await? {
                Attempt::Committed(location) => return Ok(location),
                Attempt::Redirected(next) => target = next,
            }
        }
        Err(NavigationError::TooManyRedirects(self.max_redirects))
    }

    /// Drive every outstanding probe to completion, performing the
    /// redirects they yield in the order they settle.
    ///
    /// A failed redirect does not stop the drain; the first failure is
    /// returned once every probe has settled.
    pub async fn settle(&mut self) -> Result<(), NavigationError> {
        let mut first_error = None;
        while let Some(outcome) = self.probes.next().await {
            let Some(target) = outcome else {
                continue;
            };
            if let Err(e) = self.navigate(target).await {
                warn!(error = %e, "Guard redirect failed, settling remaining probes");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Event loop: serve queued navigations and probe redirects until every
    /// [`Navigator`] is dropped, then settle what is left.
    pub async fn run(mut self, requests: NavigationRequests) {
        let mut rx = requests.rx;
        info!("Router event loop started");

        loop {
            let event = poll_fn(|cx| {
                if let Poll::Ready(Some(outcome)) = self.probes.poll_next_unpin(cx) {
                    return Poll::Ready(LoopEvent::Probe(outcome));
                }
                match rx.poll_next_unpin(cx) {
                    Poll::Ready(Some(target)) => Poll::Ready(LoopEvent::Request(target)),
                    Poll::Ready(None) => Poll::Ready(LoopEvent::Closed),
                    Poll::Pending => Poll::Pending,
                }
            })
            .await;

            let target = match event {
                LoopEvent::Request(target) | LoopEvent::Probe(Some(target)) => target,
                LoopEvent::Probe(None) => continue,
                LoopEvent::Closed => break,
            };
            if let Err(e) = self.navigate(target).await {
                warn!(error = %e, "Navigation failed");
            }
        }

        if let Err(e) = self.settle().await {
            warn!(error = %e, "Navigation failed while settling guard probes");
        }
        info!("Router event loop stopped");
    }

    async fn attempt(&mut self, target: &NavigationTarget) -> Result<Attempt, NavigationError> {
        debug!(%target, "Navigation started");
        self.progress.start();
        let result = self.pipeline(target).await;
        self.after_each(target, &result);
        result
    }

    async fn pipeline(&mut self, target: &NavigationTarget) -> Result<Attempt, NavigationError> {
        let location = self.table.resolve_target(target)?;
        self.warm_up_stores().await?;

        if let Some(redirect) = self.enter_guards(&location) {
            return Ok(Attempt::Redirected(redirect));
        }

        self.commit(location.clone());
        Ok(Attempt::Committed(location))
    }

    /// Global pre-navigation hook: fill empty stores, students first.
    async fn warm_up_stores(&self) -> Result<(), NavigationError> {
        if !self.stores.students.is_populated() {
            let fetch = self.stores.students.fetch_all();
            self.warm_up_store(EntityKind::Student, fetch).await?;
        }
        if !self.stores.teachers.is_populated() {
            let fetch = self.stores.teachers.fetch_all();
            self.warm_up_store(EntityKind::Teacher, fetch).await?;
        }
        Ok(())
    }

    async fn warm_up_store(
        &self,
        kind: EntityKind,
        fetch: impl Future<Output = Result<(), StoreError>>,
    ) -> Result<(), NavigationError> {
        match fetch.await {
            Ok(()) => {
                debug!(%kind, "Store warmed up");
                Ok(())
            }
            Err(source) => match self.warm_up {
                WarmUpPolicy::Proceed => {
                    warn!(%kind, error = %source, "Store warm-up failed, continuing");
                    Ok(())
                }
                WarmUpPolicy::Abort => Err(NavigationError::WarmUp { kind, source }),
            },
        }
    }

    /// Run guards for destinations this navigation enters.
    ///
    /// Each guard spawns its probe before the offline check, so an offline
    /// student page still records the fetch attempt.
    fn enter_guards(&mut self, location: &Location) -> Option<NavigationTarget> {
        for matched in &location.matched {
            let Some(entity_guard) = self.table.destination(matched.name).and_then(|d| d.guard) else {
                continue;
            };
            if !self.is_entering(matched.name, &entity_guard, location) {
                continue;
            }
            let Some(id) = location.params.get(entity_guard.param).cloned() else {
                warn!(route = %matched.name, param = entity_guard.param, "Guard param missing");
                continue;
            };

            debug!(route = %matched.name, %id, "Guard spawning probe");
            let probe = match entity_guard.kind {
                EntityKind::Student => guard::probe(self.stores.students.clone(), id),
                EntityKind::Teacher => guard::probe(self.stores.teachers.clone(), id),
            };
            self.probes.push(probe);

            if entity_guard.check_offline && !self.network.is_online() {
                info!(route = %matched.name, "Offline, redirecting to network error page");
                return Some(guard::network_error_target());
            }
        }
        None
    }

    /// A destination is entered when the committed location did not match
    /// it, or matched it with a different guarded param.
    fn is_entering(&self, name: RouteName, guard: &EntityGuard, next: &Location) -> bool {
        match &self.current {
            None => true,
            Some(current) => {
                !current.contains(name)
                    || current.params.get(guard.param) != next.params.get(guard.param)
            }
        }
    }

    fn commit(&mut self, location: Location) {
        info!(route = %location.name, path = %location.full_path(), "Navigation committed");
        for observer in &mut self.observers {
            observer(&location);
        }
        self.current = Some(location);
    }

    /// Global post-navigation hook.
    fn after_each(&self, target: &NavigationTarget, result: &Result<Attempt, NavigationError>) {
        self.progress.done();
        match result {
            Ok(Attempt::Committed(_)) => {}
            Ok(Attempt::Redirected(next)) => {
                debug!(%target, redirect = %next, "Navigation superseded by redirect");
            }
            Err(e) => warn!(%target, error = %e, "Navigation aborted"),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current.as_ref().map(|l| l.full_path()))
            .field("stores", &self.stores)
            .field("pending_probes", &self.probes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntityStore, MemoryStore};
    use classroom_model::{Student, Teacher};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct CountingProgress {
        started: Cell<usize>,
        done: Cell<usize>,
    }

    impl ProgressIndicator for CountingProgress {
        fn start(&self) {
            self.started.set(self.started.get() + 1);
        }
        fn done(&self) {
            self.done.set(self.done.get() + 1);
        }
    }

    struct Offline;

    impl NetworkStatus for Offline {
        fn is_online(&self) -> bool {
            false
        }
    }

    fn student(id: &str) -> Student {
        Student {
            student_id: id.to_string(),
            ..Default::default()
        }
    }

    fn teacher(id: &str) -> Teacher {
        Teacher {
            teacher_id: id.to_string(),
            ..Default::default()
        }
    }

    struct Fixture {
        router: Router,
        students: Rc<MemoryStore<Student>>,
        teachers: Rc<MemoryStore<Teacher>>,
        progress: Rc<CountingProgress>,
    }

    fn fixture(students: MemoryStore<Student>, teachers: MemoryStore<Teacher>) -> Fixture {
        let students = Rc::new(students);
        let teachers = Rc::new(teachers);
        let progress = Rc::new(CountingProgress::default());
        let router = Router::new(
            routes::route_table().unwrap(),
            Stores::new(students.clone(), teachers.clone()),
        )
        .with_progress(progress.clone());
        Fixture {
            router,
            students,
            teachers,
            progress,
        }
    }

    fn default_fixture() -> Fixture {
        fixture(
            MemoryStore::new(vec![student("1"), student("2")]),
            MemoryStore::new(vec![teacher("T1")]),
        )
    }

    #[test]
    fn test_first_navigation_warms_up_both_stores_once() {
        let mut f = default_fixture();
        tokio_test::block_on(async {
            f.router.navigate("/students").await.unwrap();
            f.router.navigate("/teachers?page=2").await.unwrap();
        });
        assert_eq!(f.students.fetch_all_calls(), 1);
        assert_eq!(f.teachers.fetch_all_calls(), 1);
        assert_eq!(f.router.current().unwrap().name, RouteName::TeacherList);
    }

    #[test]
    fn test_populated_store_skips_warm_up() {
        let mut f = fixture(
            MemoryStore::populated(vec![student("1")]),
            MemoryStore::new(vec![teacher("T1")]),
        );
        tokio_test::block_on(f.router.navigate("/")).unwrap();
        assert_eq!(f.students.fetch_all_calls(), 0);
        assert_eq!(f.teachers.fetch_all_calls(), 1);
    }

    #[test]
    fn test_warm_up_failure_proceeds_by_default() {
        let mut f = fixture(
            MemoryStore::new(vec![student("1")]).failing_with(500),
            MemoryStore::new(vec![teacher("T1")]),
        );
        let location = tokio_test::block_on(f.router.navigate("/announcement")).unwrap();
        assert_eq!(location.name, RouteName::Announcement);
        assert_eq!(f.teachers.fetch_all_calls(), 1);
        assert_eq!(f.progress.done.get(), 1);
    }

    #[test]
    fn test_warm_up_failure_aborts_when_configured() {
        let f = fixture(
            MemoryStore::new(vec![student("1")]).failing_with(503),
            MemoryStore::new(vec![teacher("T1")]),
        );
        let config = Config {
            warm_up: WarmUpPolicy::Abort,
            ..Config::default()
        };
        let mut router = f.router.with_config(&config);

        let err = tokio_test::block_on(router.navigate("/")).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::WarmUp {
                kind: EntityKind::Student,
                ..
            }
        ));
        assert!(router.current().is_none());
        // Teacher warm-up never ran; progress still closed
        assert_eq!(f.teachers.fetch_all_calls(), 0);
        assert_eq!(f.progress.started.get(), 1);
        assert_eq!(f.progress.done.get(), 1);
    }

    #[test]
    fn test_guard_probe_is_detached() {
        let mut f = default_fixture();
        let location = tokio_test::block_on(f.router.navigate("/student/404")).unwrap();

        // Committed before the probe settled
        assert_eq!(location.name, RouteName::StudentDetail);
        assert_eq!(f.router.pending_probes(), 1);
        assert_eq!(f.students.fetch_by_id_calls(), 0);

        tokio_test::block_on(f.router.settle()).unwrap();
        assert_eq!(f.students.fetch_by_id_calls(), 1);
        let current = f.router.current().unwrap();
        assert_eq!(current.path, "/404/student");
        assert_eq!(
            current.params.get("resource").map(String::as_str),
            Some("student")
        );
        // One pair for the detail page, one for the redirect
        assert_eq!(f.progress.started.get(), 2);
        assert_eq!(f.progress.done.get(), 2);
    }

    #[test]
    fn test_guard_probe_other_status_no_redirect() {
        let mut f = fixture(
            MemoryStore::populated(vec![student("1")]),
            MemoryStore::populated(vec![teacher("T1")]).failing_with(500),
        );
        tokio_test::block_on(async {
            f.router.navigate("/teacher/T1").await.unwrap();
            f.router.settle().await.unwrap();
        });
        assert_eq!(f.teachers.fetch_by_id_calls(), 1);
        assert_eq!(f.router.current().unwrap().name, RouteName::TeacherDetail);
        assert_eq!(f.progress.started.get(), 1);
    }

    #[test]
    fn test_offline_student_redirects_immediately() {
        let f = default_fixture();
        let mut router = f.router.with_network(Rc::new(Offline));

        let location = tokio_test::block_on(router.navigate("/student/1")).unwrap();
        assert_eq!(location.name, RouteName::NetworkError);
        // Probe was still spawned
        assert_eq!(router.pending_probes(), 1);
        assert_eq!(f.progress.started.get(), 2);
        assert_eq!(f.progress.done.get(), 2);
    }

    #[test]
    fn test_offline_teacher_is_not_checked() {
        let f = default_fixture();
        let mut router = f.router.with_network(Rc::new(Offline));
        let location = tokio_test::block_on(router.navigate("/teacher/T1")).unwrap();
        assert_eq!(location.name, RouteName::TeacherDetail);
    }

    #[test]
    fn test_guard_runs_on_enter_and_param_change_only() {
        let mut f = default_fixture();
        tokio_test::block_on(async {
            f.router.navigate("/student/1").await.unwrap();
            f.router.navigate("/student/1/edit").await.unwrap();
            f.router.settle().await.unwrap();
        });
        assert_eq!(f.students.fetch_by_id_calls(), 1);

        tokio_test::block_on(async {
            f.router.navigate("/student/2").await.unwrap();
            f.router.settle().await.unwrap();
        });
        assert_eq!(f.students.fetch_by_id_calls(), 2);
    }

    /// Always-empty teacher store whose third warm-up fails.
    #[derive(Default)]
    struct FlakyTeachers {
        fetch_all_calls: Cell<usize>,
        fetch_by_id_calls: Cell<usize>,
    }

    #[async_trait::async_trait(?Send)]
    impl EntityStore for FlakyTeachers {
        type Entity = Teacher;

        fn len(&self) -> usize {
            0
        }

        fn entities(&self) -> Vec<Teacher> {
            Vec::new()
        }

        fn get(&self, _id: &str) -> Option<Teacher> {
            None
        }

        async fn fetch_all(&self) -> Result<(), StoreError> {
            let call = self.fetch_all_calls.get() + 1;
            self.fetch_all_calls.set(call);
            if call == 3 {
                return Err(StoreError::Transport("connection reset".to_string()));
            }
            Ok(())
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Teacher, StoreError> {
            self.fetch_by_id_calls.set(self.fetch_by_id_calls.get() + 1);
            Err(StoreError::Status {
                status: 404,
                message: format!("teacher {id} not found"),
            })
        }
    }

    #[test]
    fn test_settle_keeps_draining_after_failed_redirect() {
        let students = Rc::new(MemoryStore::new(vec![student("1")]));
        let teachers = Rc::new(FlakyTeachers::default());
        let config = Config {
            warm_up: WarmUpPolicy::Abort,
            ..Config::default()
        };
        let mut router = Router::new(
            routes::route_table().unwrap(),
            Stores::new(students.clone(), teachers.clone()),
        )
        .with_config(&config);

        let result = tokio_test::block_on(async {
            router.navigate("/student/missing").await.unwrap();
            router.navigate("/teacher/missing").await.unwrap();
            assert_eq!(router.pending_probes(), 2);
            router.settle().await
        });

        // The first redirect hits the failing warm-up, the second still runs
        assert!(matches!(result, Err(NavigationError::WarmUp { .. })));
        assert_eq!(router.pending_probes(), 0);
        assert_eq!(students.fetch_by_id_calls(), 1);
        assert_eq!(teachers.fetch_by_id_calls.get(), 1);
        assert_eq!(teachers.fetch_all_calls.get(), 4);
        assert_eq!(
            router.current().unwrap().name,
            RouteName::NotFoundResource
        );
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        let f = default_fixture();
        let config = Config {
            max_redirects: 0,
            ..Config::default()
        };
        let mut router = f.router.with_network(Rc::new(Offline)).with_config(&config);
        let err = tokio_test::block_on(router.navigate("/student/1")).unwrap_err();
        assert!(matches!(err, NavigationError::TooManyRedirects(0)));
    }

    #[test]
    fn test_commit_observers_see_every_commit() {
        let mut f = default_fixture();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        f.router
            .on_commit(move |location| sink.borrow_mut().push(location.full_path()));

        tokio_test::block_on(async {
            f.router.navigate("/students?page=2").await.unwrap();
            f.router.navigate("/nowhere").await.unwrap();
        });
        assert_eq!(*seen.borrow(), vec!["/students?page=2", "/nowhere"]);
    }

    #[test]
    fn test_run_serves_navigator_and_probe_redirects() {
        let f = default_fixture();
        let (navigator, requests) = navigation_channel();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut router = f.router;
        router.on_commit(move |location| sink.borrow_mut().push(location.name));

        navigator.push("/teacher/missing");
        navigator.push(RouteName::Home);
        drop(navigator);
        tokio_test::block_on(router.run(requests));

        // Settled probes are served before queued requests
        assert_eq!(
            *seen.borrow(),
            vec![
                RouteName::TeacherDetail,
                RouteName::NotFoundResource,
                RouteName::Home
            ]
        );
    }
}
