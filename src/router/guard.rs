//! Per-entity guards.
//!
//! A guard does not block the navigation it runs in. It spawns a probe that
//! fetches the entity by id; if the API says 404 the probe yields a redirect
//! to the tagged not-found page, which the router performs once the probe
//! settles.

use classroom_model::{Entity, EntityKind};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::rc::Rc;
use tracing::{debug, warn};

use super::location::NavigationTarget;
use super::name::RouteName;
use crate::store::EntityStore;

/// Guard attached to a detail layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityGuard {
    pub kind: EntityKind,
    /// Path param holding the entity id
    pub param: &'static str,
    /// Redirect to the network-error page when offline at guard time
    pub check_offline: bool,
}

impl EntityGuard {
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            param: "id",
            check_offline: false,
        }
    }

    pub const fn with_offline_check(mut self) -> Self {
        self.check_offline = true;
        self
    }
}

/// A detached fetch spawned by a guard. Resolves to a redirect, if any.
pub(crate) type Probe = LocalBoxFuture<'static, Option<NavigationTarget>>;

pub(crate) fn not_found_target(kind: EntityKind) -> NavigationTarget {
    NavigationTarget::named(RouteName::NotFoundResource).with_param("resource", kind.as_str())
}

pub(crate) fn network_error_target() -> NavigationTarget {
    NavigationTarget::named(RouteName::NetworkError)
}

pub(crate) fn probe<E: Entity>(store: Rc<dyn EntityStore<Entity = E>>, id: String) -> Probe {
    async move {
        match store.fetch_by_id(&id).await {
            Ok(_) => {
                debug!(kind = %E::KIND, %id, "Guard probe found entity");
                None
            }
            Err(e) if e.is_not_found() => {
                debug!(kind = %E::KIND, %id, "Guard probe got 404, redirecting");
                Some(not_found_target(E::KIND))
            }
            Err(e) => {
                warn!(kind = %E::KIND, %id, error = %e, "Guard probe failed, staying on page");
                None
            }
        }
    }
    .boxed_local()
}
