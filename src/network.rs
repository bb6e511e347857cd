//! Network reachability as seen by guards.

/// Reports whether the client believes it is online.
pub trait NetworkStatus {
    fn is_online(&self) -> bool;
}

/// Always online. Used natively, where there is no `navigator.onLine`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOnline;

impl NetworkStatus for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}
