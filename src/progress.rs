//! Navigation progress indicator.

use tracing::trace;

/// Receives start/done around every navigation attempt.
pub trait ProgressIndicator {
    fn start(&self);
    fn done(&self);
}

/// Progress indicator that only logs. Default when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressIndicator for TracingProgress {
    fn start(&self) {
        trace!("Navigation progress started");
    }

    fn done(&self) {
        trace!("Navigation progress done");
    }
}
