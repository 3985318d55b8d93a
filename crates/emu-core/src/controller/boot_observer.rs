use crate::controller::lifecycle_controller::{Inner, Shared};
use crate::error::ControllerError;
use crate::lifecycle_state::LifecycleState;
use crate::poller::PollObserver;
use crate::reporter::Severity;

use std::sync::Weak;

use tracing::{debug, warn};

const READY_MESSAGE: &str = "Emulator is ready";
const TIMEOUT_MESSAGE: &str =
    "Boot timed out; the emulator may still be starting. Check status to reconcile.";

/// Feeds one readiness poll back into the controller that started it.
///
/// Callbacks are applied only while the controller is still in the same
/// epoch and `Booting`; anything else means the poll was superseded.
pub(crate) struct BootObserver {
    shared: Weak<Shared>,
    epoch: u64,
}

impl BootObserver {
    pub(crate) fn new(shared: Weak<Shared>, epoch: u64) -> Self {
        Self { shared, epoch }
    }

    fn apply<F>(&self, event: &str, f: F)
    where
        F: FnOnce(&mut Inner),
    {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };

        let mut inner = shared.lock();
        if inner.epoch() != self.epoch || !matches!(inner.state(), LifecycleState::Booting { .. })
        {
            debug!("Ignoring stale poller {event} (epoch {})", self.epoch);
            return;
        }

        f(&mut *inner);
    }
}

impl PollObserver for BootObserver {
    fn on_tick(&self, attempt: u32) {
        self.apply("tick", |inner| {
            inner.transition(LifecycleState::Booting {
                elapsed_secs: attempt,
            });
        });
    }

    fn on_ready(&self, endpoint: &str) {
        self.apply("ready", |inner| {
            inner.release_poller();
            inner.supersede();
            inner.transition(LifecycleState::Running {
                endpoint: endpoint.to_string(),
            });
            inner.notify(READY_MESSAGE, Severity::Success);
        });
    }

    fn on_timeout(&self, attempts: u32) {
        self.apply("timeout", |inner| {
            let err = ControllerError::timeout(attempts);
            warn!("{err}");
            inner.release_poller();
            inner.supersede();
            inner.transition(LifecycleState::Error {
                message: err.user_message(),
            });
            inner.notify(TIMEOUT_MESSAGE, Severity::Warning);
        });
    }
}
