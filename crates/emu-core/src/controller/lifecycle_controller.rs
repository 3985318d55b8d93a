//! Emulator lifecycle with boot readiness tracking.

use crate::controller::boot_observer::BootObserver;
use crate::error::{ControllerError, ControllerResult};
use crate::gateway::{ApiGateway, DockerCheck, GatewayResult, RemoteStatus, StartAck, StopAck};
use crate::lifecycle_state::LifecycleState;
use crate::poller::{CancelHandle, PollerSettings, ReadinessPoller, ReadinessProbe};
use crate::reporter::{Notification, Severity, StatusReporter, StatusView};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const DOCKER_UNAVAILABLE: &str = "Docker is not available";
const SERVER_UNAVAILABLE: &str = "server unavailable";

/// Owns the lifecycle of the single emulator instance.
///
/// Responsibilities:
/// - Issue start/stop requests and reconcile with the backend's status
/// - Own the readiness poller while the instance boots
/// - Publish every state transition and notification in order
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct LifecycleController {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    gateway: Arc<dyn ApiGateway>,
    probe: Arc<dyn ReadinessProbe>,
    settings: PollerSettings,
    inner: Mutex<Inner>,
}

impl Shared {
    /// Never held across an `.await`.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) struct Inner {
    state: LifecycleState,
    /// Bumped whenever an operation supersedes earlier ones; responses and
    /// poller callbacks tagged with an older epoch are discarded.
    epoch: u64,
    poller: Option<CancelHandle>,
    docker_blocked: bool,
    last_remote: Option<RemoteStatus>,
    subscribers: Vec<mpsc::UnboundedSender<LifecycleState>>,
    reporter: StatusReporter,
}

impl Inner {
    pub(crate) fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn transition(&mut self, next: LifecycleState) {
        if matches!(
            (&self.state, &next),
            (LifecycleState::Booting { .. }, LifecycleState::Booting { .. })
        ) {
            debug!("Emulator {next}");
        } else {
            info!("Emulator {} -> {}", self.state, next);
        }
        self.state = next;
        let snapshot = &self.state;
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    pub(crate) fn notify<S: Into<String>>(&mut self, message: S, severity: Severity) {
        self.reporter.notify(message, severity);
    }

    /// Detach the poller handle, which cancels it when dropped.
    pub(crate) fn release_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.cancel();
        }
    }

    pub(crate) fn supersede(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }
}

impl LifecycleController {
    /// Create a controller in the `Offline` state.
    ///
    /// # Arguments
    /// * `gateway` - Backend the start/stop/status requests go to
    /// * `probe` - Reachability check used while booting
    /// * `settings` - Poll cadence and attempt budget
    /// * `notification_display` - How long a notification stays visible
    pub fn new(
        gateway: Arc<dyn ApiGateway>,
        probe: Arc<dyn ReadinessProbe>,
        settings: PollerSettings,
        notification_display: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                gateway,
                probe,
                settings,
                inner: Mutex::new(Inner {
                    state: LifecycleState::Offline,
                    epoch: 0,
                    poller: None,
                    docker_blocked: false,
                    last_remote: None,
                    subscribers: Vec::new(),
                    reporter: StatusReporter::new(notification_display),
                }),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> LifecycleState {
        self.shared.lock().state.clone()
    }

    /// Current state rendered for a status widget.
    pub fn view(&self) -> StatusView {
        StatusView::with_budget(&self.shared.lock().state, self.shared.settings.max_attempts)
    }

    pub fn settings(&self) -> PollerSettings {
        self.shared.settings
    }

    /// Receive every state transition from now on, in order.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<LifecycleState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared.lock().subscribers.push(tx);
        rx
    }

    /// Receive every notification from now on, in order.
    pub fn notifications(&self) -> mpsc::UnboundedReceiver<Notification> {
        self.shared.lock().reporter.subscribe()
    }

    /// Notifications that have not been dismissed yet, oldest first.
    pub fn visible_notifications(&self) -> Vec<Notification> {
        self.shared.lock().reporter.visible()
    }

    /// Last status reported by the backend, if any.
    pub fn last_remote_status(&self) -> Option<RemoteStatus> {
        self.shared.lock().last_remote.clone()
    }

    /// Whether a readiness poll is currently live.
    pub fn is_polling(&self) -> bool {
        self.shared
            .lock()
            .poller
            .as_ref()
            .is_some_and(|h| !h.is_cancelled() && !h.is_finished())
    }

    /// Start the emulator.
    ///
    /// Accepted only from `Offline` or `Error`; otherwise this is a no-op and
    /// no request is sent. On acknowledgment the instance enters `Booting`
    /// and a readiness poll begins.
    pub async fn start(&self) -> ControllerResult<()> {
        let epoch = match self.begin_start() {
            Ok(epoch) => epoch,
            Err(e) if e.is_precondition() => {
                debug!("Start ignored: {e}");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let result = self.shared.gateway.start().await;
        self.finish_start(epoch, result)
    }

    fn begin_start(&self) -> ControllerResult<u64> {
        let mut inner = self.shared.lock();

        if inner.docker_blocked {
            inner.notify(
                "Docker is not available on the server; start is disabled",
                Severity::Info,
            );
            return Err(ControllerError::precondition("start", &inner.state));
        }

        if !inner.state.can_start() {
            return Err(ControllerError::precondition("start", &inner.state));
        }

        inner.release_poller();
        let epoch = inner.supersede();
        inner.transition(LifecycleState::Starting);
        Ok(epoch)
    }

    fn finish_start(&self, epoch: u64, result: GatewayResult<StartAck>) -> ControllerResult<()> {
        let mut inner = self.shared.lock();

        if inner.epoch != epoch || inner.state != LifecycleState::Starting {
            debug!("Discarding superseded start response");
            return Ok(());
        }

        match result {
            Ok(ack) => {
                inner.transition(LifecycleState::Booting { elapsed_secs: 0 });
                inner.notify(
                    ack.message
                        .unwrap_or_else(|| "Emulator started, waiting for boot".into()),
                    Severity::Success,
                );

                let observer = Arc::new(BootObserver::new(Arc::downgrade(&self.shared), epoch));
                inner.poller = Some(ReadinessPoller::start(
                    ack.endpoint,
                    self.shared.probe.clone(),
                    self.shared.settings,
                    observer,
                ));
                Ok(())
            }
            Err(e) => {
                let err = ControllerError::from(e);
                warn!("Start failed: {err}");
                let message = err.user_message();
                inner.transition(LifecycleState::Error {
                    message: message.clone(),
                });
                inner.notify(message, Severity::Error);
                Err(err)
            }
        }
    }

    /// Stop the emulator.
    ///
    /// Any readiness poll is cancelled before this returns, whatever the
    /// backend answers. Stopping with nothing booting or running is a no-op.
    pub async fn stop(&self) -> ControllerResult<()> {
        let epoch = match self.begin_stop() {
            Ok(epoch) => epoch,
            Err(e) if e.is_precondition() => {
                debug!("Stop ignored: {e}");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let result = self.shared.gateway.stop().await;
        self.finish_stop(epoch, result)
    }

    fn begin_stop(&self) -> ControllerResult<u64> {
        let mut inner = self.shared.lock();

        if !inner.state.can_stop() {
            let err = ControllerError::precondition("stop", &inner.state);
            inner.notify(err.user_message(), Severity::Info);
            return Err(err);
        }

        inner.release_poller();
        let epoch = inner.supersede();
        inner.transition(LifecycleState::Stopping);
        Ok(epoch)
    }

    fn finish_stop(&self, epoch: u64, result: GatewayResult<StopAck>) -> ControllerResult<()> {
        let mut inner = self.shared.lock();

        if inner.epoch != epoch || inner.state != LifecycleState::Stopping {
            debug!("Discarding superseded stop response");
            return Ok(());
        }

        match result {
            Ok(ack) => {
                inner.transition(LifecycleState::Offline);
                inner.notify(
                    ack.message.unwrap_or_else(|| "Emulator stopped".into()),
                    Severity::Success,
                );
                Ok(())
            }
            Err(e) => {
                let err = ControllerError::from(e);
                warn!("Stop failed: {err}");
                let message = err.user_message();
                inner.transition(LifecycleState::Error {
                    message: message.clone(),
                });
                inner.notify(message, Severity::Error);
                Err(err)
            }
        }
    }

    /// Reconcile local state with the backend.
    ///
    /// A running remote instance moves straight to `Running` from any state
    /// without a boot sequence, superseding an outstanding start or stop. A
    /// stopped one moves to `Offline` unless a start or stop request is
    /// outstanding, in which case that request's response decides.
    pub async fn query_status(&self) -> ControllerResult<LifecycleState> {
        let epoch = self.shared.lock().epoch;
        let result = self.shared.gateway.status().await;
        self.finish_query(epoch, result)
    }

    fn finish_query(
        &self,
        epoch: u64,
        result: GatewayResult<RemoteStatus>,
    ) -> ControllerResult<LifecycleState> {
        let mut inner = self.shared.lock();

        let remote = match result {
            Ok(remote) => remote,
            Err(e) => {
                let err = ControllerError::from(e);
                warn!("Status query failed: {err}");
                let keep_docker_error = inner.docker_blocked
                    && matches!(inner.state, LifecycleState::Error { .. });
                if inner.epoch == epoch
                    && !keep_docker_error
                    && matches!(inner.state, LifecycleState::Offline | LifecycleState::Error { .. })
                {
                    inner.supersede();
                    inner.transition(LifecycleState::Error {
                        message: SERVER_UNAVAILABLE.into(),
                    });
                }
                inner.notify(err.user_message(), Severity::Warning);
                return Err(err);
            }
        };

        inner.last_remote = Some(remote.clone());

        if inner.epoch != epoch {
            debug!("Discarding superseded status response");
            return Ok(inner.state.clone());
        }

        match (remote.running, remote.endpoint) {
            (true, Some(endpoint)) => {
                if inner.state.endpoint() != Some(endpoint.as_str()) {
                    inner.release_poller();
                    inner.supersede();
                    inner.transition(LifecycleState::Running { endpoint });
                }
            }
            (true, None) => {
                debug!("Backend reports running without an endpoint; keeping {}", inner.state);
            }
            (false, _) if inner.state.is_request_in_flight() => {
                debug!("Request in flight; keeping {}", inner.state);
            }
            (false, _) => {
                let keep_docker_error = inner.docker_blocked
                    && matches!(inner.state, LifecycleState::Error { .. });
                if inner.state != LifecycleState::Offline && !keep_docker_error {
                    inner.release_poller();
                    inner.supersede();
                    inner.transition(LifecycleState::Offline);
                }
            }
        }

        Ok(inner.state.clone())
    }

    /// Ask the backend whether it can run containers.
    ///
    /// An unavailable runtime blocks `start()` until a later check succeeds.
    pub async fn check_docker(&self) -> ControllerResult<DockerCheck> {
        let result = self.shared.gateway.check_docker().await;
        let mut inner = self.shared.lock();

        let check = match result {
            Ok(check) => check,
            Err(e) => {
                let err = ControllerError::from(e);
                warn!("Docker check failed: {err}");
                return Err(err);
            }
        };

        if check.available {
            if inner.docker_blocked {
                info!("Docker available again");
                inner.docker_blocked = false;
                if inner.state
                    == (LifecycleState::Error {
                        message: DOCKER_UNAVAILABLE.into(),
                    })
                {
                    inner.transition(LifecycleState::Offline);
                }
            }
        } else {
            warn!("Docker unavailable on the server");
            inner.docker_blocked = true;
            if inner.state.can_start() {
                inner.supersede();
                inner.transition(LifecycleState::Error {
                    message: DOCKER_UNAVAILABLE.into(),
                });
            }
            inner.notify(
                check
                    .message
                    .clone()
                    .unwrap_or_else(|| DOCKER_UNAVAILABLE.into()),
                Severity::Error,
            );
        }

        Ok(check)
    }
}
