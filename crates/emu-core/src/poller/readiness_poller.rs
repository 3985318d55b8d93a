//! Readiness polling for a freshly started instance.

use crate::poller::{CancelHandle, PollObserver, PollerSettings, ReadinessProbe};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

/// Polls a display endpoint on a fixed cadence until it answers.
///
/// Each tick increments the attempt counter and reports it. From
/// `warmup_attempts` on, every tick also launches a probe; probes may
/// overlap and only the first success matters. On tick `max_attempts` the
/// probes still in flight are awaited before the poll gives up.
pub struct ReadinessPoller;

impl ReadinessPoller {
    /// Start polling `endpoint` on the current tokio runtime.
    pub fn start(
        endpoint: String,
        probe: Arc<dyn ReadinessProbe>,
        settings: PollerSettings,
        observer: Arc<dyn PollObserver>,
    ) -> CancelHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run(
            endpoint,
            probe,
            settings,
            observer,
            Gate {
                cancelled: cancelled.clone(),
            },
        ));

        CancelHandle::new(cancelled, task)
    }
}

/// Checked before every observer call so a cancelled poll stays silent.
struct Gate {
    cancelled: Arc<AtomicBool>,
}

impl Gate {
    fn open(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

async fn run(
    endpoint: String,
    probe: Arc<dyn ReadinessProbe>,
    settings: PollerSettings,
    observer: Arc<dyn PollObserver>,
    gate: Gate,
) {
    debug!(
        "Polling {endpoint} every {:?} (probing from attempt {}, giving up at {})",
        settings.interval, settings.warmup_attempts, settings.max_attempts
    );

    let mut ticker = tokio::time::interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut probes: JoinSet<bool> = JoinSet::new();
    let mut attempt: u32 = 0;

    loop {
        tokio::select! {
            biased;

            Some(joined) = probes.join_next(), if !probes.is_empty() => {
                if matches!(joined, Ok(true)) {
                    finish_ready(&endpoint, attempt, &observer, &gate);
                    return;
                }
            }

            _ = ticker.tick() => {
                attempt += 1;
                if !gate.open() {
                    return;
                }
                observer.on_tick(attempt);

                if settings.is_warm(attempt) {
                    spawn_probe(&mut probes, &probe, &endpoint, attempt);
                }

                if attempt >= settings.max_attempts {
                    while let Some(joined) = probes.join_next().await {
                        if matches!(joined, Ok(true)) {
                            finish_ready(&endpoint, attempt, &observer, &gate);
                            return;
                        }
                    }

                    if gate.open() {
                        warn!("{endpoint} did not answer within {attempt} attempts");
                        observer.on_timeout(attempt);
                    }
                    return;
                }
            }
        }
    }
}

fn spawn_probe(
    probes: &mut JoinSet<bool>,
    probe: &Arc<dyn ReadinessProbe>,
    endpoint: &str,
    attempt: u32,
) {
    let probe = probe.clone();
    let endpoint = endpoint.to_string();

    probes.spawn(async move {
        match probe.probe(&endpoint).await {
            Ok(()) => true,
            Err(e) => {
                trace!("Probe {attempt} of {endpoint}: {e}");
                false
            }
        }
    });
}

fn finish_ready(endpoint: &str, attempt: u32, observer: &Arc<dyn PollObserver>, gate: &Gate) {
    if gate.open() {
        info!("{endpoint} answered after {attempt} attempts");
        observer.on_ready(endpoint);
    }
}
