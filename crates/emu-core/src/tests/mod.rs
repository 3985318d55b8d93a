mod reporter;

use crate::{
    ApiGateway, DockerCheck, GatewayError, GatewayResult, LifecycleController, LifecycleState,
    PollObserver, PollerSettings, ProbeError, ReadinessProbe, RemoteStatus, StartAck, StopAck,
};

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

pub(crate) const ENDPOINT: &str = "http://emulator.local:6080/vnc.html";
pub(crate) const DISPLAY: Duration = Duration::from_millis(3000);

pub(crate) fn session_endpoint(n: u32) -> String {
    format!("{ENDPOINT}?session={n}")
}

pub(crate) fn settings() -> PollerSettings {
    PollerSettings {
        interval: Duration::from_secs(1),
        warmup_attempts: 30,
        max_attempts: 120,
    }
}

/// Transport failure without a server: reqwest errors cannot be built by hand.
pub(crate) fn transport_error() -> GatewayError {
    match serde_json::from_str::<serde_json::Value>("<html>502 Bad Gateway</html>") {
        Ok(_) => unreachable!("fixture must not parse"),
        Err(e) => GatewayError::from(e),
    }
}

pub(crate) fn running(endpoint: &str) -> RemoteStatus {
    RemoteStatus {
        running: true,
        endpoint: Some(endpoint.to_string()),
        emulator_info: Some("Pixel 6, API 34".into()),
    }
}

pub(crate) fn stopped() -> RemoteStatus {
    RemoteStatus {
        running: false,
        endpoint: None,
        emulator_info: None,
    }
}

/// Scripted backend. Each queue is consumed front to back; an empty queue
/// answers with a healthy default.
#[derive(Default)]
pub(crate) struct FakeGateway {
    status: Mutex<VecDeque<GatewayResult<RemoteStatus>>>,
    start: Mutex<VecDeque<GatewayResult<StartAck>>>,
    stop: Mutex<VecDeque<GatewayResult<StopAck>>>,
    docker: Mutex<VecDeque<GatewayResult<DockerCheck>>>,
    start_gate: Option<Arc<Notify>>,
    pub status_calls: AtomicU32,
    pub start_calls: AtomicU32,
    pub stop_calls: AtomicU32,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every start request waits for a permit on `gate` before answering.
    pub(crate) fn with_start_gate(mut self, gate: Arc<Notify>) -> Self {
        self.start_gate = Some(gate);
        self
    }

    pub(crate) fn push_status(&self, result: GatewayResult<RemoteStatus>) {
        self.status.lock().unwrap().push_back(result);
    }

    pub(crate) fn push_start(&self, result: GatewayResult<StartAck>) {
        self.start.lock().unwrap().push_back(result);
    }

    pub(crate) fn push_stop(&self, result: GatewayResult<StopAck>) {
        self.stop.lock().unwrap().push_back(result);
    }

    pub(crate) fn push_docker(&self, result: GatewayResult<DockerCheck>) {
        self.docker.lock().unwrap().push_back(result);
    }

    pub(crate) fn start_calls(&self) -> u32 {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stop_calls(&self) -> u32 {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiGateway for FakeGateway {
    async fn status(&self) -> GatewayResult<RemoteStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.status.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(stopped()))
    }

    async fn start(&self) -> GatewayResult<StartAck> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.start_gate {
            gate.notified().await;
        }
        let next = self.start.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(StartAck {
                endpoint: ENDPOINT.to_string(),
                message: None,
            })
        })
    }

    async fn stop(&self) -> GatewayResult<StopAck> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.stop.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(StopAck::default()))
    }

    async fn check_docker(&self) -> GatewayResult<DockerCheck> {
        let next = self.docker.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(DockerCheck {
                available: true,
                message: Some("Docker version 27.3.1".into()),
            })
        })
    }
}

/// Probe whose n-th call (1-based) succeeds once n reaches `reachable_from`.
pub(crate) struct FakeProbe {
    reachable_from: Option<u32>,
    delay: Duration,
    calls: AtomicU32,
    endpoints: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub(crate) fn reachable() -> Self {
        Self::reachable_from_call(1)
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            reachable_from: None,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
            endpoints: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reachable_from_call(call: u32) -> Self {
        Self {
            reachable_from: Some(call),
            ..Self::unreachable()
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadinessProbe for FakeProbe {
    async fn probe(&self, endpoint: &str) -> Result<(), ProbeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.reachable_from {
            Some(from) if call >= from => Ok(()),
            _ => Err(ProbeError::Unreachable {
                message: "connection refused".into(),
            }),
        }
    }
}

/// Unreachable probe that tracks which polls are live.
///
/// Every start gets its own endpoint, and each probe stays in flight for
/// `hold`, so with warm-up 1 a live poll always has a probe outstanding.
/// Cancelling a poll drops its probes, which releases their entries.
pub(crate) struct LivePollGauge {
    hold: Duration,
    live: Mutex<HashMap<String, u32>>,
    high_water: AtomicUsize,
}

impl LivePollGauge {
    pub(crate) fn new(hold: Duration) -> Self {
        Self {
            hold,
            live: Mutex::new(HashMap::new()),
            high_water: AtomicUsize::new(0),
        }
    }

    /// Number of polls with a probe in flight right now.
    pub(crate) fn live(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    /// Most polls ever live at the same time.
    pub(crate) fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }

    fn enter(&self, endpoint: &str) {
        let mut live = self.live.lock().unwrap();
        *live.entry(endpoint.to_string()).or_default() += 1;
        self.high_water.fetch_max(live.len(), Ordering::SeqCst);
    }

    fn leave(&self, endpoint: &str) {
        let mut live = self.live.lock().unwrap();
        if let Some(count) = live.get_mut(endpoint) {
            *count -= 1;
            if *count == 0 {
                live.remove(endpoint);
            }
        }
    }
}

struct InFlight<'a> {
    gauge: &'a LivePollGauge,
    endpoint: &'a str,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gauge.leave(self.endpoint);
    }
}

#[async_trait]
impl ReadinessProbe for LivePollGauge {
    async fn probe(&self, endpoint: &str) -> Result<(), ProbeError> {
        self.enter(endpoint);
        let _in_flight = InFlight {
            gauge: self,
            endpoint,
        };
        tokio::time::sleep(self.hold).await;

        Err(ProbeError::Unreachable {
            message: "connection refused".into(),
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub ticks: Mutex<Vec<u32>>,
    pub ready: Mutex<Vec<String>>,
    pub timeouts: Mutex<Vec<u32>>,
}

impl RecordingObserver {
    pub(crate) fn ticks(&self) -> Vec<u32> {
        self.ticks.lock().unwrap().clone()
    }

    pub(crate) fn ready(&self) -> Vec<String> {
        self.ready.lock().unwrap().clone()
    }

    pub(crate) fn timeouts(&self) -> Vec<u32> {
        self.timeouts.lock().unwrap().clone()
    }
}

impl PollObserver for RecordingObserver {
    fn on_tick(&self, attempt: u32) {
        self.ticks.lock().unwrap().push(attempt);
    }

    fn on_ready(&self, endpoint: &str) {
        self.ready.lock().unwrap().push(endpoint.to_string());
    }

    fn on_timeout(&self, attempts: u32) {
        self.timeouts.lock().unwrap().push(attempts);
    }
}

pub(crate) fn controller(gateway: &Arc<FakeGateway>, probe: &Arc<FakeProbe>) -> LifecycleController {
    LifecycleController::new(gateway.clone(), probe.clone(), settings(), DISPLAY)
}

/// Everything received so far, without waiting.
pub(crate) fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}

pub(crate) async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub(crate) fn booting(elapsed_secs: u32) -> LifecycleState {
    LifecycleState::Booting { elapsed_secs }
}
