/// Receives progress and the terminal outcome of one readiness poll.
///
/// Callbacks are invoked from the poller task and must not block.
pub trait PollObserver: Send + Sync + 'static {
    /// A tick elapsed; `attempt` starts at 1 and increases by one per tick.
    fn on_tick(&self, attempt: u32);

    /// First successful probe. No further callbacks follow.
    fn on_ready(&self, endpoint: &str);

    /// Attempt budget exhausted without a successful probe. No further callbacks follow.
    fn on_timeout(&self, attempts: u32);
}
