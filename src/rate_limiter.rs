use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_MIN_DISPATCH_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GateDecision {
    Open,
    Closed { elapsed: Duration },
}

/// Minimum interval gate between dispatches.
///
/// Attempts inside the window are rejected, not delayed.
#[derive(Debug)]
pub struct DispatchGate {
    min_interval: Duration,
    last_dispatch: Option<Instant>,
}

impl DispatchGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: None,
        }
    }

    pub fn try_pass(&mut self, now: Instant) -> GateDecision {
        if let Some(last_dispatch) = self.last_dispatch {
            let elapsed = now.saturating_duration_since(last_dispatch);
            if elapsed < self.min_interval {
                return GateDecision::Closed { elapsed };
            }
        }
        self.last_dispatch = Some(now);
        GateDecision::Open
    }
}

impl Default for DispatchGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISPATCH_INTERVAL)
    }
}
