use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::Instant};
use tracing::*;

use crate::{
    display::VelocityDisplay,
    input::InputEvent,
    rate_limiter::{DispatchGate, GateDecision},
    sink::CommandSink,
    velocity::{SpeedLimits, VelocityCommand},
};

/// Handle to an in flight command. Dropping it does not cancel the request.
pub type DispatchHandle = JoinHandle<()>;

/// Owns the current velocity and forwards changes to a [`CommandSink`],
/// at most once per minimum dispatch interval.
pub struct CommandEmitter {
    velocity: VelocityCommand,
    limits: SpeedLimits,
    gate: DispatchGate,
    sink: Arc<dyn CommandSink>,
    display: Option<Box<dyn VelocityDisplay>>,
}

impl CommandEmitter {
    pub fn new(sink: Arc<dyn CommandSink>, limits: SpeedLimits, min_interval: Duration) -> Self {
        Self {
            velocity: VelocityCommand::stopped(),
            limits,
            gate: DispatchGate::new(min_interval),
            sink,
            display: None,
        }
    }

    pub fn with_display(mut self, display: Box<dyn VelocityDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn velocity(&self) -> VelocityCommand {
        self.velocity
    }

    /// Updates the local state and tries to dispatch it.
    ///
    /// Callers are responsible for keeping values within [`SpeedLimits`].
    /// Returns `None` when the dispatch interval has not elapsed yet, in which
    /// case only the local state changed.
    pub fn set_velocity(&mut self, linear: f64, angular: f64) -> Option<DispatchHandle> {
        self.velocity = VelocityCommand::new(linear, angular);
        if let Some(display) = self.display.as_mut() {
            display.update(&self.velocity.readout());
        }
        self.dispatch(self.velocity)
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<DispatchHandle> {
        let command = self.limits.command_for(event);
        trace!(?event, ?command, "Input received");
        self.set_velocity(command.linear, command.angular)
    }

    pub fn on_load(&mut self) -> Option<DispatchHandle> {
        info!("Remote started, stopping robot");
        self.set_velocity(0.0, 0.0)
    }

    /// Best effort stop. Subject to the same dispatch interval as any other command.
    pub fn on_unload(&mut self) -> Option<DispatchHandle> {
        info!("Remote closing, stopping robot");
        self.set_velocity(0.0, 0.0)
    }

    fn dispatch(&mut self, command: VelocityCommand) -> Option<DispatchHandle> {
        match self.gate.try_pass(Instant::now()) {
            GateDecision::Open => {
                let sink = Arc::clone(&self.sink);
                Some(tokio::spawn(async move {
                    match sink.send(command).await {
                        Ok(ack) => info!(status = ack.status, body = %ack.body, "Command sent"),
                        Err(err) => error!("Failed to send command {:?}: {:?}", command, err),
                    }
                }))
            }
            GateDecision::Closed { elapsed } => {
                debug!(?elapsed, "Dispatch interval not elapsed, command not sent");
                None
            }
        }
    }
}
