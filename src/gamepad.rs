use anyhow::{anyhow, Result};
use gilrs::{Axis, Button, Event, EventType, Gilrs};
use std::{thread, time::Duration};
use tokio::sync::mpsc;
use tracing::*;

use crate::input::{DiscreteCommand, InputEvent, RemoteCommand, StickTracker};

const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// Reads the first gamepad on a dedicated thread.
///
/// Left stick drives the joystick mapping, d-pad and south button the discrete ones.
pub fn start_gamepad_source(
    sender: mpsc::Sender<RemoteCommand>,
) -> Result<thread::JoinHandle<()>> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    let handle = thread::spawn(move || {
        let mut gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                let _ = ready_tx.send(Ok(()));
                gilrs
            }
            Err(err) => {
                let _ = ready_tx.send(Err(anyhow!("Failed to open gamepad input: {}", err)));
                return;
            }
        };
        for (_id, gamepad) in gilrs.gamepads() {
            info!("Found gamepad {}", gamepad.name());
        }

        let mut tracker = StickTracker::default();
        loop {
            match gilrs.next_event_blocking(Some(POLL_TIMEOUT)) {
                Some(Event { event, .. }) => {
                    if let Some(input) = map_event(&mut tracker, event) {
                        if sender.blocking_send(RemoteCommand::Input(input)).is_err() {
                            break;
                        }
                    }
                }
                None if sender.is_closed() => break,
                None => (),
            }
        }
        trace!("Gamepad input closed");
    });
    ready_rx
        .recv()
        .map_err(|_| anyhow!("Gamepad thread exited during startup"))??;
    Ok(handle)
}

/// Subset of gilrs events the remote reacts to
#[derive(Debug, PartialEq, Clone, Copy)]
enum GamepadInput {
    Axis(Axis, f32),
    ButtonPressed(Button),
    Connected,
    Disconnected,
}

fn map_event(tracker: &mut StickTracker, event: EventType) -> Option<InputEvent> {
    let input = match event {
        EventType::AxisChanged(axis, value, _) => GamepadInput::Axis(axis, value),
        EventType::ButtonPressed(button, _) => GamepadInput::ButtonPressed(button),
        EventType::Connected => GamepadInput::Connected,
        EventType::Disconnected => GamepadInput::Disconnected,
        _ => return None,
    };
    map_input(tracker, input)
}

fn map_input(tracker: &mut StickTracker, input: GamepadInput) -> Option<InputEvent> {
    match input {
        GamepadInput::Axis(Axis::LeftStickX, value) => tracker.update_x(value),
        GamepadInput::Axis(Axis::LeftStickY, value) => tracker.update_y(value),
        GamepadInput::Axis(..) => None,
        GamepadInput::ButtonPressed(Button::DPadUp) => {
            Some(InputEvent::Discrete(DiscreteCommand::Forward))
        }
        GamepadInput::ButtonPressed(Button::DPadDown) => {
            Some(InputEvent::Discrete(DiscreteCommand::Backward))
        }
        GamepadInput::ButtonPressed(Button::DPadLeft) => {
            Some(InputEvent::Discrete(DiscreteCommand::Left))
        }
        GamepadInput::ButtonPressed(Button::DPadRight) => {
            Some(InputEvent::Discrete(DiscreteCommand::Right))
        }
        GamepadInput::ButtonPressed(Button::South) => {
            Some(InputEvent::Discrete(DiscreteCommand::Stop))
        }
        GamepadInput::ButtonPressed(_) => None,
        GamepadInput::Connected => {
            info!("Gamepad connected");
            None
        }
        GamepadInput::Disconnected => {
            warn!("Gamepad disconnected");
            tracker.reset()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::JoystickDirection;

    #[test]
    fn dpad_and_south_map_to_discrete_commands() {
        let mut tracker = StickTracker::default();
        let cases = [
            (Button::DPadUp, DiscreteCommand::Forward),
            (Button::DPadDown, DiscreteCommand::Backward),
            (Button::DPadLeft, DiscreteCommand::Left),
            (Button::DPadRight, DiscreteCommand::Right),
            (Button::South, DiscreteCommand::Stop),
        ];
        for (button, expected) in cases {
            assert_eq!(
                map_input(&mut tracker, GamepadInput::ButtonPressed(button)),
                Some(InputEvent::Discrete(expected)),
                "{:?}",
                button
            );
        }
    }

    #[test]
    fn other_buttons_and_axes_are_ignored() {
        let mut tracker = StickTracker::default();
        assert_eq!(
            map_input(&mut tracker, GamepadInput::ButtonPressed(Button::North)),
            None
        );
        assert_eq!(
            map_input(&mut tracker, GamepadInput::Axis(Axis::RightStickX, 1.0)),
            None
        );
        assert_eq!(map_input(&mut tracker, GamepadInput::Connected), None);
    }

    #[test]
    fn left_stick_drives_joystick() {
        let mut tracker = StickTracker::default();
        assert_eq!(
            map_input(&mut tracker, GamepadInput::Axis(Axis::LeftStickY, 1.0)),
            Some(InputEvent::JoystickMove(JoystickDirection::new(0.0, 1.0)))
        );
        assert_eq!(
            map_input(&mut tracker, GamepadInput::Axis(Axis::LeftStickX, -0.5)),
            Some(InputEvent::JoystickMove(JoystickDirection::new(-0.5, 1.0)))
        );
    }

    #[test]
    fn disconnect_releases_engaged_stick() {
        let mut tracker = StickTracker::default();
        map_input(&mut tracker, GamepadInput::Axis(Axis::LeftStickX, 0.5));

        assert_eq!(
            map_input(&mut tracker, GamepadInput::Disconnected),
            Some(InputEvent::JoystickRelease)
        );
        assert_eq!(map_input(&mut tracker, GamepadInput::Disconnected), None);
    }
}
