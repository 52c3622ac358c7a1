use crate::velocity::{SpeedLimits, VelocityCommand};

const STICK_DEADZONE: f32 = 0.07;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DiscreteCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

/// Joystick displacement, both components expected in [-1, 1]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct JoystickDirection {
    pub x: f64,
    pub y: f64,
}

impl JoystickDirection {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputEvent {
    Discrete(DiscreteCommand),
    JoystickMove(JoystickDirection),
    JoystickRelease,
}

/// What an input source hands to the event loop
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RemoteCommand {
    Input(InputEvent),
    Quit,
}

impl SpeedLimits {
    /// Maps an input event to the velocity it requests.
    ///
    /// Joystick components are scaled linearly and are not clamped.
    pub fn command_for(&self, event: InputEvent) -> VelocityCommand {
        match event {
            InputEvent::Discrete(DiscreteCommand::Forward) => {
                VelocityCommand::new(self.max_linear, 0.0)
            }
            InputEvent::Discrete(DiscreteCommand::Backward) => {
                VelocityCommand::new(-self.max_linear, 0.0)
            }
            // positive angular is a left turn
            InputEvent::Discrete(DiscreteCommand::Left) => {
                VelocityCommand::new(0.0, self.max_angular)
            }
            InputEvent::Discrete(DiscreteCommand::Right) => {
                VelocityCommand::new(0.0, -self.max_angular)
            }
            InputEvent::Discrete(DiscreteCommand::Stop) | InputEvent::JoystickRelease => {
                VelocityCommand::stopped()
            }
            InputEvent::JoystickMove(direction) => VelocityCommand::new(
                direction.y * self.max_linear,
                direction.x * self.max_angular,
            ),
        }
    }
}

fn apply_deadzone(value: f32) -> f32 {
    if value.abs() < STICK_DEADZONE {
        0.0
    } else {
        value
    }
}

/// Turns raw analog stick axis updates into joystick move and release events
#[derive(Debug, Default)]
pub struct StickTracker {
    x: f32,
    y: f32,
    engaged: bool,
}

impl StickTracker {
    pub fn update_x(&mut self, value: f32) -> Option<InputEvent> {
        self.x = value;
        self.evaluate()
    }

    pub fn update_y(&mut self, value: f32) -> Option<InputEvent> {
        self.y = value;
        self.evaluate()
    }

    /// Centers the stick, releasing it if it was engaged
    pub fn reset(&mut self) -> Option<InputEvent> {
        self.x = 0.0;
        self.y = 0.0;
        self.evaluate()
    }

    fn evaluate(&mut self) -> Option<InputEvent> {
        let x = apply_deadzone(self.x);
        let y = apply_deadzone(self.y);
        if x == 0.0 && y == 0.0 {
            if self.engaged {
                self.engaged = false;
                Some(InputEvent::JoystickRelease)
            } else {
                None
            }
        } else {
            self.engaged = true;
            Some(InputEvent::JoystickMove(JoystickDirection::new(
                x as f64, y as f64,
            )))
        }
    }
}
