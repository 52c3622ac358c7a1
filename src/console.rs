use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::*;

use crate::{
    error::InputParseError,
    input::{DiscreteCommand, InputEvent, JoystickDirection, RemoteCommand},
};

pub const HELP: &str = "w/forward s/backward a/left d/right x/stop | joy <x> <y> | release | q/quit";

/// Parses one line typed into the terminal remote.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<RemoteCommand>, InputParseError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };
    let command = match first.to_lowercase().as_str() {
        "w" | "forward" => discrete(DiscreteCommand::Forward),
        "s" | "backward" => discrete(DiscreteCommand::Backward),
        "a" | "left" => discrete(DiscreteCommand::Left),
        "d" | "right" => discrete(DiscreteCommand::Right),
        "x" | "stop" | "space" => discrete(DiscreteCommand::Stop),
        "release" => RemoteCommand::Input(InputEvent::JoystickRelease),
        "q" | "quit" => RemoteCommand::Quit,
        "joy" => {
            let x = parse_component(words.next(), line)?;
            let y = parse_component(words.next(), line)?;
            RemoteCommand::Input(InputEvent::JoystickMove(JoystickDirection::new(x, y)))
        }
        _ => return Err(InputParseError::UnknownCommand(line.trim().to_owned())),
    };
    Ok(Some(command))
}

/// Forwards commands typed into `reader` until it closes, `quit` is read,
/// or the receiving side goes away.
///
/// Blocks, run it on its own thread.
pub fn run_console_source<R: BufRead>(
    reader: R,
    sender: mpsc::Sender<RemoteCommand>,
) -> std::io::Result<()> {
    for line in reader.lines() {
        match parse_line(&line?) {
            Ok(Some(command)) => {
                if sender.blocking_send(command).is_err() {
                    break;
                }
                if command == RemoteCommand::Quit {
                    break;
                }
            }
            Ok(None) => (),
            Err(err) => warn!("{}. Usage: {}", err, HELP),
        }
    }
    trace!("Console input closed");
    Ok(())
}

fn discrete(command: DiscreteCommand) -> RemoteCommand {
    RemoteCommand::Input(InputEvent::Discrete(command))
}

fn parse_component(word: Option<&str>, line: &str) -> Result<f64, InputParseError> {
    let word = word.ok_or_else(|| InputParseError::MissingComponent(line.trim().to_owned()))?;
    match word.parse::<f64>() {
        Ok(value) if (-1.0..=1.0).contains(&value) => Ok(value),
        Ok(value) if value.is_finite() => Err(InputParseError::OutOfRange(word.to_owned())),
        _ => Err(InputParseError::InvalidComponent(word.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_aliases() {
        let cases = [
            ("w", DiscreteCommand::Forward),
            ("Forward", DiscreteCommand::Forward),
            ("s", DiscreteCommand::Backward),
            ("backward", DiscreteCommand::Backward),
            ("a", DiscreteCommand::Left),
            ("d", DiscreteCommand::Right),
            ("  x ", DiscreteCommand::Stop),
            ("space", DiscreteCommand::Stop),
        ];
        for (line, expected) in cases {
            assert_eq!(
                parse_line(line),
                Ok(Some(discrete(expected))),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn joystick_lines() {
        assert_eq!(
            parse_line("joy 0.5 -1"),
            Ok(Some(RemoteCommand::Input(InputEvent::JoystickMove(
                JoystickDirection::new(0.5, -1.0)
            ))))
        );
        assert_eq!(
            parse_line("release"),
            Ok(Some(RemoteCommand::Input(InputEvent::JoystickRelease)))
        );
    }

    #[test]
    fn blank_and_quit() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("q"), Ok(Some(RemoteCommand::Quit)));
        assert_eq!(parse_line("quit"), Ok(Some(RemoteCommand::Quit)));
    }

    #[test]
    fn console_source_forwards_until_quit() {
        let (sender, mut receiver) = mpsc::channel(8);
        let input: &[u8] = b"w\njump\n\njoy 1 0\nq\nd\n";

        run_console_source(input, sender).unwrap();

        let mut received = vec![];
        while let Some(command) = receiver.blocking_recv() {
            received.push(command);
        }
        assert_eq!(
            received,
            vec![
                discrete(DiscreteCommand::Forward),
                RemoteCommand::Input(InputEvent::JoystickMove(JoystickDirection::new(1.0, 0.0))),
                RemoteCommand::Quit,
            ]
        );
    }

    #[test]
    fn joystick_components_must_be_normalized() {
        assert_eq!(
            parse_line("joy 1.01 0"),
            Err(InputParseError::OutOfRange(String::from("1.01")))
        );
        assert_eq!(
            parse_line("joy 0 -2"),
            Err(InputParseError::OutOfRange(String::from("-2")))
        );
        assert_eq!(
            parse_line("joy 5 -3"),
            Err(InputParseError::OutOfRange(String::from("5")))
        );
        // bounds themselves are accepted
        assert_eq!(
            parse_line("joy -1 1"),
            Ok(Some(RemoteCommand::Input(InputEvent::JoystickMove(
                JoystickDirection::new(-1.0, 1.0)
            ))))
        );
    }

    #[test]
    fn bad_lines() {
        assert_eq!(
            parse_line("jump"),
            Err(InputParseError::UnknownCommand(String::from("jump")))
        );
        assert_eq!(
            parse_line("joy 0.5"),
            Err(InputParseError::MissingComponent(String::from("joy 0.5")))
        );
        assert_eq!(
            parse_line("joy 0.5 up"),
            Err(InputParseError::InvalidComponent(String::from("up")))
        );
        assert_eq!(
            parse_line("joy NaN 0"),
            Err(InputParseError::InvalidComponent(String::from("NaN")))
        );
    }
}
