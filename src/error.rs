use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SinkError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("send task failed")]
    TaskFailed(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum InputParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("joystick move needs two components, got {0:?}")]
    MissingComponent(String),
    #[error("invalid joystick component {0:?}")]
    InvalidComponent(String),
    #[error("joystick component {0:?} outside of [-1, 1]")]
    OutOfRange(String),
}
