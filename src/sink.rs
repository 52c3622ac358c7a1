use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::*;

use crate::{error::SinkError, velocity::VelocityCommand};

/// Response of the control endpoint. Logged, never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandAck {
    pub status: u16,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send(&self, command: VelocityCommand) -> Result<CommandAck, SinkError>;
}

#[derive(Deserialize, Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_path() -> String {
    String::from("/cmd_vel")
}

fn default_timeout_ms() -> u64 {
    1000
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: default_path(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Posts velocity commands as JSON to the control endpoint
pub struct HttpCommandSink {
    agent: ureq::Agent,
    url: String,
}

impl HttpCommandSink {
    pub fn new(config: &EndpointConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        let url = config.url();
        info!("Sending commands to {}", url);
        Self { agent, url }
    }
}

#[async_trait]
impl CommandSink for HttpCommandSink {
    async fn send(&self, command: VelocityCommand) -> Result<CommandAck, SinkError> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        tokio::task::spawn_blocking(move || post_command(&agent, &url, command)).await?
    }
}

fn post_command(
    agent: &ureq::Agent,
    url: &str,
    command: VelocityCommand,
) -> Result<CommandAck, SinkError> {
    let response = match agent.post(url).send_json(command) {
        Ok(response) => response,
        // error statuses still carry a json body worth logging
        Err(ureq::Error::Status(_, response)) => response,
        Err(err) => {
            return Err(SinkError::Transport {
                url: url.to_owned(),
                source: Box::new(err),
            })
        }
    };
    let status = response.status();
    let body = response
        .into_json::<serde_json::Value>()
        .map_err(|source| SinkError::Decode {
            url: url.to_owned(),
            source,
        })?;
    Ok(CommandAck { status, body })
}
