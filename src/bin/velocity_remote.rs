use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::{path::PathBuf, sync::Arc, thread};
use tokio::{sync::mpsc, time::timeout};
use tracing::*;
use velocity_remote::{
    configuration::AppConfig, console, display::TerminalDisplay, emitter::CommandEmitter,
    input::RemoteCommand, logging, sink::HttpCommandSink,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InputSource {
    Console,
    Gamepad,
}

#[derive(Parser, Debug)]
#[command(
    version,
    author = "David M. Weis <dweis7@gmail.com>",
    about = "Velocity remote"
)]
struct Args {
    /// path to config
    #[arg(long)]
    config: Option<PathBuf>,

    /// base url of the robot, overrides config
    #[arg(long)]
    endpoint: Option<String>,

    /// where commands come from
    #[arg(long, value_enum, default_value_t = InputSource::Console)]
    input: InputSource,

    /// Sets the level of verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_tracing(args.verbosity);

    let mut app_config = AppConfig::load_config(&args.config)?;
    if let Some(endpoint) = args.endpoint {
        app_config.endpoint.base_url = endpoint;
    }

    let sink = Arc::new(HttpCommandSink::new(&app_config.endpoint));
    let mut emitter = CommandEmitter::new(
        sink,
        app_config.limits,
        app_config.dispatch.min_interval(),
    )
    .with_display(Box::new(TerminalDisplay::stdout()));

    let (sender, mut receiver) = mpsc::channel(32);
    start_input_source(args.input, sender)?;

    emitter.on_load();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(RemoteCommand::Input(event)) => {
                    emitter.handle_input(event);
                }
                Some(RemoteCommand::Quit) | None => break,
            },
            _ = &mut ctrl_c => {
                info!("Caught interrupt");
                break;
            }
        }
    }

    if let Some(handle) = emitter.on_unload() {
        if timeout(app_config.endpoint.timeout(), handle).await.is_err() {
            warn!("Final stop command did not complete in time");
        }
    }

    Ok(())
}

fn start_input_source(source: InputSource, sender: mpsc::Sender<RemoteCommand>) -> Result<()> {
    match source {
        InputSource::Console => {
            info!("Reading commands from stdin: {}", console::HELP);
            thread::spawn(move || {
                if let Err(err) = console::run_console_source(std::io::stdin().lock(), sender) {
                    error!("Console input failed with {:?}", err);
                }
            });
        }
        #[cfg(feature = "gamepad")]
        InputSource::Gamepad => {
            velocity_remote::gamepad::start_gamepad_source(sender)?;
        }
        #[cfg(not(feature = "gamepad"))]
        InputSource::Gamepad => {
            drop(sender);
            anyhow::bail!("Built without gamepad support, rebuild with --features gamepad");
        }
    }
    Ok(())
}
