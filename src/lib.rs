#![doc = include_str!("../README.md")]
pub mod configuration;
pub mod console;
pub mod display;
pub mod emitter;
pub mod error;
#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod input;
pub mod logging;
pub mod rate_limiter;
pub mod sink;
pub mod velocity;
