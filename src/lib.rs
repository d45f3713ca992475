//! A fixture process for container and image tooling tests: it greets once
//! on stdout and then idles until a termination signal arrives.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{RawStdout, SignalWaiter};
pub use config::FixtureConfig;
pub use core::fixture::Fixture;
pub use utils::error::{FixtureError, Result};
