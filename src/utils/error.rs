use crate::domain::model::{Lifecycle, TerminationSignal};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Write to stdout failed: {0}")]
    WriteFailure(#[source] std::io::Error),

    #[error("Short write to stdout: {written} of {expected} bytes accepted")]
    ShortWrite { written: usize, expected: usize },

    #[error("Failed to install {signal} handler: {source}")]
    SignalHandlingFailure {
        signal: TerminationSignal,
        #[source]
        source: std::io::Error,
    },

    #[error("{signal} stream closed before a signal arrived")]
    SignalStreamClosed { signal: TerminationSignal },

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: Lifecycle,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Output,
    Signal,
    Lifecycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FixtureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FixtureError::WriteFailure(_) | FixtureError::ShortWrite { .. } => {
                ErrorCategory::Output
            }
            FixtureError::SignalHandlingFailure { .. }
            | FixtureError::SignalStreamClosed { .. } => ErrorCategory::Signal,
            FixtureError::InvalidState { .. } => ErrorCategory::Lifecycle,
            FixtureError::ConfigError { .. } | FixtureError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Signal | ErrorCategory::Lifecycle => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FixtureError::WriteFailure(_) => {
                "Check that stdout is open and writable (closed pipe, full disk, detached terminal)"
            }
            FixtureError::ShortWrite { .. } => {
                "Keep the message within PIPE_BUF or build with write_policy = \"silent\" to ignore short writes"
            }
            FixtureError::SignalHandlingFailure { .. } => {
                "Make sure the process is allowed to install signal handlers"
            }
            FixtureError::SignalStreamClosed { .. } => {
                "The signal driver shut down; restart the process"
            }
            FixtureError::InvalidState { .. } => {
                "Drive the fixture through emit() and then suspend(), once each"
            }
            FixtureError::ConfigError { .. } | FixtureError::InvalidConfigValueError { .. } => {
                "Rebuild with write_policy set to \"strict\" or \"silent\""
            }
        }
    }

    /// Process exit status for this error. Success is reserved for the
    /// signal path.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Output => 2,
            ErrorCategory::Signal | ErrorCategory::Lifecycle => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;
