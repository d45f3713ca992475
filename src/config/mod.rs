pub mod file;
pub mod template;

use crate::domain::model::{Message, WritePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{is_atomic_payload, validate_one_of, Validate};

/// Greeting resolved by the build script.
pub const MESSAGE: &str = include_str!(concat!(env!("OUT_DIR"), "/message.txt"));

/// Write policy resolved by the build script.
pub const WRITE_POLICY: &str = env!("PAUSE_GREETER_WRITE_POLICY_RESOLVED");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    pub message: String,
    pub write_policy: String,
}

impl FixtureConfig {
    /// The configuration baked in at build time.
    pub fn built_in() -> Self {
        Self::new(MESSAGE, WRITE_POLICY)
    }

    pub fn new(message: impl Into<String>, write_policy: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            write_policy: write_policy.into(),
        }
    }

    pub fn message(&self) -> Message {
        Message::new(&self.message)
    }

    pub fn write_policy(&self) -> Result<WritePolicy> {
        self.write_policy.parse()
    }

    /// False when the payload is too large for a single write to be atomic
    /// on a pipe. The write still goes out as one call either way.
    pub fn fits_atomic_write(&self) -> bool {
        is_atomic_payload(self.message().payload())
    }

    /// Placeholders the build left in place, e.g. `MESSAGE` when the
    /// variable was not set.
    pub fn unresolved_placeholders(&self) -> Vec<String> {
        template::placeholders(&self.message)
    }
}

impl Validate for FixtureConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of("fixture.write_policy", &self.write_policy, file::WRITE_POLICIES)
    }
}
