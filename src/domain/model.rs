use std::fmt;
use std::str::FromStr;

use crate::utils::error::FixtureError;

/// The greeting, fully resolved at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
}

impl Message {
    pub fn new(text: &str) -> Self {
        let mut payload = Vec::with_capacity(text.len() + 1);
        payload.extend_from_slice(text.as_bytes());
        payload.push(b'\n');
        Self { payload }
    }

    /// Message bytes plus the trailing newline.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    PreWrite,
    Suspended,
    Terminated,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::PreWrite => "pre-write",
            Lifecycle::Suspended => "suspended",
            Lifecycle::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Signals that end the suspension with a successful exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    Terminate,
    Interrupt,
    Hangup,
    Quit,
}

impl TerminationSignal {
    pub const ALL: [TerminationSignal; 4] = [
        TerminationSignal::Terminate,
        TerminationSignal::Interrupt,
        TerminationSignal::Hangup,
        TerminationSignal::Quit,
    ];

    pub fn as_raw(self) -> libc::c_int {
        match self {
            TerminationSignal::Terminate => libc::SIGTERM,
            TerminationSignal::Interrupt => libc::SIGINT,
            TerminationSignal::Hangup => libc::SIGHUP,
            TerminationSignal::Quit => libc::SIGQUIT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Hangup => "SIGHUP",
            TerminationSignal::Quit => "SIGQUIT",
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when the single write does not land in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Surface failed and short writes as errors.
    #[default]
    Strict,
    /// Ignore them and suspend anyway.
    Silent,
}

impl FromStr for WritePolicy {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(WritePolicy::Strict),
            "silent" => Ok(WritePolicy::Silent),
            other => Err(FixtureError::InvalidConfigValueError {
                field: "fixture.write_policy".to_string(),
                value: other.to_string(),
                reason: "expected 'strict' or 'silent'".to_string(),
            }),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WritePolicy::Strict => f.write_str("strict"),
            WritePolicy::Silent => f.write_str("silent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_appends_single_newline() {
        let message = Message::new("hello");
        assert_eq!(message.payload(), &[0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x0a]);
    }

    #[test]
    fn test_empty_message_is_just_a_newline() {
        let message = Message::new("");
        assert_eq!(message.payload(), b"\n");
    }

    #[test]
    fn test_message_keeps_embedded_newlines() {
        assert_eq!(Message::new("a\nb\n").payload(), b"a\nb\n\n");
    }

    #[test]
    fn test_signal_numbers() {
        assert_eq!(TerminationSignal::Terminate.as_raw(), libc::SIGTERM);
        assert_eq!(TerminationSignal::Quit.to_string(), "SIGQUIT");
    }

    #[test]
    fn test_write_policy_parse() {
        assert_eq!("strict".parse::<WritePolicy>().unwrap(), WritePolicy::Strict);
        assert_eq!("silent".parse::<WritePolicy>().unwrap(), WritePolicy::Silent);
        assert!("Strict".parse::<WritePolicy>().is_err());
        assert_eq!(WritePolicy::default(), WritePolicy::Strict);
    }
}
