use crate::core::{Lifecycle, Message, Output, TerminationSignal, Waiter, WritePolicy};
use crate::utils::error::{FixtureError, Result};

/// Greets once, then holds the process until a termination signal.
pub struct Fixture<O: Output, W: Waiter> {
    output: O,
    waiter: W,
    message: Message,
    policy: WritePolicy,
    state: Lifecycle,
}

impl<O: Output, W: Waiter> Fixture<O, W> {
    pub fn new(output: O, waiter: W, message: Message, policy: WritePolicy) -> Self {
        Self {
            output,
            waiter,
            message,
            policy,
            state: Lifecycle::PreWrite,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Emits the greeting and then suspends until signalled.
    pub async fn run(&mut self) -> Result<TerminationSignal> {
        self.emit()?;
        self.suspend().await
    }

    /// Writes the payload with a single call. Never retried.
    pub fn emit(&mut self) -> Result<()> {
        self.expect_state("emit", Lifecycle::PreWrite)?;

        let payload = self.message.payload();
        let outcome = match self.output.write_once(payload) {
            Ok(written) if written == payload.len() => Ok(()),
            Ok(written) => Err(FixtureError::ShortWrite {
                written,
                expected: payload.len(),
            }),
            Err(e) => Err(FixtureError::WriteFailure(e)),
        };

        match (outcome, self.policy) {
            (Ok(()), _) => {
                tracing::debug!("Greeting written ({} bytes)", payload.len());
            }
            (Err(e), WritePolicy::Silent) => {
                tracing::debug!("Ignoring write problem under silent policy: {}", e);
            }
            (Err(e), WritePolicy::Strict) => {
                self.state = Lifecycle::Terminated;
                return Err(e);
            }
        }

        self.state = Lifecycle::Suspended;
        Ok(())
    }

    /// Blocks until the waiter reports a termination signal.
    pub async fn suspend(&mut self) -> Result<TerminationSignal> {
        self.expect_state("suspend", Lifecycle::Suspended)?;
        tracing::debug!("Suspended, waiting for a termination signal");

        let result = self.waiter.wait().await;
        self.state = Lifecycle::Terminated;
        let signal = result?;
        tracing::info!("Received {}, shutting down", signal);
        Ok(signal)
    }

    fn expect_state(&self, operation: &'static str, expected: Lifecycle) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FixtureError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
