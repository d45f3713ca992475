use std::future::poll_fn;
use std::task::Poll;

use tokio::signal::unix::{signal, Signal, SignalKind};

use crate::domain::model::TerminationSignal;
use crate::domain::ports::Waiter;
use crate::utils::error::{FixtureError, Result};

fn kind(sig: TerminationSignal) -> SignalKind {
    match sig {
        TerminationSignal::Terminate => SignalKind::terminate(),
        TerminationSignal::Interrupt => SignalKind::interrupt(),
        TerminationSignal::Hangup => SignalKind::hangup(),
        TerminationSignal::Quit => SignalKind::quit(),
    }
}

/// Waits on tokio signal streams. Once installed, the listed signals no
/// longer take their default action for the rest of the process lifetime.
pub struct SignalWaiter {
    streams: Vec<(TerminationSignal, Signal)>,
}

impl SignalWaiter {
    /// Registers every termination signal. Must run inside a tokio runtime.
    pub fn install() -> Result<Self> {
        Self::install_for(&TerminationSignal::ALL)
    }

    pub fn install_for(signals: &[TerminationSignal]) -> Result<Self> {
        if signals.is_empty() {
            return Err(FixtureError::ConfigError {
                message: "no termination signals to wait for".to_string(),
            });
        }

        let mut streams = Vec::with_capacity(signals.len());
        for &sig in signals {
            let stream = signal(kind(sig))
                .map_err(|source| FixtureError::SignalHandlingFailure { signal: sig, source })?;
            tracing::debug!("Installed {} handler", sig);
            streams.push((sig, stream));
        }
        Ok(Self { streams })
    }
}

impl Waiter for SignalWaiter {
    async fn wait(&mut self) -> Result<TerminationSignal> {
        poll_fn(|cx| {
            for (sig, stream) in self.streams.iter_mut() {
                match stream.poll_recv(cx) {
                    Poll::Ready(Some(())) => return Poll::Ready(Ok(*sig)),
                    Poll::Ready(None) => {
                        return Poll::Ready(Err(FixtureError::SignalStreamClosed { signal: *sig }))
                    }
                    Poll::Pending => {}
                }
            }
            Poll::Pending
        })
        .await
    }
}
