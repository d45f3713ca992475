use crate::domain::model::TerminationSignal;
use crate::utils::error::Result;

/// A sink that accepts the payload in one write attempt.
pub trait Output {
    /// Issues exactly one write and reports how many bytes were accepted.
    /// Implementations must not retry or buffer.
    fn write_once(&mut self, payload: &[u8]) -> std::io::Result<usize>;
}

/// Blocks until the process is told to stop.
pub trait Waiter: Send {
    fn wait(&mut self) -> impl std::future::Future<Output = Result<TerminationSignal>> + Send;
}
