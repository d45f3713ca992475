// Adapters layer: the OS-facing implementations of the domain ports.

pub mod signal;
pub mod stdout;

pub use signal::SignalWaiter;
pub use stdout::RawStdout;
