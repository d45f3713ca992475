pub mod fixture;

pub use crate::domain::model::{Lifecycle, Message, TerminationSignal, WritePolicy};
pub use crate::domain::ports::{Output, Waiter};
pub use crate::utils::error::Result;
