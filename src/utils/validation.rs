use crate::utils::error::{FixtureError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Largest write the kernel guarantees not to interleave on a pipe.
pub const PIPE_BUF: usize = libc::PIPE_BUF;

/// Whether one `write(2)` of `payload` is guaranteed not to be split on a pipe.
pub fn is_atomic_payload(payload: &[u8]) -> bool {
    payload.len() <= PIPE_BUF
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(FixtureError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
