use std::io;
use std::os::fd::RawFd;

use crate::domain::ports::Output;

/// Writes straight to a file descriptor with `write(2)`, skipping the
/// buffering and locking of `std::io::Stdout`.
#[derive(Debug, Clone, Copy)]
pub struct RawStdout {
    fd: RawFd,
}

impl RawStdout {
    pub fn new() -> Self {
        Self {
            fd: libc::STDOUT_FILENO,
        }
    }

    /// Targets another descriptor. The caller keeps it open for as long as
    /// this value is used; a stale descriptor only yields `EBADF`.
    pub fn with_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl Default for RawStdout {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for RawStdout {
    fn write_once(&mut self, payload: &[u8]) -> io::Result<usize> {
        // SAFETY: the pointer and length describe a live, initialised slice.
        let rc = unsafe { libc::write(self.fd, payload.as_ptr().cast(), payload.len()) };
        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(rc as usize)
        }
    }
}
