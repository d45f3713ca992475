use anyhow::{bail, Context, Result};
use pause_greeter::config::{MESSAGE, WRITE_POLICY};
use std::fs::File;
use std::io::Read;
use std::os::fd::FromRawFd;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const EXIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Kills the child if a test bails out early.
struct Running {
    child: Child,
    stdout: ChildStdout,
}

impl Running {
    fn spawn() -> Result<Self> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_pause-greeter"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .context("spawn pause-greeter")?;
        let stdout = child.stdout.take().context("child stdout")?;
        Ok(Self { child, stdout })
    }

    fn read_greeting(&mut self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; expected_payload().len()];
        self.stdout
            .read_exact(&mut buf)
            .context("read greeting from stdout")?;
        Ok(buf)
    }

    fn is_alive(&mut self) -> Result<bool> {
        Ok(self.child.try_wait()?.is_none())
    }

    fn signal(&self, sig: libc::c_int) -> Result<()> {
        // SAFETY: plain kill(2) on our own child's pid.
        let rc = unsafe { libc::kill(self.child.id() as libc::pid_t, sig) };
        if rc != 0 {
            bail!("kill failed: {}", std::io::Error::last_os_error());
        }
        Ok(())
    }

    fn wait_with_timeout(&mut self) -> Result<ExitStatus> {
        wait_for_exit(&mut self.child)
    }

    fn rest_of_stdout(&mut self) -> Result<Vec<u8>> {
        let mut rest = Vec::new();
        self.stdout.read_to_end(&mut rest)?;
        Ok(rest)
    }
}

/// A child whose stdout is a pipe with no reader, so its write gets EPIPE.
struct Orphaned {
    child: Child,
}

impl Orphaned {
    fn spawn() -> Result<Self> {
        let mut fds = [0; 2];
        // SAFETY: fds has room for both ends; each end is owned by one File.
        // O_CLOEXEC keeps the read end out of children spawned by other tests.
        let (reader, writer) = unsafe {
            if libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) != 0 {
                bail!("pipe failed: {}", std::io::Error::last_os_error());
            }
            (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1]))
        };
        drop(reader);

        let child = Command::new(env!("CARGO_BIN_EXE_pause-greeter"))
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::null())
            .spawn()
            .context("spawn pause-greeter")?;
        Ok(Self { child })
    }
}

impl Drop for Orphaned {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn wait_for_exit(child: &mut Child) -> Result<ExitStatus> {
    let deadline = Instant::now() + EXIT_TIMEOUT;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            bail!("pause-greeter did not exit within {:?}", EXIT_TIMEOUT);
        }
        thread::sleep(Duration::from_millis(20));
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn expected_payload() -> Vec<u8> {
    let mut payload = MESSAGE.as_bytes().to_vec();
    payload.push(b'\n');
    payload
}

fn greet_then_stop(sig: libc::c_int) -> Result<()> {
    let mut proc = Running::spawn()?;

    assert_eq!(proc.read_greeting()?, expected_payload());

    thread::sleep(Duration::from_millis(300));
    assert!(proc.is_alive()?, "fixture exited without being signalled");

    proc.signal(sig)?;
    let status = proc.wait_with_timeout()?;
    assert!(status.success(), "unexpected exit status: {status}");

    assert!(proc.rest_of_stdout()?.is_empty(), "extra bytes after greeting");
    Ok(())
}

#[test]
fn test_sigterm_exits_successfully() -> Result<()> {
    greet_then_stop(libc::SIGTERM)
}

#[test]
fn test_sigint_exits_successfully() -> Result<()> {
    greet_then_stop(libc::SIGINT)
}

#[test]
fn test_sighup_exits_successfully() -> Result<()> {
    greet_then_stop(libc::SIGHUP)
}

#[test]
fn test_sigquit_exits_successfully() -> Result<()> {
    greet_then_stop(libc::SIGQUIT)
}

#[test]
fn test_idle_period_produces_no_more_output() -> Result<()> {
    let mut proc = Running::spawn()?;
    assert_eq!(proc.read_greeting()?, expected_payload());

    thread::sleep(Duration::from_secs(1));
    assert!(proc.is_alive()?);

    proc.signal(libc::SIGTERM)?;
    proc.wait_with_timeout()?;
    assert!(proc.rest_of_stdout()?.is_empty());
    Ok(())
}

#[test]
fn test_closed_stdout_follows_write_policy() -> Result<()> {
    let mut proc = Orphaned::spawn()?;

    if WRITE_POLICY == "strict" {
        let status = wait_for_exit(&mut proc.child)?;
        assert_eq!(status.code(), Some(2), "unexpected exit status: {status}");
    } else {
        thread::sleep(Duration::from_millis(300));
        assert!(proc.child.try_wait()?.is_none(), "silent fixture stopped early");

        // SAFETY: plain kill(2) on our own child's pid.
        let rc = unsafe { libc::kill(proc.child.id() as libc::pid_t, libc::SIGTERM) };
        assert_eq!(rc, 0);
        let status = wait_for_exit(&mut proc.child)?;
        assert!(status.success(), "unexpected exit status: {status}");
    }
    Ok(())
}
