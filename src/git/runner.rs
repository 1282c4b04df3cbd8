//! Deadline-bounded subprocess runner
//!
//! Spawns a process, drains stdout and stderr on dedicated reader threads,
//! and polls the child until it exits or its deadline passes. A child that
//! overruns is killed and reaped before the runner returns.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::GitError;
use super::command::{CommandResult, CommandSpec};
use super::constants::{FORCED_ENV, KILL_DRAIN_GRACE, OUTPUT_FLUSH_GRACE, POLL_INTERVAL};

/// Stateless runner; every call owns its own child, buffers and clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a command to completion or until its deadline.
    ///
    /// A non-zero exit is still `Ok`: interpreting it is the caller's job.
    pub fn run(&self, spec: &CommandSpec) -> Result<CommandResult, GitError> {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.args())
            .current_dir(spec.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (key, value) in spec.env() {
            cmd.env(key, value);
        }
        // Applied last so caller overrides cannot re-enable prompts
        for (key, value) in FORCED_ENV {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|source| GitError::SpawnFailure {
            command: spec.canonical(),
            source,
        })?;
        debug!(command = %spec.canonical(), dir = %spec.working_dir().display(), "spawned");

        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());
        let started = Instant::now();

        match wait_with_deadline(&mut child, spec.deadline(), started)? {
            Some(exit_code) => {
                let flush_until = Instant::now() + OUTPUT_FLUSH_GRACE;
                stdout.finish(flush_until);
                stderr.finish(flush_until);
                let result = CommandResult {
                    stdout: stdout.contents(),
                    stderr: stderr.contents(),
                    exit_code,
                };
                debug!(
                    command = %spec.canonical(),
                    exit_code,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "finished"
                );
                Ok(result)
            }
            None => {
                // One drain budget for both streams, counted from the deadline
                let drain_until = started + spec.deadline() + KILL_DRAIN_GRACE;
                stdout.finish(drain_until);
                stderr.finish(drain_until);
                warn!(
                    command = %spec.canonical(),
                    deadline_ms = spec.deadline().as_millis() as u64,
                    dir = %spec.working_dir().display(),
                    partial_stderr = %stderr.contents().trim(),
                    "timed out, child killed"
                );
                Err(GitError::Timeout {
                    command: spec.canonical(),
                    deadline: spec.deadline(),
                    working_dir: spec.working_dir().to_path_buf(),
                })
            }
        }
    }
}

/// Poll the child until it exits (`Some(code)`) or the deadline passes
/// (`None`, after the child has been killed and reaped).
fn wait_with_deadline(
    child: &mut Child,
    deadline: Duration,
    started: Instant,
) -> Result<Option<i32>, GitError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status.code().unwrap_or(-1))),
            Ok(None) => {}
            Err(e) => {
                kill_and_reap(child);
                return Err(e.into());
            }
        }

        let elapsed = started.elapsed();
        if elapsed >= deadline {
            // kill fails only if the child already exited; reaping covers both
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL.min(deadline - elapsed));
    }
}

/// Best-effort kill and reap on a path that is already failing
fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Accumulates everything written to one stream until EOF.
///
/// The buffer is shared so that a reader stuck behind a pipe held open by a
/// grandchild never holds the caller past its grace period.
struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Option<Receiver<()>>,
}

impl Capture {
    fn start<R>(stream: Option<R>) -> Self
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let Some(mut stream) = stream else {
            return Self { buffer, done: None };
        };

        let (tx, rx) = mpsc::channel();
        let sink = Arc::clone(&buffer);
        thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match stream.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => match sink.lock() {
                        Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            let _ = tx.send(());
        });

        Self {
            buffer,
            done: Some(rx),
        }
    }

    /// Wait until `until` at the latest for the reader to hit EOF
    fn finish(&self, until: Instant) {
        if let Some(done) = &self.done {
            let _ = done.recv_timeout(until.saturating_duration_since(Instant::now()));
        }
    }

    /// Snapshot of the bytes captured so far, decoded lossily
    fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let spec = CommandSpec::new("gitfleet-definitely-missing-binary", ["status"], ".");
        let err = ProcessRunner::new().run(&spec).unwrap_err();
        assert!(matches!(err, GitError::SpawnFailure { .. }), "{err:?}");
    }

    #[test]
    fn test_capture_without_stream_is_empty() {
        let capture = Capture::start(None::<std::io::Empty>);
        capture.finish(Instant::now() + Duration::from_millis(1));
        assert_eq!(capture.contents(), "");
    }

    #[test]
    fn test_capture_reads_until_eof() {
        let capture = Capture::start(Some(io::Cursor::new(b"hello\nworld".to_vec())));
        capture.finish(Instant::now() + Duration::from_secs(5));
        assert_eq!(capture.contents(), "hello\nworld");
    }

    #[test]
    fn test_finish_shares_one_deadline_across_streams() {
        // Readers that never reach EOF
        let (_tx_out, rx_out) = mpsc::channel::<()>();
        let (_tx_err, rx_err) = mpsc::channel::<()>();
        let stdout = Capture {
            buffer: Arc::default(),
            done: Some(rx_out),
        };
        let stderr = Capture {
            buffer: Arc::default(),
            done: Some(rx_err),
        };

        let started = Instant::now();
        let until = started + Duration::from_millis(100);
        stdout.finish(until);
        stderr.finish(until);

        assert!(started.elapsed() < Duration::from_millis(180), "{:?}", started.elapsed());
    }

    #[cfg(unix)]
    #[test]
    fn test_kill_and_reap_leaves_no_live_child() {
        let mut child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .spawn()
            .unwrap();

        kill_and_reap(&mut child);

        assert!(child.try_wait().unwrap().is_some());
    }
}
