use crate::error::ScanError;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of one process run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Output {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub success: bool,
}

/// Cooperative cancellation shared between a caller and a running process.
///
/// Clones share the flag. A token with a deadline reports itself cancelled
/// once the deadline has passed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Executes external programs.
pub trait Runner {
    /// Run `program` to completion, feeding `stdin` if given.
    ///
    /// A non-zero exit is not an error here: it is reported through
    /// [`Output::success`]. Errors are reserved for spawn failures and
    /// cancellation.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        cancel: &CancelToken,
    ) -> Result<Output, ScanError>;
}

impl<R: Runner + ?Sized> Runner for Arc<R> {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        cancel: &CancelToken,
    ) -> Result<Output, ScanError> {
        (**self).run(program, args, stdin, cancel)
    }
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        cancel: &CancelToken,
    ) -> Result<Output, ScanError> {
        (**self).run(program, args, stdin, cancel)
    }
}

/// Runs real processes with `std::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        cancel: &CancelToken,
    ) -> Result<Output, ScanError> {
        debug!(program, ?args, "spawning");
        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ScanError::NotFound(program.to_string()),
                _ => ScanError::Exec {
                    tool: program.to_string(),
                    stderr: String::new(),
                    source: Some(e),
                },
            })?;

        // Stdin is written from its own thread so a child that fills its
        // output pipes before reading input cannot deadlock us.
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => {
                let input = input.to_vec();
                Some(thread::spawn(move || {
                    let _ = pipe.write_all(&input);
                }))
            }
            _ => None,
        };
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    reap(&mut child);
                    return Err(ScanError::Exec {
                        tool: program.to_string(),
                        stderr: String::new(),
                        source: Some(e),
                    });
                }
            }
            if cancel.is_cancelled() {
                debug!(program, "cancelled; killing child");
                reap(&mut child);
                let _ = stdout.join();
                let _ = stderr.join();
                return Err(ScanError::Cancelled(program.to_string()));
            }
            thread::sleep(POLL_INTERVAL);
        };

        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let output = Output {
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
            success: status.success(),
        };
        debug!(program, success = output.success, "finished");
        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
