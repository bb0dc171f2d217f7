/// Resolver invoker - launches the external tool and collects its output
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tuneline_core::{Result, TunelineError};

/// What the resolver is asked to do
///
/// Each mode fully determines the argument list. User input only ever lands
/// in one argument slot and never passes through a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode<'a> {
    /// Free-text search capped at `limit` results
    Search { query: &'a str, limit: u32 },
    /// Resolve a locator to a direct stream URL in the preferred format
    ResolveStream { source_ref: &'a str, format: &'a str },
}

impl InvocationMode<'_> {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            InvocationMode::Search { .. } => "search",
            InvocationMode::ResolveStream { .. } => "resolve-stream",
        }
    }

    /// Mode arguments handed to the resolver
    pub fn args(&self) -> Vec<String> {
        match self {
            InvocationMode::Search { query, limit } => vec![
                "--quiet".to_string(),
                "--dump-json".to_string(),
                "--flat-playlist".to_string(),
                format!("ytsearch{}:{}", limit, query),
            ],
            InvocationMode::ResolveStream { source_ref, format } => vec![
                "--quiet".to_string(),
                "--get-url".to_string(),
                "--format".to_string(),
                (*format).to_string(),
                // Stop option parsing so a locator starting with '-' stays a locator
                "--".to_string(),
                (*source_ref).to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverInvoker {
    binary_path: PathBuf,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl ResolverInvoker {
    pub fn new(binary_path: PathBuf, timeout: Duration) -> Self {
        Self {
            binary_path,
            extra_args: Vec::new(),
            timeout,
        }
    }

    /// Arguments placed before the mode arguments on every call
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the resolver once and return everything it printed on stdout
    ///
    /// Stderr is only logged. The child is killed if the timeout expires, if
    /// `cancel` fires, or if the returned future is dropped.
    pub async fn invoke(
        &self,
        mode: &InvocationMode<'_>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let label = mode.label();

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(&self.extra_args)
            .args(mode.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            tracing::error!(
                mode = label,
                "Failed to launch resolver {:?}: {}",
                self.binary_path,
                e
            );
            TunelineError::ResolverSpawn(format!("{}: {}", self.binary_path.display(), e))
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let outcome = {
            let read_stdout = async move {
                let mut buf = Vec::new();
                if let Some(mut out) = stdout {
                    out.read_to_end(&mut buf).await?;
                }
                Ok::<_, std::io::Error>(buf)
            };

            let drain_stderr = async move {
                if let Some(err) = stderr {
                    let mut reader = BufReader::new(err);
                    let mut line = Vec::new();
                    while matches!(reader.read_until(b'\n', &mut line).await, Ok(n) if n > 0) {
                        tracing::debug!(
                            mode = label,
                            "resolver stderr: {}",
                            String::from_utf8_lossy(&line).trim_end()
                        );
                        line.clear();
                    }
                }
            };

            let run = async {
                let (out, (), status) = tokio::join!(read_stdout, drain_stderr, child.wait());
                (out, status)
            };

            tokio::select! {
                finished = tokio::time::timeout(self.timeout, run) => Some(finished),
                () = cancel.cancelled() => None,
            }
        };

        let (out, status) = match outcome {
            Some(Ok(done)) => done,
            Some(Err(_elapsed)) => {
                tracing::warn!(mode = label, "Resolver exceeded {:?}, killing it", self.timeout);
                reap(&mut child).await;
                return Err(TunelineError::ResolverTimeout(self.timeout));
            }
            None => {
                tracing::info!(mode = label, "Resolver call cancelled, killing it");
                reap(&mut child).await;
                return Err(TunelineError::ResolverCancelled);
            }
        };

        let status = status.map_err(|e| TunelineError::Other(format!("Waiting on resolver: {}", e)))?;
        if !status.success() {
            tracing::warn!(mode = label, "Resolver process exited with code {:?}", status.code());
            return Err(TunelineError::ResolverProcessFailed {
                exit_code: status.code(),
            });
        }

        let out = out.map_err(|e| TunelineError::Other(format!("Reading resolver output: {}", e)))?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

async fn reap(child: &mut tokio::process::Child) {
    if let Err(e) = child.start_kill() {
        tracing::debug!("Resolver already gone: {}", e);
    }
    let _ = child.wait().await;
}
