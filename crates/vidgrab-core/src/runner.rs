//! External command execution
//!
//! Everything that spawns yt-dlp or ffmpeg goes through [`CommandRunner`] so the
//! argument building stays pure and tests can swap in a stub.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with inherited stdio and return the exit code.
    async fn status(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>>;

    /// Run with captured output. An elapsed `timeout` yields `ErrorKind::TimedOut`.
    async fn output(
        &self,
        program: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> io::Result<CommandOutput>;
}

/// Runs commands on the host via `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn status(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>> {
        debug!("Running: {} {}", program.display(), args.join(" "));

        let status = Command::new(program).args(args).status().await?;
        Ok(status.code())
    }

    async fn output(
        &self,
        program: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> io::Result<CommandOutput> {
        debug!("Running (captured): {} {}", program.display(), args.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, child)
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "command timed out"))??,
            None => child.await?,
        };

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records every invocation and replies with a canned result.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
        pub reply: CommandOutput,
        pub spawn_error: Option<io::ErrorKind>,
    }

    impl RecordingRunner {
        pub fn replying(code: i32, stdout: &str) -> Self {
            Self {
                reply: CommandOutput {
                    code: Some(code),
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
                ..Default::default()
            }
        }

        pub fn failing_with(kind: io::ErrorKind) -> Self {
            Self {
                spawn_error: Some(kind),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, program: &Path, args: &[String]) -> io::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            match self.spawn_error {
                Some(kind) => Err(io::Error::from(kind)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn status(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>> {
            self.record(program, args)?;
            Ok(self.reply.code)
        }

        async fn output(
            &self,
            program: &Path,
            args: &[String],
            _timeout: Option<Duration>,
        ) -> io::Result<CommandOutput> {
            self.record(program, args)?;
            Ok(self.reply.clone())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_runner_captures_output() {
        let out = SystemRunner
            .output(Path::new("sh"), &["-c".into(), "echo hello; exit 3".into()], None)
            .await
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "hello");
        assert!(!out.success());
    }

    #[tokio::test]
    async fn test_system_runner_times_out() {
        let err = SystemRunner
            .output(
                Path::new("sh"),
                &["-c".into(), "sleep 5".into()],
                Some(Duration::from_millis(100)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn test_system_runner_missing_binary() {
        let err = SystemRunner
            .status(Path::new("/nonexistent/vidgrab-test-binary"), &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
