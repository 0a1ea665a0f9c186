// src/launch/shell.rs

//! Shell-backed command launcher.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::info;

use crate::sink::SharedSink;
use crate::types::ExecutionOutcome;

use super::launcher::CommandLauncher;

/// Runs command lines through the platform shell (`sh -c`, or `cmd /C` on
/// Windows), streaming output to the sink line by line.
///
/// Spawned processes use `kill_on_drop`, so if the calling task is
/// cancelled while a command is running, the process is terminated rather
/// than leaked.
#[derive(Debug, Clone, Default)]
pub struct ShellLauncher {
    shell: Option<String>,
}

impl ShellLauncher {
    /// `shell = None` selects the platform default.
    pub fn new(shell: Option<String>) -> Self {
        Self { shell }
    }

    fn build_command(&self, command_line: &str) -> Command {
        match self.shell.as_deref() {
            Some(shell) => {
                let mut c = Command::new(shell);
                c.arg("-c").arg(command_line);
                c
            }
            None if cfg!(windows) => {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(command_line);
                c
            }
            None => {
                let mut c = Command::new("sh");
                c.arg("-c").arg(command_line);
                c
            }
        }
    }
}

impl CommandLauncher for ShellLauncher {
    fn run<'a>(
        &'a self,
        command: &'a str,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<ExecutionOutcome>> + Send + 'a>> {
        Box::pin(async move {
            info!(cmd = %command, "starting command process");

            let mut cmd = self.build_command(command);
            cmd.stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let mut child = cmd.spawn()?;

            let stdout = child.stdout.take();
            let stderr = child.stderr.take();

            // Drain both streams into the sink before reporting the exit
            // status; callers observe a fully flushed log.
            let (status, (), ()) = tokio::join!(
                child.wait(),
                stream_lines(stdout, &sink),
                stream_lines(stderr, &sink),
            );
            let status = status?;

            let code = status.code().unwrap_or(-1);
            info!(
                cmd = %command,
                exit_code = code,
                success = status.success(),
                "command process exited"
            );

            Ok(ExecutionOutcome::from_code(code))
        })
    }
}

async fn stream_lines<R>(stream: Option<R>, sink: &SharedSink)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else { return };
    let reader = BufReader::new(stream);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        sink.line(&line);
    }
}
