//! Shell command execution with streamed output.
//!
//! Commands run through the platform shell (`sh -c` or `cmd /C`). Standard output
//! is forwarded chunk by chunk to a caller supplied [`Write`] sink while the
//! process runs; standard error is captured and attached to
//! [`ProjjError::ProcessFailed`] when the command exits unsuccessfully.

use crate::core::error::{ProjjError, Result};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory; `None` inherits the current one.
    pub cwd: Option<PathBuf>,

    /// Environment variables layered over the inherited environment.
    pub env: HashMap<String, String>,
}

impl CommandOptions {
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Run `command`, streaming its stdout into `sink`, and wait for it to exit.
pub fn run(command: &str, options: &CommandOptions, sink: &mut dyn Write) -> Result<()> {
    let mut cmd = shell_command(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    cmd.envs(&options.env);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    log::debug!("Running `{}` in {:?}", command, options.cwd);

    let mut child = cmd
        .spawn()
        .map_err(|e| ProjjError::process_spawn_failed(command, e))?;

    let (mut stdout, mut stderr) = match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => (stdout, stderr),
        _ => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ProjjError::process_spawn_failed(
                command,
                io::Error::other("child output was not captured"),
            ));
        }
    };

    // Drain stderr on its own thread so a chatty process cannot block on a full pipe.
    let stderr_handle = thread::spawn(move || {
        let mut captured = Vec::new();
        stderr.read_to_end(&mut captured).map(|_| captured)
    });

    if let Err(e) = forward(&mut stdout, sink) {
        log::warn!("Output of `{command}` could not be forwarded: {e}");
        let _ = child.kill();
        let _ = child.wait();
        let _ = stderr_handle.join();
        return Err(ProjjError::output_sink_failed(command, e));
    }

    let status = child.wait()?;
    let captured = match stderr_handle.join() {
        Ok(captured) => captured?,
        Err(_) => Vec::new(),
    };

    if !status.success() {
        log::debug!("`{}` failed with {:?}", command, status.code());
        return Err(ProjjError::process_failed(command, status.code(), captured));
    }

    Ok(())
}

fn forward(source: &mut impl Read, sink: &mut dyn Write) -> io::Result<()> {
    let mut buffer = [0u8; 8192];
    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => return sink.flush(),
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink.write_all(&buffer[..read])?;
        sink.flush()?;
    }
}

/// Quote `arg` so the platform shell passes it through as a single word.
pub fn shell_quote(arg: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

fn shell_command(command: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}
