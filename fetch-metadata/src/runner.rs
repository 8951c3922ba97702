//! Running the `git` subprocesses.
//!
//! Commands are passed around as [`std::process::Command`] values rather than shell strings, so
//! URLs and refs are never quoted or interpolated. The [`CommandRunner`] trait is the seam where
//! tests swap in a double that never touches the network.

use std::process::{Command, Stdio};

use crate::remote::redacted;

/// What a finished subprocess produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The captured text. See [`CommandRunner::run`] for which streams this contains.
    pub output: String,
    /// Whether the process exited successfully.
    pub success: bool,
}

impl CommandOutput {
    pub fn new<S: Into<String>>(output: S, success: bool) -> Self {
        Self {
            output: output.into(),
            success,
        }
    }
}

/// Executes a prepared command and reports its output.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// When `silent` is set the command's stdout is discarded and only its stderr is captured,
    /// so failure detail is still available to the caller. Otherwise stdout is captured followed
    /// by stderr. Success is decided by the exit status alone.
    ///
    /// An `Err` means the process could not be run at all, not that it failed.
    fn run(&self, command: &mut Command, silent: bool) -> std::io::Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &mut Command, silent: bool) -> std::io::Result<CommandOutput> {
        let stdout = if silent {
            Stdio::null()
        } else {
            Stdio::piped()
        };
        command
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped());
        tracing::debug!(command = %display_command(command), silent, "running");
        let result = command.output()?;
        let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&result.stderr));
        Ok(CommandOutput {
            output,
            success: result.status.success(),
        })
    }
}

/// Render a command the way it would be typed, for logs and error messages. Credentials in URL
/// arguments, including `key=<url>` settings, are left out.
pub fn display_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|arg| {
            let arg = arg.to_string_lossy();
            match arg.split_once('=') {
                Some((key, value)) if !key.contains("://") => format!("{key}={}", redacted(value)),
                _ => redacted(&arg),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
