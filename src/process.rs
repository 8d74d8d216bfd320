use std::ffi::OsStr;
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{HarnessError, Result};
use crate::interrupt::Interrupt;

/// The command line as it would be typed into a shell, for verbose echoing.
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
        return arg.into_owned();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    /// stdout and stderr in the order the child wrote them.
    pub output: String,
}

fn spawn_and_collect(cmd: &mut Command) -> io::Result<Captured> {
    let (mut reader, writer) = io::pipe()?;
    cmd.stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    let mut child = cmd.spawn()?;
    // Drop the write ends held by `cmd`, or the read below never sees EOF.
    cmd.stdout(Stdio::null()).stderr(Stdio::null());

    let mut bytes = Vec::new();
    let read = reader.read_to_end(&mut bytes);
    let status = child.wait()?;
    read?;

    Ok(Captured {
        status,
        output: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Runs `cmd` to completion with both output streams on one pipe. A child
/// killed by SIGINT, or a Ctrl-C seen by the harness meanwhile, is
/// `Interrupted`.
pub fn capture(cmd: &mut Command, interrupt: &Interrupt) -> Result<Captured> {
    let captured = spawn_and_collect(cmd).map_err(|source| HarnessError::Spawn {
        program: cmd.get_program().to_string_lossy().into_owned(),
        source,
    })?;

    interrupt.check()?;
    if was_interrupted(&captured.status) {
        return Err(HarnessError::Interrupted);
    }
    Ok(captured)
}

#[cfg(unix)]
fn was_interrupted(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn was_interrupted(_status: &ExitStatus) -> bool {
    false
}
