use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HarnessError, Result};
use crate::interrupt::Interrupt;
use crate::models::{BuildConfiguration, ProblemId};
use crate::process::{capture, command_line};
use crate::scaffold::SOURCE_FILE;
use crate::workspace::Workspace;

/// Name of the executable written next to a problem's source.
pub const ARTIFACT_FILE: &str = "main";

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub artifact: PathBuf,
    pub output: String,
}

pub fn compiler_command(config: &BuildConfiguration, source: &Path, artifact: &Path) -> Command {
    let mut cmd = Command::new(&config.compiler);
    cmd.args(&config.compile_flags)
        .args(&config.link_flags)
        .args(config.include_dirs.iter().map(|d| format!("-I{}", d.display())))
        .args(config.lib_dirs.iter().map(|d| format!("-L{}", d.display())))
        .arg(source)
        .arg("-o")
        .arg(artifact);
    cmd
}

/// Compiles one problem into `<problem dir>/main`. Any previous artifact is
/// removed first, so a failed build never leaves a stale binary behind.
pub fn build_problem(
    workspace: &Workspace,
    id: ProblemId,
    config: &BuildConfiguration,
    verbose: bool,
    interrupt: &Interrupt,
) -> Result<BuildOutput> {
    let location = workspace
        .locate(id)
        .ok_or(HarnessError::ProblemNotFound(id))?;

    let artifact = location.path.join(ARTIFACT_FILE);
    match fs::remove_file(&artifact) {
        Ok(()) => tracing::debug!(path = %artifact.display(), "removed stale artifact"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let source = location.path.join(SOURCE_FILE);
    let mut cmd = compiler_command(config, &source, &artifact);
    if verbose {
        println!("{}", command_line(&cmd));
    }

    tracing::info!(problem = %id, pool = %location.pool, "building");
    let captured = capture(&mut cmd, interrupt)?;
    for line in captured.output.lines() {
        println!("{}", line);
    }

    if !captured.status.success() {
        return Err(HarnessError::CompilerFailed {
            compiler: config.compiler.clone(),
            code: captured.status.code(),
        });
    }

    Ok(BuildOutput {
        artifact,
        output: captured.output,
    })
}
