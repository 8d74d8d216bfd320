use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::builder::ARTIFACT_FILE;
use crate::error::Result;
use crate::models::ProblemId;
use crate::workspace::Workspace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    Removed(PathBuf),
    AlreadyClean,
    UnknownProblem,
}

pub fn clean_problem(workspace: &Workspace, id: ProblemId) -> Result<CleanOutcome> {
    let Some(location) = workspace.locate(id) else {
        return Ok(CleanOutcome::UnknownProblem);
    };

    let artifact = location.path.join(ARTIFACT_FILE);
    match fs::remove_file(&artifact) {
        Ok(()) => {
            tracing::debug!(problem = %id, path = %artifact.display(), "removed artifact");
            Ok(CleanOutcome::Removed(artifact))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(CleanOutcome::AlreadyClean),
        Err(e) => Err(e.into()),
    }
}
