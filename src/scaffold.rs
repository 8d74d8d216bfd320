use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use chrono::Local;

use crate::error::{HarnessError, Result};
use crate::models::{Pool, ProblemId, ProblemLocation};
use crate::workspace::Workspace;

pub const SOURCE_FILE: &str = "main.cpp";
pub const DESCRIPTOR_FILE: &str = "CMakeLists.txt";
const DESCRIPTOR: &str = "eulerAddProblem()\n";

pub fn source_template(id: ProblemId, created: &str) -> String {
    format!(
        r#"/*
 * Problem {id}
 * Created {created}
 */

#include <iostream>
#include <cassert>
#include <cstdint>

int main(void)
{{


	return 0;
}}
"#
    )
}

/// Creates `new/NNNN` with a source template and build descriptor. Nothing is
/// touched if the problem already exists in either pool.
pub fn create_problem(workspace: &Workspace, id: ProblemId) -> Result<ProblemLocation> {
    if id.number() == 0 {
        return Err(HarnessError::InvalidProblemNumber(0));
    }

    if let Some(existing) = workspace.locate(id) {
        return Err(HarnessError::ProblemExists {
            id,
            path: existing.path,
        });
    }

    fs::create_dir_all(workspace.pool_dir(Pool::New))?;

    let path = workspace.problem_dir(Pool::New, id);
    match fs::create_dir(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(HarnessError::ProblemExists { id, path });
        }
        Err(e) => return Err(e.into()),
    }

    let created = Local::now().format("%Y-%m-%d").to_string();
    write_new_file(&path.join(SOURCE_FILE), &source_template(id, &created))?;
    write_new_file(&path.join(DESCRIPTOR_FILE), DESCRIPTOR)?;

    tracing::info!(problem = %id, path = %path.display(), "created problem");
    Ok(ProblemLocation {
        id,
        path,
        pool: Pool::New,
    })
}

fn write_new_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}
