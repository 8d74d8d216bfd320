use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Pool, PoolSelection, ProblemId, ProblemLocation};

/// A problem tree: `<root>/new/NNNN` and `<root>/done/NNNN`.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pool_dir(&self, pool: Pool) -> PathBuf {
        self.root.join(pool.dir_name())
    }

    pub fn problem_dir(&self, pool: Pool, id: ProblemId) -> PathBuf {
        self.pool_dir(pool).join(id.dir_name())
    }

    /// Looks in `new/` first, then `done/`.
    pub fn locate(&self, id: ProblemId) -> Option<ProblemLocation> {
        Pool::ALL.iter().find_map(|&pool| {
            let path = self.problem_dir(pool, id);
            path.is_dir().then_some(ProblemLocation { id, path, pool })
        })
    }

    pub fn list(&self, pool: Pool) -> Result<Vec<ProblemId>> {
        let dir = self.pool_dir(pool);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(pool = %pool, path = %dir.display(), "pool directory missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut problems = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(ProblemId::from_dir_name) {
                problems.push(id);
            }
        }

        problems.sort();
        Ok(problems)
    }

    pub fn list_selection(&self, selection: PoolSelection) -> Result<Vec<ProblemId>> {
        let mut ids = BTreeSet::new();
        for &pool in selection.pools() {
            ids.extend(self.list(pool)?);
        }
        Ok(ids.into_iter().collect())
    }
}
