use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use walkdir::WalkDir;

use crate::builder::ARTIFACT_FILE;
use crate::error::{HarnessError, Result};
use crate::interrupt::Interrupt;
use crate::models::{ProblemId, ProblemLocation};
use crate::process::capture;
use crate::workspace::Workspace;

/// Where built executables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLayout {
    /// `<root>/<pool>/NNNN/main`, as written by the builder.
    InTree,
    /// A separate build tree mirroring `<pool>/NNNN`; the problem's
    /// directory must hold exactly one executable.
    Mirrored { build_dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub layout: ArtifactLayout,
    pub library_path: Vec<PathBuf>,
    pub library_path_var: String,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub id: ProblemId,
    pub elapsed_ms: u64,
    pub output: String,
    pub exit_code: Option<i32>,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub fn validate_build_dir(build_dir: &Path, marker: &str) -> Result<()> {
    if build_dir.join(marker).is_file() {
        Ok(())
    } else {
        Err(HarnessError::InvalidBuildDirectory(build_dir.to_path_buf()))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

pub fn find_executable(location: &ProblemLocation, layout: &ArtifactLayout) -> Result<PathBuf> {
    match layout {
        ArtifactLayout::InTree => {
            let path = location.path.join(ARTIFACT_FILE);
            if is_executable(&path) {
                Ok(path)
            } else {
                Err(HarnessError::NotBuilt(location.id))
            }
        }
        ArtifactLayout::Mirrored { build_dir } => {
            let dir = build_dir
                .join(location.pool.dir_name())
                .join(location.id.dir_name());

            let mut found: Vec<PathBuf> = WalkDir::new(&dir)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping unreadable build tree entry");
                        None
                    }
                })
                .filter(|e| e.file_type().is_file() && is_executable(e.path()))
                .map(|e| e.into_path())
                .collect();

            match found.len() {
                0 => Err(HarnessError::NotBuilt(location.id)),
                1 => Ok(found.remove(0)),
                count => Err(HarnessError::AmbiguousArtifact {
                    id: location.id,
                    count,
                }),
            }
        }
    }
}

fn library_path_value(settings: &RunSettings) -> OsString {
    let inherited = std::env::var_os(&settings.library_path_var);
    let paths = settings
        .library_path
        .iter()
        .cloned()
        .chain(inherited.iter().flat_map(std::env::split_paths));

    std::env::join_paths(paths).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "library path contains a separator, using it unjoined");
        settings
            .library_path
            .first()
            .map(|p| p.clone().into_os_string())
            .unwrap_or_default()
    })
}

/// Runs a built problem from its own directory and times it. A non-zero exit
/// is still a result; only failing to find or launch the binary is an error.
pub fn run_problem(
    workspace: &Workspace,
    id: ProblemId,
    settings: &RunSettings,
    interrupt: &Interrupt,
) -> Result<RunResult> {
    let location = workspace
        .locate(id)
        .ok_or(HarnessError::ProblemNotFound(id))?;
    let executable = find_executable(&location, &settings.layout)?;

    let mut cmd = Command::new(&executable);
    cmd.env(&settings.library_path_var, library_path_value(settings));
    if let Some(dir) = executable.parent() {
        cmd.current_dir(dir);
    }

    tracing::debug!(problem = %id, path = %executable.display(), "running");
    let start = Instant::now();
    let captured = capture(&mut cmd, interrupt)?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(RunResult {
        id,
        elapsed_ms,
        output: captured.output,
        exit_code: captured.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pool;
    use crate::testutil::{id, install_script, make_problem, TestWorkspace};

    fn in_tree(library_path: Vec<PathBuf>) -> RunSettings {
        RunSettings {
            layout: ArtifactLayout::InTree,
            library_path,
            library_path_var: "EULER_HARNESS_TEST_LIB_PATH".to_string(),
        }
    }

    #[test]
    fn test_not_built_has_no_timing() {
        let tw = TestWorkspace::new();
        make_problem(&tw.workspace, Pool::New, 4);

        let err = run_problem(&tw.workspace, id(4), &in_tree(Vec::new()), &Interrupt::default()).unwrap_err();
        assert!(matches!(err, HarnessError::NotBuilt(p) if p == id(4)));
    }

    #[test]
    fn test_unknown_problem() {
        let tw = TestWorkspace::new();
        let err = run_problem(&tw.workspace, id(4), &in_tree(Vec::new()), &Interrupt::default()).unwrap_err();
        assert!(matches!(err, HarnessError::ProblemNotFound(_)));
    }

    #[test]
    fn test_non_executable_artifact_is_not_built() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::New, 4);
        fs::write(dir.join(ARTIFACT_FILE), "plain data").unwrap();

        let err = run_problem(&tw.workspace, id(4), &in_tree(Vec::new()), &Interrupt::default()).unwrap_err();
        assert!(matches!(err, HarnessError::NotBuilt(_)));
    }

    #[test]
    fn test_trivial_program_runs() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::Done, 1);
        install_script(&dir.join(ARTIFACT_FILE), "#!/bin/sh\necho 233168\n");

        let result = run_problem(&tw.workspace, id(1), &in_tree(Vec::new()), &Interrupt::default()).unwrap();
        assert!(result.success());
        assert_eq!(result.output, "233168\n");
        assert_eq!(result.id, id(1));
    }

    #[test]
    fn test_runs_in_problem_directory_with_library_path() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::Done, 2);
        install_script(
            &dir.join(ARTIFACT_FILE),
            "#!/bin/sh\npwd\necho \"$EULER_HARNESS_TEST_LIB_PATH\"\n",
        );

        let lib = tw.path().join("libeuler");
        let result = run_problem(&tw.workspace, id(2), &in_tree(vec![lib.clone()]), &Interrupt::default()).unwrap();

        let mut lines = result.output.lines();
        let cwd = PathBuf::from(lines.next().unwrap());
        assert_eq!(cwd.canonicalize().unwrap(), dir.canonicalize().unwrap());
        assert!(lines.next().unwrap().starts_with(&lib.display().to_string()));
    }

    #[test]
    fn test_non_zero_exit_is_reported_not_raised() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::New, 3);
        install_script(&dir.join(ARTIFACT_FILE), "#!/bin/sh\necho oops >&2\nexit 4\n");

        let result = run_problem(&tw.workspace, id(3), &in_tree(Vec::new()), &Interrupt::default()).unwrap();
        assert_eq!(result.exit_code, Some(4));
        assert!(!result.success());
        assert_eq!(result.output, "oops\n");
    }

    #[test]
    fn test_mirrored_layout_needs_exactly_one_executable() {
        let tw = TestWorkspace::new();
        make_problem(&tw.workspace, Pool::Done, 10);
        let build_dir = tw.path().join("build");
        let out_dir = build_dir.join("done").join("0010");
        fs::create_dir_all(out_dir.join("CMakeFiles")).unwrap();
        fs::write(out_dir.join("Makefile"), "all:\n").unwrap();

        let settings = RunSettings {
            layout: ArtifactLayout::Mirrored {
                build_dir: build_dir.clone(),
            },
            ..in_tree(Vec::new())
        };

        let err = run_problem(&tw.workspace, id(10), &settings, &Interrupt::default()).unwrap_err();
        assert!(matches!(err, HarnessError::NotBuilt(_)));

        install_script(&out_dir.join("euler-0010"), "#!/bin/sh\necho mirrored\n");
        let result = run_problem(&tw.workspace, id(10), &settings, &Interrupt::default()).unwrap();
        assert_eq!(result.output, "mirrored\n");

        install_script(&out_dir.join("CMakeFiles").join("a.out"), "#!/bin/sh\n");
        let err = run_problem(&tw.workspace, id(10), &settings, &Interrupt::default()).unwrap_err();
        assert!(matches!(err, HarnessError::AmbiguousArtifact { count: 2, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_build_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tw = TestWorkspace::new();
        make_problem(&tw.workspace, Pool::Done, 11);
        let build_dir = tw.path().join("build");
        let out_dir = build_dir.join("done").join("0011");
        let locked = out_dir.join("locked");
        fs::create_dir_all(&locked).unwrap();
        install_script(&out_dir.join("euler-0011"), "#!/bin/sh\necho 31875000\n");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let settings = RunSettings {
            layout: ArtifactLayout::Mirrored { build_dir },
            ..in_tree(Vec::new())
        };
        let result = run_problem(&tw.workspace, id(11), &settings, &Interrupt::default());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(result.unwrap().output, "31875000\n");
    }

    #[test]
    fn test_ctrl_c_during_run_has_no_timing() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::Done, 5);
        install_script(&dir.join(ARTIFACT_FILE), "#!/bin/sh\necho partial\n");
        let interrupt = Interrupt::default();
        interrupt.trigger();

        let err = run_problem(&tw.workspace, id(5), &in_tree(Vec::new()), &interrupt).unwrap_err();
        assert!(matches!(err, HarnessError::Interrupted));
    }

    #[test]
    fn test_interleaved_streams_keep_their_order() {
        let tw = TestWorkspace::new();
        let dir = make_problem(&tw.workspace, Pool::Done, 6);
        install_script(
            &dir.join(ARTIFACT_FILE),
            "#!/bin/sh\necho start\necho warn >&2\necho 137846528820\n",
        );

        let result = run_problem(&tw.workspace, id(6), &in_tree(Vec::new()), &Interrupt::default()).unwrap();
        assert_eq!(result.output, "start\nwarn\n137846528820\n");
    }

    #[test]
    fn test_validate_build_dir() {
        let tw = TestWorkspace::new();
        let err = validate_build_dir(tw.path(), "CMakeCache.txt").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidBuildDirectory(_)));

        fs::write(tw.path().join("CMakeCache.txt"), "").unwrap();
        validate_build_dir(tw.path(), "CMakeCache.txt").unwrap();
    }
}
