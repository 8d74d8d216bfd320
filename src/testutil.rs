use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::models::{BuildConfiguration, Pool, ProblemId};
use crate::workspace::Workspace;

pub struct TestWorkspace {
    _dir: TempDir,
    pub workspace: Workspace,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        Self { _dir: dir, workspace }
    }

    pub fn path(&self) -> &Path {
        self.workspace.root()
    }
}

pub fn id(n: u32) -> ProblemId {
    ProblemId::new(n).unwrap()
}

pub fn make_problem(workspace: &Workspace, pool: Pool, n: u32) -> PathBuf {
    let dir = workspace.problem_dir(pool, id(n));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("main.cpp"), "int main(void) { return 0; }\n").unwrap();
    dir
}

/// Writes an executable shell script through a child `sh`, so this process
/// never holds a writable descriptor to a file it later executes.
pub fn install_script(path: &Path, body: &str) {
    let status = Command::new("sh")
        .arg("-c")
        .arg(r#"printf '%s' "$1" > "$2" && chmod 755 "$2""#)
        .arg("sh")
        .arg(body)
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success());
}

fn compiler_script(program: &str) -> String {
    format!(
        r#"out=""
src=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then out="$2"; shift; else src="$1"; fi
    shift
done
if grep -q '#error' "$src"; then
    echo "$src: error: #error directive" >&2
    exit 1
fi
printf '%s' '{program}' > "$out"
chmod 755 "$out"
echo "compiled $out"
"#
    )
}

/// A stand-in compiler: `sh <script> ... <source> -o <out>` writes `program`
/// to `out`, unless the source contains `#error`.
pub fn fake_compiler(dir: &Path, program: &str) -> BuildConfiguration {
    let script = dir.join("fake-cc.sh");
    fs::write(&script, compiler_script(program)).unwrap();

    BuildConfiguration {
        compiler: "sh".to_string(),
        compile_flags: vec![script.display().to_string()],
        link_flags: Vec::new(),
        include_dirs: Vec::new(),
        lib_dirs: Vec::new(),
    }
}

/// The same stand-in as an executable, for use as the configured compiler
/// when the profile's own flags come first on the command line.
pub fn install_fake_compiler(dir: &Path, program: &str) -> String {
    let path = dir.join("fake-cc");
    install_script(&path, &format!("#!/bin/sh\n{}", compiler_script(program)));
    path.display().to_string()
}

pub fn make_broken_problem(workspace: &Workspace, pool: Pool, n: u32) -> PathBuf {
    let dir = make_problem(workspace, pool, n);
    fs::write(dir.join("main.cpp"), "#error unfinished\n").unwrap();
    dir
}

/// A compiler that always fails after printing a diagnostic.
pub fn failing_compiler(dir: &Path) -> BuildConfiguration {
    let script = dir.join("broken-cc.sh");
    fs::write(&script, "echo 'error: expected ;' >&2\nexit 3\n").unwrap();

    BuildConfiguration {
        compiler: "sh".to_string(),
        compile_flags: vec![script.display().to_string()],
        link_flags: Vec::new(),
        include_dirs: Vec::new(),
        lib_dirs: Vec::new(),
    }
}
