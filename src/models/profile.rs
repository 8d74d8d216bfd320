use std::path::PathBuf;

use super::config::HarnessConfig;

const RELEASE_FLAGS: &[&str] = &[
    "-Wall",
    "-Wextra",
    "-ansi",
    "-pedantic",
    "-Wshadow",
    "-Wpointer-arith",
    "-Wcast-qual",
    "-pipe",
    "-fomit-frame-pointer",
    "-W",
    "-O2",
    "-std=c++0x",
];

const DEBUG_FLAGS: &[&str] = &[
    "-Wall",
    "-Wextra",
    "-ansi",
    "-pedantic",
    "-Wshadow",
    "-Wpointer-arith",
    "-Wcast-qual",
    "-pipe",
    "-W",
    "-O0",
    "-g",
    "-std=c++0x",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Release,
    Debug,
}

impl Profile {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Profile::Debug
        } else {
            Profile::Release
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Profile::Release => "release",
            Profile::Debug => "debug",
        }
    }

    pub fn compile_flags(&self) -> &'static [&'static str] {
        match self {
            Profile::Release => RELEASE_FLAGS,
            Profile::Debug => DEBUG_FLAGS,
        }
    }
}

/// Everything needed to turn one problem source into an executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub compiler: String,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
}

impl BuildConfiguration {
    pub fn for_profile(profile: Profile, config: &HarnessConfig, root: &std::path::Path) -> Self {
        Self {
            compiler: config.compiler.clone(),
            compile_flags: profile.compile_flags().iter().map(|f| f.to_string()).collect(),
            link_flags: config.link_flags.clone(),
            include_dirs: config.include_dirs(root),
            lib_dirs: config.lib_dirs(root),
        }
    }
}
