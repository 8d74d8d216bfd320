use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

const PROJECT_CONFIG_FILE: &str = ".euler-harness.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub root: Option<PathBuf>,
    pub compiler: String,
    pub include_dirs: Option<Vec<PathBuf>>,
    pub lib_dirs: Option<Vec<PathBuf>>,
    pub link_flags: Vec<String>,
    pub library_path_var: String,
    pub build_dir: Option<PathBuf>,
    pub build_marker: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: None,
            compiler: "g++".to_string(),
            include_dirs: None,
            lib_dirs: None,
            link_flags: ["-leuler", "-lpthread", "-lgmp", "-lgmpxx", "-lmpfr", "-lrt", "-lm"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            library_path_var: "LD_LIBRARY_PATH".to_string(),
            build_dir: None,
            build_marker: "CMakeCache.txt".to_string(),
        }
    }
}

impl HarnessConfig {
    pub fn include_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.include_dirs
            .clone()
            .unwrap_or_else(|| vec![root.join("libeuler/build/release/include")])
    }

    pub fn lib_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.lib_dirs
            .clone()
            .unwrap_or_else(|| vec![root.join("libeuler/build/release/lib")])
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("euler-harness").join("config.json"))
}

pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_FILE)
}

/// The project file under `root` wins over the per-user file. Missing files
/// fall back to defaults; malformed ones are an error.
pub fn load_config(root: &Path) -> Result<HarnessConfig> {
    let candidates = std::iter::once(project_config_path(root)).chain(user_config_path());

    for path in candidates {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            return load_from(&path);
        }
    }

    Ok(HarnessConfig::default())
}

pub fn load_from(path: &Path) -> Result<HarnessConfig> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| HarnessError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

pub fn save_config(path: &Path, config: &HarnessConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| HarnessError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, contents)?;
    Ok(())
}
