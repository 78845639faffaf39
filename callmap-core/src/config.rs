//! Configuration file support for callmap
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.callmaprc.json` in the scan root
//! 3. `callmap.config.json` in the scan root
//! 4. `"callmap"` key in `package.json`
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::walk;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// callmap configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallmapConfig {
    /// Path substrings to skip (default: node_modules, tests)
    ///
    /// Replaces the defaults rather than extending them.
    #[serde(default)]
    pub ignore: Option<Vec<String>>,

    /// Worker count for parsing (1 = sequential, 0 = one per core)
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Resolved configuration with defaults filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub ignore: Vec<String>,
    pub jobs: usize,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl CallmapConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref ignore) = self.ignore {
            // An empty substring is contained in every path
            if ignore.iter().any(|s| s.is_empty()) {
                anyhow::bail!("ignore entries must not be empty strings");
            }
        }
        Ok(())
    }

    /// Resolve config, filling in defaults
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            ignore: self.ignore.clone().unwrap_or_else(walk::default_ignored),
            jobs: self.jobs.unwrap_or(1),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        ResolvedConfig {
            ignore: walk::default_ignored(),
            jobs: 1,
            config_path: None,
        }
    }
}

/// Discover and load a config file from the scan root
///
/// Search order:
/// 1. `.callmaprc.json`
/// 2. `callmap.config.json`
/// 3. `"callmap"` key in `package.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(CallmapConfig, PathBuf)>> {
    for name in [".callmaprc.json", "callmap.config.json"] {
        let path = project_root.join(name);
        if path.is_file() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    let pkg_path = project_root.join("package.json");
    if pkg_path.is_file() {
        if let Some(config) = load_from_package_json(&pkg_path)? {
            return Ok(Some((config, pkg_path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<CallmapConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: CallmapConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load callmap config from the "callmap" key in package.json
fn load_from_package_json(path: &Path) -> Result<Option<CallmapConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let pkg: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match pkg.get("callmap") {
        Some(value) => {
            let config: CallmapConfig = serde_json::from_value(value.clone())
                .with_context(|| format!("invalid callmap config in {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid callmap config in {}", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Load and resolve config for a scan root
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in the scan root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (CallmapConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
