use std::fs;
use std::path::PathBuf;

use dirs_next as dirs;
use globset::{Glob, GlobSet};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::predicates::{AppDirPredicate, BinDirPredicate, MarkerFilePredicate};

pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_INNER_DEPTH: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How many levels below the search root an application may sit.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// How many levels below `bin/` executables are looked for.
    #[serde(default = "default_inner_depth")]
    pub inner_depth: usize,
    /// Keep walking inside application directories.
    #[serde(default)]
    pub allow_nested: bool,
    /// Recognise applications by this marker file instead of a `bin/` child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Record link ownership in a ledger file inside the bin root.
    #[serde(default = "default_true")]
    pub ledger: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_inner_depth() -> usize {
    DEFAULT_INNER_DEPTH
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            inner_depth: DEFAULT_INNER_DEPTH,
            allow_nested: false,
            marker: None,
            exclude: Vec::new(),
            ledger: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Config::parse(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self, AppError> {
        let config: Config = toml::from_str(contents)?;
        if config.inner_depth == 0 {
            return Err(AppError::config("inner_depth must be at least 1"));
        }
        if let Some(marker) = &config.marker
            && (marker.is_empty() || marker.contains(['/', '\\']))
        {
            return Err(AppError::config(format!("marker must be a plain file name, got {marker:?}")));
        }
        Ok(config)
    }

    /// A depth of zero falls back to the default.
    pub fn effective_max_depth(&self) -> usize {
        if self.max_depth == 0 { DEFAULT_MAX_DEPTH } else { self.max_depth }
    }

    pub fn predicate(&self) -> Box<dyn AppDirPredicate> {
        match &self.marker {
            Some(marker) => Box::new(MarkerFilePredicate::new(marker.clone())),
            None => Box::new(BinDirPredicate),
        }
    }

    pub fn compile_excludes(&self) -> Result<Option<GlobSet>, AppError> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            let expanded = expand_home(pattern)?;
            builder.add(Glob::new(&expanded)?);
        }

        Ok(Some(builder.build()?))
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    if let Some(explicit) = std::env::var_os("LINKWARP_CONFIG") {
        return Ok(PathBuf::from(explicit));
    }
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("linkwarp").join("config.toml"))
}

pub fn ensure_config_file() -> Result<PathBuf, AppError> {
    let path = config_file_path()?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let default = Config::default();
        let contents = toml::to_string_pretty(&default)?;
        fs::write(&path, contents)?;
    }
    Ok(path)
}

fn expand_home(value: &str) -> Result<String, AppError> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AppError::config("Unable to expand '~' because the home directory is unknown")
    })?;
    if value == "~" {
        Ok(home_dir.display().to_string())
    } else if let Some(stripped) = value.strip_prefix("~/") {
        Ok(home_dir.join(stripped).display().to_string())
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.ledger);
        assert_eq!(config.effective_max_depth(), 2);
    }

    #[test]
    fn zero_max_depth_means_default() {
        let config = Config::parse("max_depth = 0").unwrap();
        assert_eq!(config.effective_max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn marker_selects_marker_predicate() {
        let config = Config::parse("marker = \".app\"").unwrap();
        assert!(config.predicate().describe().contains(".app"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(Config::parse("inner_depth = 0"), Err(AppError::Config(_))));
        assert!(matches!(Config::parse("marker = \"a/b\""), Err(AppError::Config(_))));
        assert!(matches!(Config::parse("max_depth = \"deep\""), Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn excludes_compile() {
        let config = Config::parse("exclude = [\"/opt/**/old-*\"]").unwrap();
        let set = config.compile_excludes().unwrap().unwrap();
        assert!(set.is_match("/opt/apps/old-foo"));
        assert!(!set.is_match("/opt/apps/foo"));
    }
}
