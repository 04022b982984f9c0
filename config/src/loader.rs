//! Runtime settings loading
//!
//! Settings carry the system paths the toggles act on. They default to the
//! standard locations of a CentOS or Debian image and may be overridden from
//! a TOML file, for example:
//!
//! ```toml
//! root = "/var/lib/stx/rootfs"
//! apt_sources_dir = "/etc/apt/sources.list.d"
//! yum_config_manager = "yum-config-manager"
//! ```

use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Standard paths
pub mod paths {
    /// os-release candidates, in lookup order
    pub const OS_RELEASE: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

    /// Directory holding apt list files
    pub const APT_SOURCES_DIR: &str = "/etc/apt/sources.list.d";

    /// Suffix of a deactivated apt list file
    pub const DISABLED_SUFFIX: &str = ".disabled";

    /// Tool used to toggle yum repos
    pub const YUM_CONFIG_MANAGER: &str = "yum-config-manager";
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// System root the paths below are resolved against
    pub root: PathBuf,
    /// os-release candidates
    pub os_release: Vec<PathBuf>,
    /// apt list file directory
    pub apt_sources_dir: PathBuf,
    /// Program invoked to toggle yum repos
    pub yum_config_manager: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
            os_release: paths::OS_RELEASE.iter().map(PathBuf::from).collect(),
            apt_sources_dir: PathBuf::from(paths::APT_SOURCES_DIR),
            yum_config_manager: paths::YUM_CONFIG_MANAGER.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replace the system root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Whether paths resolve somewhere other than `/`
    pub fn is_alternate_root(&self) -> bool {
        self.root != Path::new("/")
    }

    /// Resolve a system path below the configured root
    pub fn rooted(&self, path: &Path) -> PathBuf {
        rebase(&self.root, path)
    }

    /// os-release candidates below the root
    pub fn os_release_paths(&self) -> Vec<PathBuf> {
        self.os_release.iter().map(|p| self.rooted(p)).collect()
    }

    /// apt list file directory below the root
    pub fn apt_sources_path(&self) -> PathBuf {
        self.rooted(&self.apt_sources_dir)
    }
}

/// Join an absolute system path onto a root directory
///
/// `rebase("/mnt/img", "/etc/os-release")` is `/mnt/img/etc/os-release`.
/// Relative paths are joined unchanged.
pub fn rebase(root: &Path, path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative)
}
