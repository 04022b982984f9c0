//! Distribution detection
//!
//! Reads the `ID=` field of os-release to pick the distro family that
//! decides which group table and toggle mechanism apply.

use crate::{ConfigError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Supported distribution families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distro {
    /// apt, list files under sources.list.d
    Debian,
    /// yum, repo ids toggled through yum-config-manager
    Centos,
}

impl Distro {
    /// Map an os-release `ID` value to a distro family
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_id(id: &str) -> Result<Self> {
        match id {
            "debian" => Ok(Distro::Debian),
            "centos" => Ok(Distro::Centos),
            other => Err(ConfigError::UnsupportedDistro(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Distro::Debian => "debian",
            Distro::Centos => "centos",
        }
    }
}

impl FromStr for Distro {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s)
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the `ID` value from os-release content
pub fn parse_os_release_id(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix("ID="))
        .map(unquote)
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}

/// Detect the distro from the first readable os-release candidate
pub fn detect_distro<P: AsRef<Path>>(candidates: &[P]) -> Result<Distro> {
    for candidate in candidates {
        let path = candidate.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::Io(e)),
        };

        debug!("Reading release information from {}", path.display());
        return match parse_os_release_id(&content) {
            Some(id) => Distro::from_id(&id),
            None => Err(ConfigError::ReleaseInfoMissing(vec![path.to_path_buf()])),
        };
    }

    Err(ConfigError::ReleaseInfoMissing(
        candidates
            .iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect::<Vec<PathBuf>>(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    #[test]
    fn test_from_id() {
        assert_eq!(Distro::from_id("debian").unwrap(), Distro::Debian);
        assert_eq!(Distro::from_id("centos").unwrap(), Distro::Centos);
        assert_matches!(
            Distro::from_id("fedora"),
            Err(ConfigError::UnsupportedDistro(id)) if id == "fedora"
        );
        assert!(Distro::from_id("Debian").is_err());
    }

    #[test]
    fn test_parse_id_strips_quotes() {
        let content = "NAME=\"CentOS Linux\"\nID=\"centos\"\nID_LIKE=\"rhel fedora\"\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("centos"));

        assert_eq!(parse_os_release_id("ID='debian'").as_deref(), Some("debian"));
        assert_eq!(parse_os_release_id("ID=debian\n").as_deref(), Some("debian"));
    }

    #[test]
    fn test_parse_id_ignores_id_like() {
        let content = "ID_LIKE=debian\nVERSION_ID=\"11\"\n";
        assert_eq!(parse_os_release_id(content), None);
    }

    #[test]
    fn test_parse_id_skips_comments() {
        let content = "# ID=fedora\nID=debian\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("debian"));
    }

    #[test]
    fn test_detect_uses_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("etc/os-release");
        let fallback = dir.path().join("os-release");
        fs::write(&fallback, "ID=centos\n").unwrap();

        assert_eq!(detect_distro(&[missing, fallback]).unwrap(), Distro::Centos);
    }

    #[test]
    fn test_detect_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");
        fs::write(&path, "ID=fedora\n").unwrap();

        assert_matches!(
            detect_distro(&[path]),
            Err(ConfigError::UnsupportedDistro(_))
        );
    }

    #[test]
    fn test_detect_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");

        assert_matches!(
            detect_distro(&[path]),
            Err(ConfigError::ReleaseInfoMissing(paths)) if paths.len() == 1
        );
    }
}
