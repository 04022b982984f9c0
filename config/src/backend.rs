//! Toggle backends
//!
//! A backend applies one enable/disable action to one concrete repo:
//! - [`AptSources`]: Debian list files, restored from or removed to a
//!   `.disabled` copy
//! - [`YumConfigManager`]: CentOS repo ids through `yum-config-manager`
//! - [`Recorder`]: records actions without touching the system

use crate::loader::{paths::DISABLED_SUFFIX, rebase};
use crate::resolver::ToggleAction;
use crate::{ConfigError, Result, Sign};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Applies toggle actions to the system
pub trait RepoBackend {
    /// Enable a concrete repo
    fn enable(&mut self, repo: &str) -> Result<()>;

    /// Disable a concrete repo
    fn disable(&mut self, repo: &str) -> Result<()>;

    /// Apply a resolved action
    fn apply(&mut self, action: &ToggleAction) -> Result<()> {
        match action.sign {
            Sign::Enable => self.enable(&action.repo),
            Sign::Disable => self.disable(&action.repo),
        }
    }
}

/// Debian list files under sources.list.d
///
/// `<name>.list` is the active definition, `<name>.list.disabled` the copy
/// it is restored from.
#[derive(Debug, Clone)]
pub struct AptSources {
    dir: PathBuf,
}

impl AptSources {
    /// Create a backend over a sources.list.d directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Active list file for a repo, always inside the sources directory
    pub fn list_path(&self, repo: &str) -> PathBuf {
        rebase(&self.dir, Path::new(&format!("{}.list", repo)))
    }

    /// Deactivated copy of a repo's list file
    pub fn disabled_path(&self, repo: &str) -> PathBuf {
        rebase(&self.dir, Path::new(&format!("{}.list{}", repo, DISABLED_SUFFIX)))
    }
}

impl RepoBackend for AptSources {
    fn enable(&mut self, repo: &str) -> Result<()> {
        let source = self.disabled_path(repo);
        if !source.is_file() {
            return Err(ConfigError::MissingSourceFile(source));
        }

        let target = self.list_path(repo);
        std::fs::copy(&source, &target)?;
        info!("Enabled apt repo {} ({})", repo, target.display());
        Ok(())
    }

    fn disable(&mut self, repo: &str) -> Result<()> {
        let target = self.list_path(repo);
        match std::fs::remove_file(&target) {
            Ok(()) => {
                info!("Disabled apt repo {} ({})", repo, target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::MissingSourceFile(target))
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

/// CentOS repo ids toggled by an external repo-config tool
#[derive(Debug, Clone)]
pub struct YumConfigManager {
    program: String,
    install_root: Option<PathBuf>,
}

impl YumConfigManager {
    /// Create a backend running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            install_root: None,
        }
    }

    /// Operate on an image root instead of the running system
    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }

    /// Arguments passed to the tool for one action
    pub fn args(&self, sign: Sign, repo: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(root) = &self.install_root {
            args.push(format!("--installroot={}", root.display()));
        }
        args.push(format!("--{}", sign.as_str()));
        args.push(repo.to_string());
        args
    }

    fn run(&self, sign: Sign, repo: &str) -> Result<()> {
        let args = self.args(sign, repo);
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program).args(&args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            };
            return Err(ConfigError::UnknownRepoId {
                id: repo.to_string(),
                message,
            });
        }

        match sign {
            Sign::Enable => info!("Enabled yum repo {}", repo),
            Sign::Disable => info!("Disabled yum repo {}", repo),
        }
        Ok(())
    }
}

impl Default for YumConfigManager {
    fn default() -> Self {
        Self::new(crate::loader::paths::YUM_CONFIG_MANAGER)
    }
}

impl RepoBackend for YumConfigManager {
    fn enable(&mut self, repo: &str) -> Result<()> {
        self.run(Sign::Enable, repo)
    }

    fn disable(&mut self, repo: &str) -> Result<()> {
        self.run(Sign::Disable, repo)
    }
}

/// Records actions instead of applying them
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    actions: Vec<ToggleAction>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions in the order they were issued
    pub fn actions(&self) -> &[ToggleAction] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<ToggleAction> {
        self.actions
    }
}

impl RepoBackend for Recorder {
    fn enable(&mut self, repo: &str) -> Result<()> {
        self.actions.push(ToggleAction::new(repo, Sign::Enable));
        Ok(())
    }

    fn disable(&mut self, repo: &str) -> Result<()> {
        self.actions.push(ToggleAction::new(repo, Sign::Disable));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn apt_dir() -> (tempfile::TempDir, AptSources) {
        let dir = tempfile::tempdir().unwrap();
        let apt = AptSources::new(dir.path());
        (dir, apt)
    }

    #[test]
    fn test_apt_paths() {
        let apt = AptSources::new("/etc/apt/sources.list.d");
        assert_eq!(
            apt.list_path("stx"),
            PathBuf::from("/etc/apt/sources.list.d/stx.list")
        );
        assert_eq!(
            apt.disabled_path("stx"),
            PathBuf::from("/etc/apt/sources.list.d/stx.list.disabled")
        );
    }

    #[test]
    fn test_apt_paths_stay_in_dir_for_absolute_names() {
        let apt = AptSources::new("/img/etc/apt/sources.list.d");
        assert_eq!(
            apt.list_path("/stx"),
            PathBuf::from("/img/etc/apt/sources.list.d/stx.list")
        );
        assert!(apt.disabled_path("/stx").starts_with(apt.dir()));
    }

    #[test]
    fn test_apt_toggle_absolute_name() {
        let (_dir, mut apt) = apt_dir();
        fs::write(apt.dir().join("stx.list.disabled"), "deb file:/import/mirror ./\n").unwrap();

        apt.enable("/stx").unwrap();
        assert!(apt.dir().join("stx.list").exists());
        apt.disable("/stx").unwrap();
        assert!(!apt.dir().join("stx.list").exists());
    }

    #[test]
    fn test_apt_enable_restores_disabled_copy() {
        let (_dir, mut apt) = apt_dir();
        fs::write(apt.disabled_path("debian"), "deb http://deb.debian.org/debian bullseye main\n")
            .unwrap();

        apt.enable("debian").unwrap();
        assert_eq!(
            fs::read_to_string(apt.list_path("debian")).unwrap(),
            "deb http://deb.debian.org/debian bullseye main\n"
        );
        // the disabled copy stays for later runs
        assert!(apt.disabled_path("debian").exists());
    }

    #[test]
    fn test_apt_enable_twice_succeeds() {
        let (_dir, mut apt) = apt_dir();
        fs::write(apt.disabled_path("stx"), "deb file:/import/mirror ./\n").unwrap();

        apt.enable("stx").unwrap();
        apt.enable("stx").unwrap();
        assert!(apt.list_path("stx").exists());
    }

    #[test]
    fn test_apt_enable_overwrites_active_file() {
        let (_dir, mut apt) = apt_dir();
        fs::write(apt.disabled_path("stx"), "new\n").unwrap();
        fs::write(apt.list_path("stx"), "old\n").unwrap();

        apt.enable("stx").unwrap();
        assert_eq!(fs::read_to_string(apt.list_path("stx")).unwrap(), "new\n");
    }

    #[test]
    fn test_apt_enable_missing_source() {
        let (_dir, mut apt) = apt_dir();
        assert_matches!(
            apt.enable("stx"),
            Err(ConfigError::MissingSourceFile(path)) if path.ends_with("stx.list.disabled")
        );
    }

    #[test]
    fn test_apt_disable_removes_list() {
        let (_dir, mut apt) = apt_dir();
        fs::write(apt.list_path("stx"), "deb file:/import/mirror ./\n").unwrap();

        apt.disable("stx").unwrap();
        assert!(!apt.list_path("stx").exists());
    }

    #[test]
    fn test_apt_disable_missing_list() {
        let (_dir, mut apt) = apt_dir();
        assert_matches!(
            apt.disable("stx"),
            Err(ConfigError::MissingSourceFile(path)) if path.ends_with("stx.list")
        );
    }

    #[test]
    fn test_yum_args() {
        let yum = YumConfigManager::default();
        assert_eq!(yum.args(Sign::Enable, "base"), vec!["--enable", "base"]);
        assert_eq!(yum.args(Sign::Disable, "updates"), vec!["--disable", "updates"]);

        let yum = YumConfigManager::default().with_install_root("/mnt/image");
        assert_eq!(
            yum.args(Sign::Enable, "base"),
            vec!["--installroot=/mnt/image", "--enable", "base"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_yum_tool_failure_is_unknown_repo() {
        let mut yum = YumConfigManager::new("false");
        assert_matches!(
            yum.disable("no-such-repo"),
            Err(ConfigError::UnknownRepoId { id, .. }) if id == "no-such-repo"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_yum_tool_success() {
        let mut yum = YumConfigManager::new("true");
        assert!(yum.enable("base").is_ok());
    }

    #[test]
    fn test_yum_missing_tool_is_io_error() {
        let mut yum = YumConfigManager::new("definitely_not_a_real_command_12345");
        assert_matches!(yum.enable("base"), Err(ConfigError::Io(_)));
    }

    #[test]
    fn test_recorder() {
        let mut recorder = Recorder::new();
        recorder.disable("stx").unwrap();
        recorder
            .apply(&ToggleAction::new("debian", Sign::Enable))
            .unwrap();

        assert_eq!(
            recorder.into_actions(),
            vec![
                ToggleAction::new("stx", Sign::Disable),
                ToggleAction::new("debian", Sign::Enable),
            ]
        );
    }
}
