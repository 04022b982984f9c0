//! Package repository toggling for image builds
//!
//! Wires settings, distro detection, the group table and a backend together
//! for each command. An empty directive list is a no-op that does not even
//! look at the image. Otherwise the distro is detected before any directive
//! is parsed or resolved, so an unsupported image fails first and without
//! touching anything.

use anyhow::{Context, Result};
use config::{
    detect_distro, parse_directives, AptSources, Distro, GroupTable, RepoBackend,
    RepoFileScanner, Resolver, Settings, ToggleAction, YumConfigManager,
};
use std::path::Path;
use tracing::{debug, info};

/// Load settings from an optional TOML file, then apply a root override
pub fn load_settings(config: Option<&Path>, root: Option<&Path>) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    Ok(match root {
        Some(root) => settings.with_root(root),
        None => settings,
    })
}

/// Detect the distro of the configured root
pub fn detect(settings: &Settings) -> Result<Distro> {
    let distro = detect_distro(&settings.os_release_paths())
        .context("Failed to detect the distribution")?;
    debug!("Detected distro {} under {}", distro, settings.root.display());
    Ok(distro)
}

/// Backend performing real toggles for a distro
pub fn backend_for(distro: Distro, settings: &Settings) -> Box<dyn RepoBackend> {
    match distro {
        Distro::Debian => Box::new(AptSources::new(settings.apt_sources_path())),
        Distro::Centos => {
            let yum = YumConfigManager::new(settings.yum_config_manager.clone());
            if settings.is_alternate_root() {
                Box::new(yum.with_install_root(&settings.root))
            } else {
                Box::new(yum)
            }
        }
    }
}

fn is_empty(repos: &str) -> bool {
    repos.split_whitespace().next().is_none()
}

/// Resolve the directive list without applying it
pub fn plan(settings: &Settings, repos: &str) -> Result<Vec<ToggleAction>> {
    if is_empty(repos) {
        return Ok(Vec::new());
    }
    let distro = detect(settings)?;
    let directives = parse_directives(repos).context("Invalid DIST_REPOS")?;

    let groups = GroupTable::for_distro(distro);
    let scanner = RepoFileScanner::new(&settings.root);
    let resolver = Resolver::new(distro, &groups, &scanner);

    Ok(resolver.plan(&directives)?)
}

/// Resolve and apply the directive list, returning the number of actions
pub fn apply(settings: &Settings, repos: &str) -> Result<usize> {
    if is_empty(repos) {
        info!("No repositories to toggle");
        return Ok(0);
    }
    let distro = detect(settings)?;
    let directives = parse_directives(repos).context("Invalid DIST_REPOS")?;

    let groups = GroupTable::for_distro(distro);
    let scanner = RepoFileScanner::new(&settings.root);
    let resolver = Resolver::new(distro, &groups, &scanner);
    let mut backend = backend_for(distro, settings);

    resolver
        .apply(&directives, backend.as_mut())
        .with_context(|| format!("Failed to toggle repositories on {}", distro))
}
