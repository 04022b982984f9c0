//! StarlingX package repository toggling
//!
//! This crate decides which package repositories to enable or disable while
//! a StarlingX container image is built, and applies that decision with the
//! distro's own mechanism.
//!
//! # Overview
//!
//! - [`directive`]: DIST_REPOS parsing (`-STX +OS -updates`)
//! - [`distro`]: os-release detection (Debian or CentOS)
//! - [`groups`]: `OS` / `STX` group aliases per distro
//! - [`repo_file`]: `[section]` scanning of yum `.repo` files
//! - [`resolver`]: directive expansion, planning and ordered application
//! - [`backend`]: apt list files, `yum-config-manager`, dry-run recorder
//! - [`loader`]: runtime settings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stx_repos_config::{
//!     detect_distro, parse_directives, AptSources, GroupTable, RepoFileScanner, Resolver,
//!     Settings,
//! };
//!
//! let settings = Settings::default();
//! let distro = detect_distro(&settings.os_release_paths()).unwrap();
//! let groups = GroupTable::for_distro(distro);
//! let scanner = RepoFileScanner::new(&settings.root);
//! let resolver = Resolver::new(distro, &groups, &scanner);
//!
//! let directives = parse_directives("OS -STX").unwrap();
//! let mut apt = AptSources::new(settings.apt_sources_path());
//! resolver.apply(&directives, &mut apt).unwrap();
//! ```

pub mod backend;
pub mod directive;
pub mod distro;
pub mod error;
pub mod groups;
pub mod loader;
pub mod repo_file;
pub mod resolver;

pub use backend::{AptSources, Recorder, RepoBackend, YumConfigManager};
pub use directive::{parse_directives, Directive, Sign};
pub use distro::{detect_distro, parse_os_release_id, Distro};
pub use error::{ConfigError, Result};
pub use groups::{GroupTable, CENTOS_STX_REPO_FILE};
pub use loader::{paths, rebase, Settings};
pub use repo_file::{parse_sections, RepoFileScanner, SectionSource};
pub use resolver::{RepoSpec, Resolver, ToggleAction};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AptSources, ConfigError, Directive, Distro, GroupTable, RepoBackend, RepoFileScanner,
        Resolver, Result, SectionSource, Settings, Sign, ToggleAction, YumConfigManager,
    };
}
