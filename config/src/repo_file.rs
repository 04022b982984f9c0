//! yum `.repo` file section scanning
//!
//! A path-form spec names a `.repo` file instead of a repo id. Its repo ids
//! are the `[section]` headers found in the file when the toggle runs.

use crate::loader::rebase;
use crate::{ConfigError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Resolves a `.repo` file to the repo ids it defines
pub trait SectionSource {
    /// Section names in file order
    fn sections_of(&self, path: &Path) -> Result<Vec<String>>;
}

/// Extract bracketed section headers from `.repo` content
///
/// A header must be alone on its line; surrounding whitespace is ignored.
pub fn parse_sections(content: &str) -> Vec<String> {
    section_header()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn section_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"(?m)^\s*\[([^\]\n]*)\]\s*$").expect("section header pattern is valid")
    })
}

/// Reads `.repo` files from disk, optionally below an image root
#[derive(Debug, Clone)]
pub struct RepoFileScanner {
    root: PathBuf,
}

impl RepoFileScanner {
    /// Create a scanner that resolves paths below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for RepoFileScanner {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SectionSource for RepoFileScanner {
    fn sections_of(&self, path: &Path) -> Result<Vec<String>> {
        let file = rebase(&self.root, path);
        let content = std::fs::read_to_string(&file).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::MissingSourceFile(file.clone()),
            _ => ConfigError::Io(e),
        })?;

        let sections = parse_sections(&content);
        debug!("{} defines {:?}", file.display(), sections);
        Ok(sections)
    }
}
