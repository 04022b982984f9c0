//! Directive resolution
//!
//! Turns DIST_REPOS directives into per-repo toggle actions for one distro:
//!
//! 1. Look the directive name up in the distro's [`GroupTable`]; unknown
//!    names are used verbatim.
//! 2. On CentOS, a concrete name starting with `/` is a `.repo` file whose
//!    sections are read through a [`SectionSource`] when the directive runs.
//! 3. Every resulting repo gets the directive's sign.
//!
//! Directives run strictly in input order, so a later directive for the same
//! repo overrides an earlier one. The first failure aborts the run; actions
//! already applied are left in place.

use crate::backend::{Recorder, RepoBackend};
use crate::{Directive, Distro, GroupTable, Result, SectionSource, Sign};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// A concrete name produced by group expansion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepoSpec {
    /// A repo id (yum) or list file basename (apt)
    Id(String),
    /// Every section of a yum `.repo` file
    SectionsOf(PathBuf),
}

impl RepoSpec {
    /// Classify a concrete name for a distro
    pub fn for_distro(distro: Distro, name: &str) -> Self {
        match distro {
            Distro::Centos if name.starts_with('/') => RepoSpec::SectionsOf(PathBuf::from(name)),
            _ => RepoSpec::Id(name.to_string()),
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoSpec::Id(id) => f.write_str(id),
            RepoSpec::SectionsOf(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One enable/disable operation on one concrete repo
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToggleAction {
    pub repo: String,
    pub sign: Sign,
}

impl ToggleAction {
    pub fn new(repo: impl Into<String>, sign: Sign) -> Self {
        Self {
            repo: repo.into(),
            sign,
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sign, self.repo)
    }
}

/// Resolves directives against a distro's group table
pub struct Resolver<'a> {
    distro: Distro,
    groups: &'a GroupTable,
    sections: &'a dyn SectionSource,
}

impl<'a> Resolver<'a> {
    /// Create a resolver
    pub fn new(distro: Distro, groups: &'a GroupTable, sections: &'a dyn SectionSource) -> Self {
        Self {
            distro,
            groups,
            sections,
        }
    }

    pub fn distro(&self) -> Distro {
        self.distro
    }

    /// Expand a directive to its concrete specs
    pub fn expand(&self, directive: &Directive) -> Vec<RepoSpec> {
        let specs: Vec<RepoSpec> = self
            .groups
            .expand(&directive.raw_name)
            .iter()
            .map(|name| RepoSpec::for_distro(self.distro, name))
            .collect();

        debug!("{} expands to {:?}", directive, specs);
        specs
    }

    /// Resolve a directive to toggle actions
    ///
    /// Path-form specs are read now, so the file's current content decides
    /// which ids are affected.
    pub fn resolve(&self, directive: &Directive) -> Result<Vec<ToggleAction>> {
        let mut actions = Vec::new();

        for spec in self.expand(directive) {
            match spec {
                RepoSpec::Id(id) => actions.push(ToggleAction::new(id, directive.sign)),
                RepoSpec::SectionsOf(path) => {
                    let sections = self.sections.sections_of(&path)?;
                    if sections.is_empty() {
                        debug!("{} defines no repos", path.display());
                    }
                    actions.extend(
                        sections
                            .into_iter()
                            .map(|id| ToggleAction::new(id, directive.sign)),
                    );
                }
            }
        }

        Ok(actions)
    }

    /// Every action a run would issue, in order, without applying any
    pub fn plan(&self, directives: &[Directive]) -> Result<Vec<ToggleAction>> {
        let mut recorder = Recorder::new();
        self.apply(directives, &mut recorder)?;
        Ok(recorder.into_actions())
    }

    /// Resolve and apply directives in order
    ///
    /// Returns the number of actions applied.
    pub fn apply(&self, directives: &[Directive], backend: &mut dyn RepoBackend) -> Result<usize> {
        let mut applied = 0;

        for directive in directives {
            for action in self.resolve(directive)? {
                debug!("{} -> {}", directive, action);
                backend.apply(&action)?;
                applied += 1;
            }
        }

        if !directives.is_empty() {
            info!(
                "Applied {} repo actions from {} directives on {}",
                applied,
                directives.len(),
                self.distro
            );
        }
        Ok(applied)
    }
}
