//! Repository group aliases
//!
//! Symbolic names used in DIST_REPOS (`OS`, `STX`) expand to concrete repo
//! identifiers. Each distro family has its own table:
//!
//! | Group | Debian  | CentOS                       |
//! |-------|---------|------------------------------|
//! | `OS`  | `debian`| `base updates extras`        |
//! | `STX` | `stx`   | `/etc/yum.repos.d/stx.repo`  |
//!
//! A CentOS expansion starting with `/` is a path-form spec: every section
//! of that `.repo` file is toggled.

use crate::Distro;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Path of the StarlingX yum repo file on CentOS images
pub const CENTOS_STX_REPO_FILE: &str = "/etc/yum.repos.d/stx.repo";

/// Ordered mapping from group name to concrete names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTable {
    groups: IndexMap<String, Vec<String>>,
}

impl GroupTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table used on Debian images
    pub fn debian() -> Self {
        let mut table = Self::new();
        table.insert("OS", "debian");
        table.insert("STX", "stx");
        table
    }

    /// Table used on CentOS images
    pub fn centos() -> Self {
        let mut table = Self::new();
        table.insert("OS", "base updates extras");
        table.insert("STX", CENTOS_STX_REPO_FILE);
        table
    }

    /// Table for a distro family
    pub fn for_distro(distro: Distro) -> Self {
        match distro {
            Distro::Debian => Self::debian(),
            Distro::Centos => Self::centos(),
        }
    }

    /// Define a group from a whitespace-separated expansion
    pub fn insert(&mut self, name: impl Into<String>, expansion: &str) {
        let names = expansion.split_whitespace().map(str::to_string).collect();
        self.groups.insert(name.into(), names);
    }

    /// Get a group's expansion
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Check if a name is a group alias
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Expand a name to concrete names
    ///
    /// Group lookup wins over a literal of the same name. Unknown names are
    /// returned verbatim. Expansions are not looked up again.
    pub fn expand(&self, name: &str) -> Vec<String> {
        match self.groups.get(name) {
            Some(names) => names.clone(),
            None => vec![name.to_string()],
        }
    }

    /// Iterate over groups in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, names)| (name.as_str(), names.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_debian_table() {
        let table = GroupTable::debian();
        assert_eq!(table.expand("OS"), vec!["debian"]);
        assert_eq!(table.expand("STX"), vec!["stx"]);
    }

    #[test]
    fn test_centos_table() {
        let table = GroupTable::centos();
        assert_eq!(table.expand("OS"), vec!["base", "updates", "extras"]);
        assert_eq!(table.expand("STX"), vec![CENTOS_STX_REPO_FILE]);
    }

    #[test]
    fn test_unknown_name_is_literal() {
        let table = GroupTable::centos();
        assert_eq!(table.expand("epel"), vec!["epel"]);
        // group keys are case-sensitive
        assert_eq!(table.expand("os"), vec!["os"]);
    }

    #[test]
    fn test_no_recursive_expansion() {
        let mut table = GroupTable::new();
        table.insert("ALL", "OS STX");
        table.insert("OS", "debian");
        assert_eq!(table.expand("ALL"), vec!["OS", "STX"]);
    }

    #[test]
    fn test_group_shadows_literal() {
        let mut table = GroupTable::new();
        table.insert("base", "base-mirror");
        assert_eq!(table.expand("base"), vec!["base-mirror"]);
    }

    #[test]
    fn test_iter_keeps_order() {
        let table = GroupTable::for_distro(Distro::Centos);
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["OS", "STX"]);
        assert_eq!(table.len(), 2);
        assert!(table.contains("STX"));
        assert!(!GroupTable::new().contains("STX"));
    }
}
