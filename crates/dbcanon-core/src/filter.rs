//! Include/exclude name filters

use std::collections::HashSet;

/// Case-insensitive allow/deny lists applied to listed object names.
///
/// Both lists are comma separated and matched by exact membership after
/// lower-casing; no wildcards and no trimming around commas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

fn parse_list(list: &str) -> HashSet<String> {
    if list.is_empty() {
        return HashSet::new();
    }
    list.to_lowercase().split(',').map(str::to_string).collect()
}

impl NameFilter {
    pub fn new(include: &str, exclude: &str) -> Self {
        Self {
            include: parse_list(include),
            exclude: parse_list(exclude),
        }
    }

    /// A filter that keeps every name
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        if !self.include.is_empty() && !self.include.contains(&lowered) {
            return false;
        }
        !self.exclude.contains(&lowered)
    }
}
