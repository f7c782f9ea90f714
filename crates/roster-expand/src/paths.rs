//! Expansion path compilation.
//!
//! Turns the raw `expand` request list into an ordered, deduplicated list of
//! paths. Every prefix of a request is emitted before the path that extends
//! it, so `manager.manager.office` compiles to `manager`, `manager.manager`,
//! `manager.manager.office`. The relation of each path is decided here, once,
//! from its last segment.

use std::collections::HashSet;
use std::fmt;

/// Kinds of foreign key the engine knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Office,
    Department,
    /// A department's parent; shares the department table.
    Superdepartment,
    /// An employee's manager, resolved through the manager cache.
    Manager,
}

impl Relation {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "office" => Some(Relation::Office),
            "department" => Some(Relation::Department),
            "superdepartment" => Some(Relation::Superdepartment),
            "manager" => Some(Relation::Manager),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Office => "office",
            Relation::Department => "department",
            Relation::Superdepartment => "superdepartment",
            Relation::Manager => "manager",
        }
    }
}

/// A single dotted path to resolve, e.g. `manager.office`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionPath {
    dotted: String,
    segments: Vec<String>,
    /// `None` when the last segment names no known relation. Such paths
    /// only fail if a value is actually found at them.
    relation: Option<Relation>,
}

impl ExpansionPath {
    fn new(segments: Vec<String>) -> Self {
        let relation = segments.last().and_then(|s| Relation::from_segment(s));
        Self {
            dotted: segments.join("."),
            segments,
            relation,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when every segment is `manager`.
    pub fn is_manager_chain(&self) -> bool {
        self.segments
            .iter()
            .all(|s| Relation::from_segment(s) == Some(Relation::Manager))
    }
}

impl fmt::Display for ExpansionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

/// Compiled form of an `expand` request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionPlan {
    paths: Vec<ExpansionPath>,
    manager_paths: Vec<ExpansionPath>,
}

impl ExpansionPlan {
    /// Compile requests in order. Blank requests are ignored; anything else
    /// is accepted, unknown relation names included.
    pub fn compile<S: AsRef<str>>(requests: &[S]) -> Self {
        let mut plan = ExpansionPlan::default();
        let mut seen = HashSet::new();

        for request in requests {
            let request = request.as_ref();
            if request.trim().is_empty() {
                continue;
            }
            let segments: Vec<&str> = request.split('.').collect();
            for end in 1..=segments.len() {
                let path = ExpansionPath::new(
                    segments[..end].iter().map(|s| s.to_string()).collect(),
                );
                if !seen.insert(path.dotted.clone()) {
                    continue;
                }
                if path.is_manager_chain() {
                    plan.manager_paths.push(path.clone());
                }
                plan.paths.push(path);
            }
        }

        plan
    }

    /// All paths, each after its proper prefixes.
    pub fn paths(&self) -> &[ExpansionPath] {
        &self.paths
    }

    /// Paths made only of `manager` segments.
    pub fn manager_paths(&self) -> &[ExpansionPath] {
        &self.manager_paths
    }

    /// Number of manager hops the cache must cover before expanding.
    ///
    /// Prefixes are always present, so the count of manager-only paths
    /// equals the longest manager chain requested.
    pub fn manager_depth(&self) -> usize {
        self.manager_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dotted(paths: &[ExpansionPath]) -> Vec<&str> {
        paths.iter().map(ExpansionPath::as_str).collect()
    }

    #[test]
    fn empty_request_list() {
        let plan = ExpansionPlan::compile::<&str>(&[]);
        assert!(plan.is_empty());
        assert!(plan.manager_paths().is_empty());
        assert_eq!(plan.manager_depth(), 0);
    }

    #[test]
    fn prefixes_come_first() {
        let plan = ExpansionPlan::compile(&["manager.manager.office"]);
        assert_eq!(
            dotted(plan.paths()),
            vec!["manager", "manager.manager", "manager.manager.office"]
        );
        assert_eq!(dotted(plan.manager_paths()), vec!["manager", "manager.manager"]);
    }

    #[test]
    fn every_path_follows_its_prefixes() {
        let plan = ExpansionPlan::compile(&[
            "department.superdepartment.superdepartment",
            "manager.department",
            "office",
            "manager.manager.manager",
        ]);
        let paths = dotted(plan.paths());
        for (idx, path) in paths.iter().enumerate() {
            let mut prefix = String::new();
            for segment in path.split('.') {
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(segment);
                let pos = paths.iter().position(|p| *p == prefix).unwrap();
                assert!(pos <= idx, "{prefix} must precede {path}");
            }
        }
    }

    #[test]
    fn duplicates_are_dropped_in_request_order() {
        let plan = ExpansionPlan::compile(&["office", "manager.office", "manager", "office"]);
        assert_eq!(dotted(plan.paths()), vec!["office", "manager", "manager.office"]);
    }

    #[test]
    fn depth_counts_manager_only_paths() {
        let single = ExpansionPlan::compile(&["manager.manager.manager"]);
        let spelled_out =
            ExpansionPlan::compile(&["manager", "manager.manager", "manager.manager.manager"]);
        assert_eq!(single.manager_depth(), 3);
        assert_eq!(spelled_out.manager_depth(), 3);
        assert_eq!(single.paths(), spelled_out.paths());
    }

    #[test]
    fn mixed_chain_contributes_its_manager_prefix() {
        let plan = ExpansionPlan::compile(&["manager.office", "department"]);
        assert_eq!(dotted(plan.manager_paths()), vec!["manager"]);
        assert_eq!(plan.manager_depth(), 1);
    }

    #[test]
    fn relation_comes_from_last_segment() {
        let plan = ExpansionPlan::compile(&["manager.department.superdepartment", "boss"]);
        let relations: Vec<_> = plan.paths().iter().map(ExpansionPath::relation).collect();
        assert_eq!(
            relations,
            vec![
                Some(Relation::Manager),
                Some(Relation::Department),
                Some(Relation::Superdepartment),
                None,
            ]
        );
    }

    #[test]
    fn blank_requests_are_ignored() {
        let plan = ExpansionPlan::compile(&["", "  ", "office"]);
        assert_eq!(dotted(plan.paths()), vec!["office"]);
    }

    #[test]
    fn relation_names_round_trip() {
        for relation in [
            Relation::Office,
            Relation::Department,
            Relation::Superdepartment,
            Relation::Manager,
        ] {
            assert_eq!(Relation::from_segment(relation.as_str()), Some(relation));
        }
    }
}
