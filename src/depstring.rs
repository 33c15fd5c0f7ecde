//! Dependency expression ("depstring") parsing and satisfaction.
//!
//! Grounded in `original_source`'s `ParsedDependency`
//! (`service/internal/parsed_dependency.cc`): a depstring is a bare package
//! name, optionally followed by a comparison operator and a version. Parse
//! priority matches the original exactly — `<=` and `>=` are checked before
//! the single-character operators, since `<` / `>` / `=` would otherwise
//! match inside them first.

use std::cmp::Ordering;

use crate::record::PackageRecord;
use crate::version::vercmp;

/// Comparison operator embedded in a depstring, e.g. the `>=` in
/// `"foo>=1.0"`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DependencyOp {
    /// No version constraint (bare name).
    #[default]
    None,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// A parsed dependency expression: a package name plus an optional version
/// constraint.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DependencyExpression {
    /// The package name being required (or provided).
    pub name: String,
    /// The comparison operator, [`DependencyOp::None`] when unversioned.
    pub op: DependencyOp,
    /// The constraint version; empty when `op` is `None`.
    pub version: String,
}

impl DependencyExpression {
    /// What: Parse a depstring such as `"foo>=1.0"` or `"foo"`.
    ///
    /// Inputs:
    /// - `depstring`: the raw dependency/provides/conflicts entry.
    ///
    /// Output: a [`DependencyExpression`].
    ///
    /// Details:
    /// - Checks `<=` and `>=` first, then the first of `<`, `>`, `=`,
    ///   matching `ParsedDependency`'s constructor exactly.
    #[must_use]
    pub fn parse(depstring: &str) -> Self {
        if let Some(pos) = depstring.find("<=") {
            return Self {
                name: depstring[..pos].to_string(),
                op: DependencyOp::Le,
                version: depstring[pos + 2..].to_string(),
            };
        }
        if let Some(pos) = depstring.find(">=") {
            return Self {
                name: depstring[..pos].to_string(),
                op: DependencyOp::Ge,
                version: depstring[pos + 2..].to_string(),
            };
        }
        if let Some(pos) = depstring.find(['<', '>', '=']) {
            let op = match depstring.as_bytes()[pos] {
                b'<' => DependencyOp::Lt,
                b'>' => DependencyOp::Gt,
                b'=' => DependencyOp::Eq,
                _ => unreachable!(),
            };
            return Self {
                name: depstring[..pos].to_string(),
                op,
                version: depstring[pos + 1..].to_string(),
            };
        }
        Self {
            name: depstring.to_string(),
            op: DependencyOp::None,
            version: String::new(),
        }
    }

    /// What: Check whether `candidate_version` satisfies this expression's
    /// version constraint.
    ///
    /// Details:
    /// - `op == None` never satisfies a version check (callers should only
    ///   reach this once `version` is non-empty).
    #[must_use]
    pub fn satisfied_by_version(&self, candidate_version: &str) -> bool {
        let ord = vercmp(candidate_version, &self.version);
        match self.op {
            DependencyOp::Eq => ord == Ordering::Equal,
            DependencyOp::Ge => ord != Ordering::Less,
            DependencyOp::Gt => ord == Ordering::Greater,
            DependencyOp::Le => ord != Ordering::Greater,
            DependencyOp::Lt => ord == Ordering::Less,
            DependencyOp::None => false,
        }
    }

    /// What: Check whether `candidate` satisfies this dependency expression.
    ///
    /// Details:
    /// - Unversioned: satisfied by an exact name match, or by any
    ///   `provides` entry whose parsed name matches (version ignored).
    /// - Versioned: satisfied by an exact name match with a satisfying
    ///   `pkgver`, or by a `provides` entry that (a) names this package,
    ///   (b) itself uses `=` (an unversioned or range-constrained provide
    ///   can never satisfy a versioned requirement), and (c) whose provided
    ///   version satisfies the constraint.
    #[must_use]
    pub fn satisfied_by(&self, candidate: &PackageRecord) -> bool {
        if matches!(self.op, DependencyOp::None) {
            if self.name == candidate.name {
                return true;
            }
            return candidate
                .provides
                .iter()
                .any(|p| Self::parse(p).name == self.name);
        }

        if self.name == candidate.name && self.satisfied_by_version(&candidate.pkgver) {
            return true;
        }

        candidate.provides.iter().any(|p| {
            let provide = Self::parse(p);
            provide.op == DependencyOp::Eq
                && provide.name == self.name
                && self.satisfied_by_version(&provide.version)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str, pkgver: &str, provides: &[&str]) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            pkgver: pkgver.to_string(),
            provides: provides.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_each_operator() {
        assert_eq!(
            DependencyExpression::parse("foo"),
            DependencyExpression {
                name: "foo".into(),
                op: DependencyOp::None,
                version: String::new(),
            }
        );
        assert_eq!(
            DependencyExpression::parse("foo=1.0"),
            DependencyExpression {
                name: "foo".into(),
                op: DependencyOp::Eq,
                version: "1.0".into(),
            }
        );
        assert_eq!(
            DependencyExpression::parse("foo<=1.0").op,
            DependencyOp::Le
        );
        assert_eq!(
            DependencyExpression::parse("foo>=1.0").op,
            DependencyOp::Ge
        );
        assert_eq!(DependencyExpression::parse("foo<1.0").op, DependencyOp::Lt);
        assert_eq!(DependencyExpression::parse("foo>1.0").op, DependencyOp::Gt);
    }

    #[test]
    fn le_and_ge_take_priority_over_single_char_operators() {
        // "<=" contains both '<' and '=' - must not be misparsed as Lt.
        let dep = DependencyExpression::parse("foo<=2.0");
        assert_eq!(dep.op, DependencyOp::Le);
        assert_eq!(dep.version, "2.0");
    }

    #[test]
    fn unversioned_requirement_matches_name_only() {
        let foo = package("foo", "1.0.0", &[]);
        let bar = package("bar", "1.0.0", &[]);
        let dep = DependencyExpression::parse("foo");
        assert!(dep.satisfied_by(&foo));
        assert!(!dep.satisfied_by(&bar));
    }

    #[test]
    fn versioned_requirement_checks_vercmp() {
        let foo_0_9_9 = package("foo", "0.9.9", &[]);
        let foo_1_0_0 = package("foo", "1.0.0", &[]);
        let foo_1_1_0 = package("foo", "1.1.0", &[]);

        let dep = DependencyExpression::parse("foo=1.0.0");
        assert!(dep.satisfied_by(&foo_1_0_0));
        assert!(!dep.satisfied_by(&foo_1_1_0));

        let dep = DependencyExpression::parse("foo>=1.0.0");
        assert!(!dep.satisfied_by(&foo_0_9_9));
        assert!(dep.satisfied_by(&foo_1_0_0));
        assert!(dep.satisfied_by(&foo_1_1_0));

        let dep = DependencyExpression::parse("foo<1.0.0");
        assert!(dep.satisfied_by(&foo_0_9_9));
        assert!(!dep.satisfied_by(&foo_1_0_0));
    }

    #[test]
    fn versioned_requirement_rejects_name_mismatch() {
        let bar = package("bar", "1.0.0", &[]);
        let dep = DependencyExpression::parse("foo=1.0.0");
        assert!(!dep.satisfied_by(&bar));
    }

    #[test]
    fn unversioned_requirement_satisfied_by_provision() {
        let bar = package("bar", "9.9.9", &["quux", "foo"]);
        let bar_versioned = package("bar", "9.9.9", &["quux", "foo=42"]);
        let dep = DependencyExpression::parse("foo");
        assert!(dep.satisfied_by(&bar));
        assert!(dep.satisfied_by(&bar_versioned));
    }

    #[test]
    fn versioned_requirement_satisfied_by_versioned_provision() {
        let bar_0_9_9 = package("bar", "9.9.9", &["foo=0.9.9"]);
        let bar_1_0_0 = package("bar", "9.9.9", &["foo=1.0.0"]);
        let bar_1_1_0 = package("bar", "9.9.9", &["foo=1.1.0"]);

        let dep = DependencyExpression::parse("foo=1.0.0");
        assert!(dep.satisfied_by(&bar_1_0_0));
        assert!(!dep.satisfied_by(&bar_1_1_0));
        assert!(!dep.satisfied_by(&bar_0_9_9));
    }

    #[test]
    fn non_eq_provide_cannot_satisfy_versioned_requirement() {
        let bar = package("bar", "9.9.9", &["foo>=1.0.0"]);
        let dep = DependencyExpression::parse("foo=1.0.0");
        assert!(!dep.satisfied_by(&bar));
    }
}
