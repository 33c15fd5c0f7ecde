//! Package record type and field-mask projection.

use serde::{Deserialize, Serialize};

/// A single package's metadata as loaded from `Storage`.
///
/// All fields besides `name` are optional in the sense that an absent
/// value round-trips as the type's default (empty string, `0`, empty
/// vector). See spec §3 for the full field table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Unique identifier of the package.
    pub name: String,
    /// Identifier of the source group the package belongs to.
    #[serde(default)]
    pub pkgbase: String,
    /// Version string, compared by [`crate::version::vercmp`].
    #[serde(default)]
    pub pkgver: String,
    /// Free-form human text.
    #[serde(default)]
    pub description: String,
    /// Informational upstream URL.
    #[serde(default)]
    pub url: String,
    /// Popularity counter.
    #[serde(default)]
    pub votes: i32,
    /// Informational popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Unix-epoch submission timestamp (0 = unset).
    #[serde(default)]
    pub submitted: i64,
    /// Unix-epoch last-modified timestamp (0 = unset).
    #[serde(default)]
    pub modified: i64,
    /// Unix-epoch out-of-date timestamp (0 = unset).
    #[serde(default)]
    pub out_of_date: i64,
    /// Maintainer usernames.
    #[serde(default)]
    pub maintainers: Vec<String>,
    /// Package group memberships.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Free-form keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// SPDX or human-readable license identifiers.
    #[serde(default)]
    pub licenses: Vec<String>,
    /// Supported architectures.
    #[serde(default)]
    pub architectures: Vec<String>,
    /// Conflicting package names/depstrings.
    #[serde(default)]
    pub conflicts: Vec<String>,
    /// Package names this package replaces.
    #[serde(default)]
    pub replaces: Vec<String>,
    /// Depstrings this package satisfies in addition to its own name.
    #[serde(default)]
    pub provides: Vec<String>,
    /// Runtime dependency depstrings.
    #[serde(default)]
    pub depends: Vec<String>,
    /// Build-time dependency depstrings.
    #[serde(default)]
    pub makedepends: Vec<String>,
    /// Test-time dependency depstrings.
    #[serde(default)]
    pub checkdepends: Vec<String>,
    /// Optional dependency depstrings.
    #[serde(default)]
    pub optdepends: Vec<String>,
}

/// A list of field-name paths over [`PackageRecord`] controlling which
/// parts of a record are returned from a query.
///
/// An empty mask projects to an entirely empty record; unknown paths are
/// ignored. See spec §4.5 "Field-mask projection".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMask {
    /// Field-name paths to keep, e.g. `"name"`, `"depends"`.
    pub paths: Vec<String>,
}

impl FieldMask {
    /// What: Build a mask that keeps every [`PackageRecord`] field.
    ///
    /// Output: a [`FieldMask`] naming all top-level fields.
    #[must_use]
    pub fn all() -> Self {
        Self {
            paths: ALL_FIELDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// What: Build a mask containing a single path.
    #[must_use]
    pub fn single(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    fn has(&self, field: &str) -> bool {
        self.paths.iter().any(|p| p == field)
    }

    /// What: Project `record` through this mask, keeping only named fields.
    ///
    /// Inputs:
    /// - `record`: the source record; not mutated.
    ///
    /// Output: a new [`PackageRecord`] with only masked fields populated.
    ///
    /// Details:
    /// - Unknown paths in the mask are silently ignored.
    /// - Applied at emission so stored records are never mutated (spec §4.5).
    #[must_use]
    pub fn project(&self, record: &PackageRecord) -> PackageRecord {
        let mut out = PackageRecord::default();
        macro_rules! copy {
            ($field:ident) => {
                if self.has(stringify!($field)) {
                    out.$field = record.$field.clone();
                }
            };
        }
        copy!(name);
        copy!(pkgbase);
        copy!(pkgver);
        copy!(description);
        copy!(url);
        copy!(votes);
        copy!(popularity);
        copy!(submitted);
        copy!(modified);
        copy!(out_of_date);
        copy!(maintainers);
        copy!(groups);
        copy!(keywords);
        copy!(licenses);
        copy!(architectures);
        copy!(conflicts);
        copy!(replaces);
        copy!(provides);
        copy!(depends);
        copy!(makedepends);
        copy!(checkdepends);
        copy!(optdepends);
        out
    }
}

const ALL_FIELDS: &[&str] = &[
    "name",
    "pkgbase",
    "pkgver",
    "description",
    "url",
    "votes",
    "popularity",
    "submitted",
    "modified",
    "out_of_date",
    "maintainers",
    "groups",
    "keywords",
    "licenses",
    "architectures",
    "conflicts",
    "replaces",
    "provides",
    "depends",
    "makedepends",
    "checkdepends",
    "optdepends",
];
