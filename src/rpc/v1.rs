//! Wire-level v1 request/response shapes (newline-delimited JSON) and
//! their conversion to/from [`crate::engine`] types.
//!
//! Grounded in `service/v1/conversions.cc`'s `ToInternalRequest`/
//! `ToV1Response` pair. Two behaviors are carried over verbatim (spec
//! §6.1):
//! - A request with no `package_field_mask` gets a default mask applied
//!   *before* it reaches the core: `["name"]` for `Search`, every field
//!   for `Lookup`/`Resolve`.
//! - The wire-level enum string `"UNKNOWN"` coerces to the matching
//!   engine `Unknown` variant, which the core then resolves to its own
//!   default (spec §4.5). Unlike the original (whose `default:` switch
//!   arm in `ToInternalRequest` also collapses a genuinely unrecognized
//!   protobuf ordinal to `UNKNOWN`, making the core's `UNIMPLEMENTED`
//!   arm dead code behind that boundary), this boundary passes an
//!   unrecognized *string* through unchanged as `Other(raw)` so the
//!   core's `EngineError::Unimplemented` path is real and reachable, not
//!   defensive dead code — see `DESIGN.md`.

use serde::{Deserialize, Serialize};

use crate::engine::{LookupBy, LookupResult, QueryEngine, ResolvedEntry, SearchBy, SearchLogic};
use crate::error::Result;
use crate::record::{FieldMask, PackageRecord};

fn parse_lookup_by(raw: &str) -> LookupBy {
    match raw {
        "UNKNOWN" => LookupBy::Unknown,
        "NAME" => LookupBy::Name,
        "PKGBASE" => LookupBy::Pkgbase,
        "MAINTAINER" => LookupBy::Maintainer,
        "GROUP" => LookupBy::Group,
        "KEYWORD" => LookupBy::Keyword,
        "DEPENDS" => LookupBy::Depends,
        "MAKEDEPENDS" => LookupBy::Makedepends,
        "CHECKDEPENDS" => LookupBy::Checkdepends,
        "OPTDEPENDS" => LookupBy::Optdepends,
        other => LookupBy::Other(other.to_string()),
    }
}

fn parse_search_by(raw: &str) -> SearchBy {
    match raw {
        "UNKNOWN" => SearchBy::Unknown,
        "NAME" => SearchBy::Name,
        "NAME_DESC" => SearchBy::NameDesc,
        other => SearchBy::Other(other.to_string()),
    }
}

fn parse_search_logic(raw: &str) -> SearchLogic {
    match raw {
        "UNKNOWN" => SearchLogic::Unknown,
        "DISJUNCTIVE" => SearchLogic::Disjunctive,
        "CONJUNCTIVE" => SearchLogic::Conjunctive,
        other => SearchLogic::Other(other.to_string()),
    }
}

fn field_mask_or_default(options: Option<&RequestOptions>, default_to_all: bool) -> FieldMask {
    match options.and_then(|o| o.package_field_mask.as_ref()) {
        Some(paths) => FieldMask {
            paths: paths.clone(),
        },
        None if default_to_all => FieldMask::all(),
        None => FieldMask::single("name"),
    }
}

/// Wire-level field-mask option, shared by all three request kinds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Field-name paths to project responses through; absent means "apply
    /// the request kind's default" (see module docs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_field_mask: Option<Vec<String>>,
}

/// Wire-level `Lookup` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Raw enum name, e.g. `"NAME"`, `"DEPENDS"`, `"UNKNOWN"`.
    pub lookup_by: String,
    /// Query names.
    pub names: Vec<String>,
    /// Field-mask options; defaults to "all fields" when omitted.
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Wire-level `Lookup` response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Matched, field-masked records.
    pub packages: Vec<PackageRecord>,
    /// Query names that matched nothing.
    pub not_found_names: Vec<String>,
}

/// Wire-level `Search` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw enum name, e.g. `"NAME_DESC"`.
    pub search_by: String,
    /// Raw enum name, e.g. `"CONJUNCTIVE"`.
    pub search_logic: String,
    /// Search terms (glob patterns).
    pub terms: Vec<String>,
    /// Field-mask options; defaults to `["name"]` when omitted.
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// Wire-level `Search` response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matched, field-masked records.
    pub packages: Vec<PackageRecord>,
}

/// Wire-level `Resolve` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Depstrings to resolve.
    pub depstrings: Vec<String>,
    /// Field-mask options; defaults to "all fields" when omitted.
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

/// One resolved depstring and its providers, wire-level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireResolvedEntry {
    /// The input depstring, unchanged.
    pub depstring: String,
    /// Field-masked provider records.
    pub providers: Vec<PackageRecord>,
}

/// Wire-level `Resolve` response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// One entry per input depstring, in input order.
    pub resolved_packages: Vec<WireResolvedEntry>,
}

impl LookupRequest {
    /// What: Adapt this wire request to an engine call and convert the
    /// result back to wire shape.
    ///
    /// # Errors
    /// See [`QueryEngine::lookup`].
    pub fn handle(&self, engine: &QueryEngine) -> Result<LookupResponse> {
        let by = parse_lookup_by(&self.lookup_by);
        let mask = field_mask_or_default(self.options.as_ref(), true);
        let LookupResult {
            packages,
            not_found_names,
        } = engine.lookup(&by, &self.names, &mask)?;
        Ok(LookupResponse {
            packages,
            not_found_names,
        })
    }
}

impl SearchRequest {
    /// What: Adapt this wire request to an engine call and convert the
    /// result back to wire shape.
    ///
    /// # Errors
    /// See [`QueryEngine::search`].
    pub fn handle(&self, engine: &QueryEngine) -> Result<SearchResponse> {
        let by = parse_search_by(&self.search_by);
        let logic = parse_search_logic(&self.search_logic);
        let mask = field_mask_or_default(self.options.as_ref(), false);
        let packages = engine.search(&by, &logic, &self.terms, &mask)?;
        Ok(SearchResponse { packages })
    }
}

impl ResolveRequest {
    /// What: Adapt this wire request to an engine call and convert the
    /// result back to wire shape.
    #[must_use]
    pub fn handle(&self, engine: &QueryEngine) -> ResolveResponse {
        let mask = field_mask_or_default(self.options.as_ref(), true);
        let resolved_packages = engine
            .resolve(&self.depstrings, &mask)
            .into_iter()
            .map(|ResolvedEntry { depstring, providers }| WireResolvedEntry {
                depstring,
                providers,
            })
            .collect();
        ResolveResponse { resolved_packages }
    }
}
