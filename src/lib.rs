//! OpenAPI Filter
//!
//! Extracts a subset of an OpenAPI 3 or Swagger 2 document.
//!
//! Given a document and a set of path selectors, produces a reduced document
//! containing only the selected paths plus every schema those paths depend on,
//! directly or through other schemas. Unreferenced schemas are dropped, so the
//! result has no dangling `$ref`s that the input didn't already have.
//!
//! # Example
//!
//! ```
//! use openapi_filter::{filter_document, Selector};
//! use serde_json::json;
//!
//! let spec = json!({
//!     "openapi": "3.0.0",
//!     "paths": {
//!         "/a": { "$ref": "#/components/schemas/Foo" },
//!         "/b": { "$ref": "#/components/schemas/Bar" }
//!     },
//!     "components": {
//!         "schemas": {
//!             "Foo": { "$ref": "#/components/schemas/Shared" },
//!             "Bar": { "type": "string" },
//!             "Shared": {},
//!             "Orphan": {}
//!         }
//!     }
//! });
//!
//! let output = filter_document(&spec, &Selector::exact(["/a"]));
//! let schemas = output.document["components"]["schemas"].as_object().unwrap();
//!
//! assert!(output.document["paths"].get("/b").is_none());
//! assert_eq!(schemas.keys().collect::<Vec<_>>(), ["Foo", "Shared"]);
//! ```
//!
//! # Reference Forms
//!
//! | `$ref` prefix | Container |
//! |---------------|-----------|
//! | `#/components/schemas/` | `components.schemas` |
//! | `#/definitions/` | `definitions` |
//!
//! Any other `$ref` (external files, URLs, other component kinds) is left
//! alone and never pulls in an entry.

mod closure;
mod error;
mod filter;
mod loader;
mod report;
mod selector;
mod types;

pub use closure::{
    closure, collect_all_refs, collect_refs, filter_container, prune, PrunedContainers, UsedNames,
};
pub use error::FilterError;
pub use filter::{filter_document, filter_document_paths, path_keys, FilterOutput};
pub use loader::{
    is_url, load_document, load_document_auto, load_document_str, render_document,
    write_document, Loaded,
};
pub use report::{ContainerStats, FilterReport};
pub use selector::{load_selectors, parse_selectors, Selection, Selector, SelectorMatch};
pub use types::{
    Dialect, FilterOptions, Format, MatchMode, DEFINITION_REF_PREFIX, PATHS_KEY, REF_KEY,
    SCHEMA_REF_PREFIX,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
