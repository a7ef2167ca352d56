//! Core types for OpenAPI document filtering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key marking a reference object.
pub const REF_KEY: &str = "$ref";

/// Prefix of a reference into `components.schemas` (OpenAPI 3).
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Prefix of a reference into `definitions` (Swagger 2).
pub const DEFINITION_REF_PREFIX: &str = "#/definitions/";

/// Top-level key holding the path entries.
pub const PATHS_KEY: &str = "paths";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Where named schemas live in a document.
///
/// Each dialect has its own container and its own reference prefix.
/// References never cross dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// OpenAPI 3: `components.schemas`, referenced as `#/components/schemas/Name`.
    Components,
    /// Swagger 2: `definitions`, referenced as `#/definitions/Name`.
    Definitions,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Components, Dialect::Definitions];

    /// Returns the `$ref` prefix that targets this dialect's container.
    pub fn ref_prefix(&self) -> &'static str {
        match self {
            Dialect::Components => SCHEMA_REF_PREFIX,
            Dialect::Definitions => DEFINITION_REF_PREFIX,
        }
    }

    /// Human label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Components => "schemas",
            Dialect::Definitions => "definitions",
        }
    }

    /// Classify a `$ref` string, returning the dialect and target name.
    ///
    /// Returns `None` for external refs and any other in-document pointer.
    pub fn classify(reference: &str) -> Option<(Dialect, &str)> {
        Dialect::ALL.into_iter().find_map(|dialect| {
            reference
                .strip_prefix(dialect.ref_prefix())
                .map(|name| (dialect, name))
        })
    }

    /// Look up this dialect's container in a document.
    ///
    /// Returns `None` when the container is absent or not an object.
    pub fn container<'a>(&self, document: &'a Value) -> Option<&'a Map<String, Value>> {
        let container = match self {
            Dialect::Components => document.get("components")?.get("schemas")?,
            Dialect::Definitions => document.get("definitions")?,
        };
        container.as_object()
    }

    /// Replace this dialect's container in a document.
    ///
    /// Does nothing if the document has no container for this dialect,
    /// so an absent field stays absent.
    pub fn replace_container(&self, document: &mut Value, container: Map<String, Value>) {
        let slot = match self {
            Dialect::Components => document
                .get_mut("components")
                .and_then(|components| components.get_mut("schemas")),
            Dialect::Definitions => document.get_mut("definitions"),
        };
        if let Some(slot) = slot {
            *slot = Value::Object(container);
        }
    }
}

/// How selectors are compared with path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Path string must equal the selector.
    #[default]
    Exact,
    /// Selector is a regular expression searched within the path string.
    Pattern,
}

impl MatchMode {
    /// Create match mode from a regex flag (true = Pattern, false = Exact).
    pub fn from_regex_flag(regex: bool) -> Self {
        if regex {
            MatchMode::Pattern
        } else {
            MatchMode::Exact
        }
    }
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Parse a format name (case-insensitive).
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Guess the format from a file name or URL by its extension.
    pub fn from_extension(source: &str) -> Option<Self> {
        let ext = source.rsplit_once('.')?.1;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Options for filtering a document.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// How selectors are matched against path strings.
    pub mode: MatchMode,
    /// Output format. `None` keeps the input format.
    pub format: Option<Format>,
    /// Pretty-print JSON output. YAML output is always block style.
    pub pretty: bool,
}

impl FilterOptions {
    /// Create options with exact matching and the input's format.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            format: None,
            pretty: false,
        }
    }

    /// Force an output format.
    pub fn format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    /// Set pretty-printing for JSON output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::new(MatchMode::Exact)
    }
}
