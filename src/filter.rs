//! Document assembly - applies a selection and splices pruned containers back.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::closure::prune;
use crate::report::{ContainerStats, FilterReport};
use crate::selector::Selector;
use crate::types::{json_type_name, Dialect, PATHS_KEY};

/// A filtered document and the summary of what was kept.
#[derive(Debug, Clone)]
pub struct FilterOutput {
    pub document: Value,
    pub report: FilterReport,
}

/// Filter a document down to the paths `selector` retains.
///
/// The result keeps every top-level field of `document`, with `paths`
/// narrowed to the selection and `components.schemas` / `definitions`
/// narrowed to the entries those paths transitively reference.
/// `document` itself is left untouched.
pub fn filter_document(document: &Value, selector: &Selector) -> FilterOutput {
    let empty = Map::new();
    let paths = paths_of(document).unwrap_or(&empty);
    let selection = selector.select(paths);

    let mut output = filter_document_paths(document, selection.retained);
    output.report.selectors = selection.matches;
    output
}

/// Filter a document given the retained path entries directly.
///
/// `retained_paths` does not have to come from `document`'s own paths;
/// any map of path items works.
pub fn filter_document_paths(
    document: &Value,
    retained_paths: Map<String, Value>,
) -> FilterOutput {
    let paths_total = paths_of(document).map_or(0, Map::len);
    let paths_retained = retained_paths.len();

    let retained_paths = Value::Object(retained_paths);
    let pruned = prune(&retained_paths, document);

    let mut output = document.clone();
    match &mut output {
        Value::Object(root) => {
            if root.contains_key(PATHS_KEY) || paths_retained > 0 {
                root.insert(PATHS_KEY.to_string(), retained_paths);
            }
        }
        other => {
            warn!(
                actual = json_type_name(other),
                "document root is not an object, nothing to filter"
            );
        }
    }

    let mut report = FilterReport {
        paths: ContainerStats::new(paths_total, paths_retained),
        schemas: None,
        definitions: None,
        selectors: Vec::new(),
    };

    for dialect in Dialect::ALL {
        let (Some(original), Some(filtered)) = (dialect.container(document), pruned.get(dialect))
        else {
            continue;
        };
        let stats = ContainerStats::new(original.len(), filtered.len());
        debug!(
            container = dialect.label(),
            total = stats.total,
            retained = stats.retained,
            "pruned container"
        );
        match dialect {
            Dialect::Components => report.schemas = Some(stats),
            Dialect::Definitions => report.definitions = Some(stats),
        }
        dialect.replace_container(&mut output, filtered.clone());
    }

    FilterOutput {
        document: output,
        report,
    }
}

/// Path strings of a document, in document order.
pub fn path_keys(document: &Value) -> Vec<&str> {
    paths_of(document)
        .map(|paths| paths.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// The `paths` object of a document, if it has a usable one.
fn paths_of(document: &Value) -> Option<&Map<String, Value>> {
    let paths = document.get(PATHS_KEY)?;
    if !paths.is_object() {
        warn!(
            actual = json_type_name(paths),
            "`paths` is not an object, treating as empty"
        );
    }
    paths.as_object()
}
