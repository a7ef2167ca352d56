//! Dependency closure - finds every named schema a set of paths needs.
//!
//! A parsed `Value` is a tree, so walking one subtree never visits a node
//! twice. Repeated work can only come from following `$ref`s between named
//! entries, and the worklist below expands each named entry at most once.
//! That also makes reference cycles (`A -> B -> A`) terminate.

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::types::{Dialect, REF_KEY};

/// Names referenced so far, kept separately per dialect.
///
/// Names are only ever added; insertion order is discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedNames {
    schemas: IndexSet<String>,
    definitions: IndexSet<String>,
}

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, returning true if it was not present yet.
    pub fn insert(&mut self, dialect: Dialect, name: &str) -> bool {
        let names = self.names_mut(dialect);
        if names.contains(name) {
            return false;
        }
        names.insert(name.to_string())
    }

    /// Names referenced for one dialect.
    pub fn get(&self, dialect: Dialect) -> &IndexSet<String> {
        match dialect {
            Dialect::Components => &self.schemas,
            Dialect::Definitions => &self.definitions,
        }
    }

    pub fn contains(&self, dialect: Dialect, name: &str) -> bool {
        self.get(dialect).contains(name)
    }

    /// Total number of names across both dialects.
    pub fn len(&self) -> usize {
        self.schemas.len() + self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn names_mut(&mut self, dialect: Dialect) -> &mut IndexSet<String> {
        match dialect {
            Dialect::Components => &mut self.schemas,
            Dialect::Definitions => &mut self.definitions,
        }
    }
}

/// Pruned copies of the schema containers.
///
/// A field is `None` when the input document had no such container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrunedContainers {
    pub schemas: Option<Map<String, Value>>,
    pub definitions: Option<Map<String, Value>>,
}

impl PrunedContainers {
    pub fn get(&self, dialect: Dialect) -> Option<&Map<String, Value>> {
        match dialect {
            Dialect::Components => self.schemas.as_ref(),
            Dialect::Definitions => self.definitions.as_ref(),
        }
    }

    fn set(&mut self, dialect: Dialect, container: Map<String, Value>) {
        match dialect {
            Dialect::Components => self.schemas = Some(container),
            Dialect::Definitions => self.definitions = Some(container),
        }
    }
}

/// Collect the names a subtree references in one dialect.
///
/// Names are added to `names`, which may already hold earlier results.
/// Refs of the other dialect, external refs and non-string `$ref` values
/// are skipped.
pub fn collect_refs(value: &Value, dialect: Dialect, names: &mut IndexSet<String>) {
    walk_refs(value, &mut |found: Dialect, name: &str| {
        if found == dialect && !names.contains(name) {
            names.insert(name.to_string());
        }
    });
}

/// Collect the names a subtree references in both dialects.
pub fn collect_all_refs(value: &Value, used: &mut UsedNames) {
    walk_refs(value, &mut |dialect: Dialect, name: &str| {
        used.insert(dialect, name);
    });
}

/// Compute the transitive set of container entries reachable from `seed`.
///
/// Seeds from every ref in `seed`, then expands each newly found entry of
/// `container` until no new names appear. Names with no entry in
/// `container` are dropped from the result.
pub fn closure(
    seed: &Value,
    container: &Map<String, Value>,
    dialect: Dialect,
) -> IndexSet<String> {
    let mut used = IndexSet::new();
    collect_refs(seed, dialect, &mut used);
    debug!(
        dialect = dialect.label(),
        seeded = used.len(),
        "seeded reference set"
    );

    // `used` doubles as the worklist: everything past `next` is still
    // to be expanded, and expanding only ever appends.
    let mut next = 0;
    while next < used.len() {
        let name = &used[next];
        next += 1;

        let Some(body) = container.get(name) else {
            trace!(dialect = dialect.label(), name = %name, "dangling reference");
            continue;
        };

        let before = used.len();
        collect_refs(body, dialect, &mut used);
        if used.len() > before {
            trace!(
                dialect = dialect.label(),
                name = %used[next - 1],
                added = used.len() - before,
                "expanded entry"
            );
        }
    }

    used.retain(|name| container.contains_key(name));
    debug!(
        dialect = dialect.label(),
        retained = used.len(),
        total = container.len(),
        "reference set converged"
    );
    used
}

/// Copy the entries of `container` whose names are in `names`.
///
/// Keeps the container's own key order and leaves each body unchanged.
pub fn filter_container(
    container: &Map<String, Value>,
    names: &IndexSet<String>,
) -> Map<String, Value> {
    container
        .iter()
        .filter(|(name, _)| names.contains(name.as_str()))
        .map(|(name, body)| (name.clone(), body.clone()))
        .collect()
}

/// Prune both schema containers of `document` down to what `retained_paths` needs.
///
/// Each dialect is handled on its own; a container missing from `document`
/// stays `None`.
pub fn prune(retained_paths: &Value, document: &Value) -> PrunedContainers {
    let mut pruned = PrunedContainers::default();
    for dialect in Dialect::ALL {
        let Some(container) = dialect.container(document) else {
            continue;
        };
        let names = closure(retained_paths, container, dialect);
        pruned.set(dialect, filter_container(container, &names));
    }
    pruned
}

fn walk_refs<F>(value: &Value, on_ref: &mut F)
where
    F: FnMut(Dialect, &str),
{
    match value {
        Value::Object(map) => {
            if let Some((dialect, name)) = map
                .get(REF_KEY)
                .and_then(Value::as_str)
                .and_then(Dialect::classify)
            {
                on_ref(dialect, name);
            }
            // Sibling keys of `$ref` are walked too
            for child in map.values() {
                walk_refs(child, on_ref);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_refs(item, on_ref);
            }
        }
        _ => {}
    }
}
