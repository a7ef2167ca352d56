//! Summary of a filtering run.

use std::fmt;

use serde::Serialize;

use crate::selector::SelectorMatch;
use crate::types::Dialect;

/// Entry counts for one container before and after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    pub total: usize,
    pub retained: usize,
}

impl ContainerStats {
    pub fn new(total: usize, retained: usize) -> Self {
        Self { total, retained }
    }

    /// Number of entries that were dropped.
    pub fn removed(&self) -> usize {
        self.total - self.retained
    }
}

/// Operator-facing summary of a filtering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub paths: ContainerStats,
    /// `None` when the input had no `components.schemas`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<ContainerStats>,
    /// `None` when the input had no `definitions`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<ContainerStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<SelectorMatch>,
}

impl FilterReport {
    pub fn stats(&self, dialect: Dialect) -> Option<ContainerStats> {
        match dialect {
            Dialect::Components => self.schemas,
            Dialect::Definitions => self.definitions,
        }
    }

    /// Selectors that matched no path.
    pub fn unmatched(&self) -> Vec<&str> {
        self.selectors
            .iter()
            .filter(|m| m.matched == 0)
            .map(|m| m.selector.as_str())
            .collect()
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paths: {} of {} retained",
            self.paths.retained, self.paths.total
        )?;
        for dialect in Dialect::ALL {
            if let Some(stats) = self.stats(dialect) {
                write!(
                    f,
                    "\n{}: {} of {} retained",
                    dialect.label(),
                    stats.retained,
                    stats.total
                )?;
            }
        }
        for selector in self.unmatched() {
            write!(f, "\nunmatched selector: {}", selector)?;
        }
        Ok(())
    }
}
