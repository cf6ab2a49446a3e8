//! Read-only queries over a loaded [`Directory`] for the CLI layer.

use crate::directory::Directory;
use crate::error::EvalError;
use crate::host::Host;
use regex::Regex;
use std::fmt;

/// What kind of name a [`Usage`] row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A column tag on one or more host lines.
    Tag,
    /// A named macro.
    Macro,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::Macro => write!(f, "macro"),
        }
    }
}

/// One row of tag/macro usage: how many distinct hosts the name selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    /// Tag or macro name.
    pub name: String,
    /// Whether the row counts a tag or a macro.
    pub kind: NameKind,
    /// Number of distinct hosts selected by the name on its own.
    pub count: usize,
}

impl Directory {
    /// All hosts in declaration order.
    #[must_use]
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Tag and macro names in first-seen parse order, deduplicated.
    ///
    /// A tag whose hosts were all redeclared without it no longer selects
    /// anything and is dropped.
    #[must_use]
    pub fn tag_names(&self) -> Vec<&str> {
        self.name_order
            .iter()
            .filter(|name| {
                self.tag_index.contains_key(*name) || self.macros.contains_key(*name)
            })
            .map(String::as_str)
            .collect()
    }

    /// Macros as `(name, expression)` pairs in declaration order.
    pub fn macros(&self) -> impl Iterator<Item = (&str, &str)> {
        self.macro_order
            .iter()
            .map(|name| (name.as_str(), self.macros[name].as_str()))
    }

    /// Usage counts for tags and macros, in first-seen order.
    ///
    /// A name that is both a tag and a macro yields one row per kind, macro
    /// first (matching lookup precedence). With filter patterns given, a row
    /// is kept if its name matches at least one; no patterns keeps all. No
    /// matching rows is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid filter pattern or a cyclic macro;
    /// a broken macro never shows up as a made-up count.
    pub fn usage(&self, patterns: &[String]) -> Result<Vec<Usage>, EvalError> {
        let filters = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| EvalError::BadPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::new();
        for name in &self.name_order {
            if !filters.is_empty() && !filters.iter().any(|re| re.is_match(name)) {
                continue;
            }
            if let Some(expr) = self.macros.get(name) {
                let mut expanding = vec![name.clone()];
                let count = self.eval_expr(expr, &mut expanding)?.len();
                rows.push(Usage {
                    name: name.clone(),
                    kind: NameKind::Macro,
                    count,
                });
            }
            if let Some(indices) = self.tag_index.get(name) {
                rows.push(Usage {
                    name: name.clone(),
                    kind: NameKind::Tag,
                    count: indices.len(),
                });
            }
        }
        Ok(rows)
    }
}
