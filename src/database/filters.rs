// ABOUTME: Dynamic WHERE-clause builder for list endpoints with whitelisted filter keys
// ABOUTME: Emits positional placeholders and bind values; user input never enters SQL text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! # Query Filter Builder
//!
//! Extends a base query (which must already end in a satisfiable `WHERE` clause) with
//! one ` AND <predicate>` per present filter. Only keys listed in the entity's
//! [`FilterField`] whitelist are considered; anything else in the query string is
//! ignored. Values are returned as bind parameters, numbered `$N` contiguously from
//! the caller's start index so they can follow the caller's own parameters.
//!
//! The builder adds no ordering; callers append their own `ORDER BY`.

use std::collections::HashMap;
use std::fmt::Write as _;

/// Raw filter values as received in a query string
pub type FilterParams = HashMap<String, String>;

/// How a filter value is compared to its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring match against a case-folded column
    Contains,
    /// Case-sensitive equality
    Exact,
}

/// A whitelisted filter key and the column it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Query-string key
    pub key: &'static str,
    /// Column name (unqualified); for substring filters, the case-folded copy
    pub column: &'static str,
    /// Comparison applied
    pub mode: MatchMode,
}

impl FilterField {
    /// Substring filter
    #[must_use]
    pub const fn contains(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            mode: MatchMode::Contains,
        }
    }

    /// Equality filter
    #[must_use]
    pub const fn exact(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            mode: MatchMode::Exact,
        }
    }
}

/// Recognized exercise filters
pub const EXERCISE_FILTERS: &[FilterField] = &[
    FilterField::contains("name", "name_folded"),
    FilterField::exact("category", "category"),
    FilterField::exact("muscle_group", "muscle_group"),
    FilterField::exact("difficulty", "difficulty"),
];

/// Recognized workout filters
pub const WORKOUT_FILTERS: &[FilterField] = &[
    FilterField::contains("name", "name_folded"),
    FilterField::contains("description", "description_folded"),
];

/// Query text plus the values to bind, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredQuery {
    /// Extended SQL
    pub sql: String,
    /// Bind values for the placeholders this builder added
    pub values: Vec<String>,
    /// First placeholder index not used by this builder
    pub next_index: usize,
}

/// Builds filter clauses for one entity's whitelist
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder<'a> {
    fields: &'a [FilterField],
    alias: Option<&'a str>,
}

impl<'a> FilterBuilder<'a> {
    /// Builder over the given whitelist
    #[must_use]
    pub const fn new(fields: &'a [FilterField]) -> Self {
        Self {
            fields,
            alias: None,
        }
    }

    /// Qualify columns with a table alias (for joined queries)
    #[must_use]
    pub const fn with_alias(mut self, alias: &'a str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Extend `base` with one predicate per present filter
    ///
    /// Values that are empty after trimming count as absent and consume no placeholder.
    #[must_use]
    pub fn build(&self, base: &str, params: &FilterParams, start_index: usize) -> FilteredQuery {
        let mut sql = base.to_owned();
        let mut values = Vec::new();
        let mut index = start_index;

        for field in self.fields {
            let Some(raw) = params.get(field.key) else {
                continue;
            };
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }

            let column = self.qualified(field.column);
            // Writing into a String cannot fail
            let _ = match field.mode {
                MatchMode::Contains => {
                    values.push(format!("%{}%", escape_like(&fold_case(value))));
                    write!(sql, " AND {column} LIKE ${index} ESCAPE '\\'")
                }
                MatchMode::Exact => {
                    values.push(value.to_owned());
                    write!(sql, " AND {column} = ${index}")
                }
            };
            index += 1;
        }

        FilteredQuery {
            sql,
            values,
            next_index: index,
        }
    }

    fn qualified(&self, column: &str) -> String {
        self.alias
            .map_or_else(|| column.to_owned(), |alias| format!("{alias}.{column}"))
    }
}

/// Case-fold text for substring search
///
/// SQLite's `LOWER()` only folds ASCII, so searchable columns keep a copy folded here
/// at write time and filters compare folded text on both sides.
#[must_use]
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
