//! Conjunctive field queries over the record cache.
//!
//! A [`Query`] holds `(field, value)` predicates applied left to right, each
//! narrowing the set left by the previous one. Comparison is
//! case-insensitive, either on the whole value or as a substring. Every
//! query is a linear scan; there are no indexes.

use crate::error::{Error, Result};
use crate::record::{Entity, RecordKind};
use crate::store::cache::Row;

/// How a predicate value is compared with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The whole field must equal the value.
    #[default]
    Exact,
    /// The field must equal or contain the value.
    Partial,
}

/// A multi-predicate record query.
///
/// # Examples
///
/// ```
/// use innkeep::store::{MatchMode, Query};
///
/// let query = Query::new()
///     .filter("roomType", "VIP")
///     .filter("status", "VACANT");
/// assert_eq!(query.mode(), MatchMode::Exact);
/// assert_eq!(query.predicates().len(), 2);
///
/// let search = Query::by("name", "tan").partial();
/// assert_eq!(search.mode(), MatchMode::Partial);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    mode: MatchMode,
    limit: Option<usize>,
    predicates: Vec<(String, String)>,
}

impl Query {
    /// An exact-match query with no predicates; it selects every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An exact-match query with a single predicate.
    #[must_use]
    pub fn by(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().filter(field, value)
    }

    /// Adds a predicate.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    /// Switches to substring matching.
    #[must_use]
    pub fn partial(mut self) -> Self {
        self.mode = MatchMode::Partial;
        self
    }

    /// Sets the early-exit limit.
    ///
    /// The limit is compared with the size of the set a predicate pass
    /// starts from, not with the number of matches found: when the two are
    /// equal the pass stops after its first record. It therefore does not
    /// truncate results to `n` in general.
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The comparison mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The early-exit limit, if set.
    #[must_use]
    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    /// The predicates, in evaluation order.
    #[must_use]
    pub fn predicates(&self) -> &[(String, String)] {
        &self.predicates
    }

    /// Checks every predicate names a field of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for the first undeclared field.
    pub fn check_fields(&self, kind: RecordKind) -> Result<()> {
        let descriptor = kind.descriptor();
        match self
            .predicates
            .iter()
            .find(|(field, _)| !descriptor.has_field(field))
        {
            Some((field, _)) => Err(Error::UnknownField {
                kind,
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Selects the rows matching every predicate, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if a predicate names an undeclared
    /// field.
    pub fn select<'r, T: Entity>(&self, rows: &'r [Row<T>]) -> Result<Vec<&'r Row<T>>> {
        self.check_fields(T::KIND)?;

        let mut current: Vec<&Row<T>> = rows.iter().collect();
        for (field, value) in &self.predicates {
            let needle = value.to_lowercase();
            let stop_after_first = self.limit == Some(current.len());

            let mut narrowed = Vec::new();
            for row in &current {
                let haystack = row
                    .value
                    .to_fields()
                    .get(field)
                    .map(|text| text.to_lowercase())
                    .unwrap_or_default();
                if self.matches(&haystack, &needle) {
                    narrowed.push(*row);
                }
                if stop_after_first {
                    break;
                }
            }
            current = narrowed;
        }

        Ok(current)
    }

    fn matches(&self, haystack: &str, needle: &str) -> bool {
        haystack == needle || (self.mode == MatchMode::Partial && haystack.contains(needle))
    }
}
