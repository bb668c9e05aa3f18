//! Ordered statement collection.
//!
//! [`StatementSet`] wraps an [`IndexSet`] so that every statement is kept at
//! most once while iteration follows first-insertion order. The compact
//! serializers rely on this order for grouping subjects, for the position of
//! anonymous root nodes and for usage-ordered prefix declarations, so output
//! is deterministic for a given insertion sequence.
//!
//! ## Examples
//!
//! ```rust
//! use rdf_text::{Iri, Statement, StatementSet};
//!
//! let s = Iri::new("http://example.org/s");
//! let p = Iri::new("http://example.org/p");
//!
//! let mut set = StatementSet::new();
//! assert!(set.insert(Statement::new(s.clone(), p.clone(), "one")));
//! assert!(set.insert(Statement::new(s.clone(), p.clone(), "two")));
//! // Duplicates collapse
//! assert!(!set.insert(Statement::new(s, p, "one")));
//!
//! assert_eq!(set.len(), 2);
//! ```

use crate::term::{Resource, Statement};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// An insertion-ordered set of unique statements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementSet(IndexSet<Statement>);

impl StatementSet {
    /// Creates an empty `StatementSet`.
    #[must_use]
    pub fn new() -> Self {
        StatementSet(IndexSet::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        StatementSet(IndexSet::with_capacity(capacity))
    }

    /// Adds a statement, returning `false` if it was already present.
    ///
    /// A duplicate keeps the position of its first insertion.
    pub fn insert(&mut self, statement: Statement) -> bool {
        self.0.insert(statement)
    }

    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.0.contains(statement)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the statements, in insertion order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, Statement> {
        self.0.iter()
    }

    /// Returns true if any statement carries a context.
    #[must_use]
    pub fn has_contexts(&self) -> bool {
        self.0.iter().any(|st| st.context.is_some())
    }

    /// Distinct contexts in order of first appearance; `None` is the default graph.
    pub fn contexts(&self) -> Vec<Option<&Resource>> {
        let mut seen: IndexSet<Option<&Resource>> = IndexSet::new();
        for st in &self.0 {
            seen.insert(st.context.as_ref());
        }
        seen.into_iter().collect()
    }
}

impl IntoIterator for StatementSet {
    type Item = Statement;
    type IntoIter = indexmap::set::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Statement;
    type IntoIter = indexmap::set::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Statement> for StatementSet {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        StatementSet(IndexSet::from_iter(iter))
    }
}

impl Extend<Statement> for StatementSet {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl From<Vec<Statement>> for StatementSet {
    fn from(statements: Vec<Statement>) -> Self {
        statements.into_iter().collect()
    }
}
