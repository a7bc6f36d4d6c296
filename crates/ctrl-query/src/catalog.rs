//! Named collection of independent snapshots.
//!
//! Each market (or client) gets its own [`QueryEngine`]. Engines share
//! nothing, so loading one never affects another.

use std::collections::BTreeMap;

use crate::engine::QueryEngine;

#[derive(Debug, Default)]
pub struct Catalog {
    engines: BTreeMap<String, QueryEngine>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snapshot, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, engine: QueryEngine) -> Option<QueryEngine> {
        self.engines.insert(name.into(), engine)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryEngine> {
        self.engines.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryEngine)> {
        self.engines.iter().map(|(name, engine)| (name.as_str(), engine))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
