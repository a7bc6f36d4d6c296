//! Search filter types.

use std::fmt;
use std::str::FromStr;

use ctrl_core::category::CategoryId;
use ctrl_core::enums::Classification;

/// A single filter dimension: either unconstrained or pinned to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    /// Whether `value` passes this filter.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Parses `ALL` (any case) as [`Filter::All`], anything else via `T::from_str`.
impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Filters for [`QueryEngine::search`](crate::QueryEngine::search).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub classification: Filter<Classification>,
    pub category: Filter<CategoryId>,
}

impl SearchFilters {
    #[must_use]
    pub const fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Filter::Only(classification);
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Filter::Only(category);
        self
    }
}
