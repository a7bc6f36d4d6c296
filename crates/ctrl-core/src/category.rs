//! Category ids and the fixed category-name lookup table.
//!
//! Every record's `category` is a foreign key into a [`CategoryTable`]. A
//! dataset variant ships either five or six categories; the table is fixed
//! for the lifetime of a snapshot.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::enums::Language;
use crate::errors::CoreError;

/// Small positive integer identifying a category (1-based).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CategoryId(u8);

impl CategoryId {
    /// Build a category id, rejecting zero.
    pub fn new(id: u8) -> Result<Self, CoreError> {
        if id == 0 {
            return Err(CoreError::InvalidCategory(
                "category ids are 1-based; 0 is not allowed".to_string(),
            ));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().parse::<u8>().map_err(|_| CoreError::UnknownValue {
            field: "category".to_string(),
            value: s.to_string(),
        })?;
        Self::new(id)
    }
}

impl TryFrom<u64> for CategoryId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let id = u8::try_from(value).map_err(|_| {
            CoreError::InvalidCategory(format!("category id {value} is out of range"))
        })?;
        Self::new(id)
    }
}

/// A single entry of the category lookup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Ordered, duplicate-free category lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<Category>,
}

const EN_NAMES: [&str; 5] = [
    "Brand",
    "General Comparison",
    "By Competitor",
    "Commercial",
    "Transactional",
];

const ES_NAMES: [&str; 5] = [
    "Marca",
    "Comparación General",
    "Por Competidor",
    "Comercial",
    "Transaccional",
];

const ES_EXTENDED_NAMES: [&str; 6] = [
    "Marca",
    "Comparación General",
    "Por Competidor",
    "Comercial",
    "Transaccionales",
    "Transaccionales",
];

impl CategoryTable {
    /// Build a table from entries, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCategory`] if the table is empty or an id
    /// appears twice.
    pub fn new(mut entries: Vec<Category>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::InvalidCategory(
                "category table cannot be empty".to_string(),
            ));
        }
        entries.sort_by_key(|c| c.id);
        if let Some(pair) = entries.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CoreError::InvalidCategory(format!(
                "category id {} is defined twice",
                pair[0].id
            )));
        }
        Ok(Self { entries })
    }

    /// Build a table from a raw `id -> name` map (config shape).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCategory`] for a zero id or an empty map.
    pub fn from_map(map: &BTreeMap<u8, String>) -> Result<Self, CoreError> {
        let entries = map
            .iter()
            .map(|(id, name)| {
                Ok(Category {
                    id: CategoryId::new(*id)?,
                    name: name.clone(),
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Self::new(entries)
    }

    /// Default five-category table for a language.
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self::from_names(&EN_NAMES),
            Language::Es => Self::from_names(&ES_NAMES),
        }
    }

    /// Six-category variant used by the extended Spanish dataset.
    #[must_use]
    pub fn spanish_extended() -> Self {
        Self::from_names(&ES_EXTENDED_NAMES)
    }

    fn from_names(names: &[&str]) -> Self {
        let entries = (1u8..)
            .zip(names)
            .map(|(id, name)| Category {
                id: CategoryId(id),
                name: (*name).to_string(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.entries
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    #[must_use]
    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.entries.iter().map(|c| c.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn zero_id_is_rejected() {
        assert!(CategoryId::new(0).is_err());
        assert!(CategoryId::try_from(300u64).is_err());
        assert_eq!(CategoryId::try_from(3u64).unwrap().get(), 3);
        assert_eq!("4".parse::<CategoryId>().unwrap().get(), 4);
        assert!("four".parse::<CategoryId>().is_err());
        assert!("0".parse::<CategoryId>().is_err());
    }

    #[test]
    fn language_tables_have_five_entries() {
        let en = CategoryTable::for_language(Language::En);
        assert_eq!(en.len(), 5);
        assert_eq!(en.name(id(1)), Some("Brand"));
        assert_eq!(en.name(id(5)), Some("Transactional"));
        assert_eq!(en.name(id(6)), None);

        let es = CategoryTable::for_language(Language::Es);
        assert_eq!(es.name(id(2)), Some("Comparación General"));
    }

    #[test]
    fn extended_table_repeats_transactional_name() {
        let table = CategoryTable::spanish_extended();
        assert_eq!(table.len(), 6);
        assert_eq!(table.name(id(5)), table.name(id(6)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entries = vec![
            Category {
                id: id(1),
                name: "a".into(),
            },
            Category {
                id: id(1),
                name: "b".into(),
            },
        ];
        let err = CategoryTable::new(entries).unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn from_map_orders_by_id() {
        let map = BTreeMap::from([(3, "C".to_string()), (1, "A".to_string())]);
        let table = CategoryTable::from_map(&map).unwrap();
        let ids: Vec<u8> = table.ids().map(CategoryId::get).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!table.contains(id(2)));
    }

    #[test]
    fn from_map_rejects_zero_and_empty() {
        assert!(CategoryTable::from_map(&BTreeMap::from([(0, "x".to_string())])).is_err());
        assert!(CategoryTable::from_map(&BTreeMap::new()).is_err());
    }
}
