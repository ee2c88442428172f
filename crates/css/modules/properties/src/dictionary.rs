//! Property id to record mapping with override-by-overwrite merging.

use crate::id::PropertyId;
use crate::property::{Property, PropertySource};
use rustc_hash::FxHashMap;
use std::collections::hash_map::{Iter, IterMut};
use std::sync::Arc;

/// Backing map of a [`PropertyDictionary`].
pub type PropertyMap = FxHashMap<PropertyId, Property>;

/// An unordered set of property records, at most one per id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDictionary {
    properties: PropertyMap,
}

impl PropertyDictionary {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting any existing record with the same id.
    #[inline]
    pub fn set_property(&mut self, id: PropertyId, property: Property) {
        self.properties.insert(id, property);
    }

    /// Remove a property. Does nothing if it is absent.
    #[inline]
    pub fn remove_property(&mut self, id: PropertyId) {
        self.properties.remove(&id);
    }

    #[inline]
    pub fn get_property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id)
    }

    #[inline]
    pub fn num_properties(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, PropertyId, Property> {
        self.properties.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, PropertyId, Property> {
        self.properties.iter_mut()
    }

    /// Merge `other` into this dictionary.
    ///
    /// Every record in `other` overwrites the record with the same id here; ids
    /// only present here are left alone. `other` is not modified.
    pub fn merge(&mut self, other: &Self) {
        self.properties.reserve(other.properties.len());
        for (id, property) in &other.properties {
            self.properties.insert(*id, property.clone());
        }
    }

    /// Stamp `source` onto every record currently in the dictionary.
    pub fn set_source_of_all_properties(&mut self, source: &Arc<PropertySource>) {
        for property in self.properties.values_mut() {
            property.source = Some(Arc::clone(source));
        }
    }
}

impl<'dict> IntoIterator for &'dict PropertyDictionary {
    type Item = (&'dict PropertyId, &'dict Property);
    type IntoIter = Iter<'dict, PropertyId, Property>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(PropertyId, Property)> for PropertyDictionary {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (PropertyId, Property)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}
