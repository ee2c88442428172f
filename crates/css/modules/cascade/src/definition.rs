//! Compiled element definitions and their cache.

use css_properties::{Property, PropertyDictionary, PropertyId};
use indextree::NodeId;
use log::trace;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// Ordered, identity-based key: the matched rule nodes in merge order.
pub type DefinitionKey = SmallVec<NodeId, 8>;

/// The merged properties of one matched rule-node set. Immutable once built.
#[derive(Debug, Default, PartialEq)]
pub struct ElementDefinition {
    properties: PropertyDictionary,
}

impl ElementDefinition {
    #[inline]
    pub const fn new(properties: PropertyDictionary) -> Self {
        Self { properties }
    }

    #[inline]
    pub fn get_property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get_property(id)
    }

    #[inline]
    pub const fn properties(&self) -> &PropertyDictionary {
        &self.properties
    }

    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> {
        self.properties.iter().map(|(id, _)| *id)
    }
}

/// Shared definitions keyed by the exact matched node sequence.
///
/// Queries run through `&self`, so the map sits behind a lock held across the
/// whole lookup-or-insert sequence.
#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: Mutex<FxHashMap<DefinitionKey, Arc<ElementDefinition>>>,
}

impl DefinitionCache {
    /// Return the definition for `key`, compiling it with `build` on a miss.
    pub fn get_or_insert_with<F>(&self, key: DefinitionKey, build: F) -> Arc<ElementDefinition>
    where
        F: FnOnce(&[NodeId]) -> ElementDefinition,
    {
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(&key) {
            trace!("definition cache hit for {} nodes", key.len());
            return Arc::clone(hit);
        }
        trace!("definition cache miss for {} nodes", key.len());
        let definition = Arc::new(build(&key));
        entries.insert(key, Arc::clone(&definition));
        definition
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry. Definitions held elsewhere stay alive.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.get_mut().clear();
    }
}
