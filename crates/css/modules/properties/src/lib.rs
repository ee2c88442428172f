//! Property records and dictionaries.
//!
//! A [`PropertyDictionary`] maps interned [`PropertyId`]s to [`Property`] records.
//! Merging one dictionary into another is the cascade's override primitive:
//! callers merge less specific dictionaries first and the most specific last.

#![forbid(unsafe_code)]

mod dictionary;
mod id;
mod property;

pub use dictionary::{PropertyDictionary, PropertyMap};
pub use id::{PropertyId, names};
pub use property::{Property, PropertySource, Unit};
