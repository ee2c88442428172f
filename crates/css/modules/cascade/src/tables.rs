//! Named tables owned by a style sheet: keyframes, decorator specifications and
//! sprite sheets. Lookups are by exact name and return `None` when absent.

use css_properties::{PropertyDictionary, PropertyId, PropertySource};
use css_values::Decorator;
use log::warn;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// One `@keyframes` step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeBlock {
    /// Position within the animation, `0.0..=1.0`.
    pub normalized_time: f32,
    pub properties: PropertyDictionary,
}

/// A named `@keyframes` set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes {
    /// Every property animated by at least one block.
    pub property_ids: Vec<PropertyId>,
    /// Blocks sorted by `normalized_time`.
    pub blocks: Vec<KeyframeBlock>,
}

impl Keyframes {
    /// Build from blocks, sorting them and collecting the animated ids.
    pub fn from_blocks(mut blocks: Vec<KeyframeBlock>) -> Self {
        blocks.sort_by(|left, right| left.normalized_time.total_cmp(&right.normalized_time));
        let mut property_ids: Vec<PropertyId> = Vec::new();
        for block in &blocks {
            for (id, _) in &block.properties {
                if !property_ids.contains(id) {
                    property_ids.push(*id);
                }
            }
        }
        Self {
            property_ids,
            blocks,
        }
    }
}

pub type KeyframesMap = FxHashMap<String, Keyframes>;

/// A named `@decorator` declaration with its already-instanced decorator.
#[derive(Clone, Debug)]
pub struct DecoratorSpecification {
    pub decorator_type: String,
    pub properties: PropertyDictionary,
    pub decorator: Arc<dyn Decorator>,
}

pub type DecoratorSpecificationMap = FxHashMap<String, DecoratorSpecification>;

/// Texture-space rectangle of a sprite, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One `@spritesheet` block. Its sprites live in the owning
/// [`SpritesheetList`]; see [`SpritesheetList::sprite_names`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spritesheet {
    pub name: String,
    pub image_source: String,
    pub definition_source: Option<Arc<PropertySource>>,
    /// Pixel ratio the sheet was authored at.
    pub display_scale: f32,
}

/// A sprite: a rectangle inside a shared sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rectangle: Rectangle,
    pub sprite_sheet: Arc<Spritesheet>,
}

/// All sprite sheets of a style sheet plus a flat sprite-name table.
#[derive(Clone, Debug, Default)]
pub struct SpritesheetList {
    spritesheets: FxHashMap<String, Arc<Spritesheet>>,
    sprites: FxHashMap<String, Sprite>,
}

impl SpritesheetList {
    /// Add a sheet and its sprites. A sheet with the same name is replaced along
    /// with its sprites; a sprite name already owned by another sheet is logged
    /// and taken over by this one for good.
    pub fn add_spritesheet(
        &mut self,
        name: &str,
        image_source: &str,
        definition_source: Option<Arc<PropertySource>>,
        display_scale: f32,
        sprite_definitions: Vec<(String, Rectangle)>,
    ) {
        let sheet = Arc::new(Spritesheet {
            name: name.to_owned(),
            image_source: image_source.to_owned(),
            definition_source,
            display_scale,
        });
        self.insert_sheet(sheet, sprite_definitions);
    }

    fn insert_sheet(&mut self, sheet: Arc<Spritesheet>, sprite_definitions: Vec<(String, Rectangle)>) {
        if let Some(previous) = self.spritesheets.remove(&sheet.name) {
            self.sprites
                .retain(|_, sprite| !Arc::ptr_eq(&sprite.sprite_sheet, &previous));
        }
        for (sprite_name, rectangle) in sprite_definitions {
            let sprite = Sprite {
                rectangle,
                sprite_sheet: Arc::clone(&sheet),
            };
            if let Some(replaced) = self.sprites.insert(sprite_name, sprite) {
                warn!(
                    "sprite redefined by sheet '{}', previously in sheet '{}'",
                    sheet.name, replaced.sprite_sheet.name
                );
            }
        }
        self.spritesheets.insert(sheet.name.clone(), sheet);
    }

    /// Merge `other` in, with `other` winning on name collisions.
    pub fn merge(&mut self, other: &Self) {
        for sheet in other.spritesheets.values() {
            let sprite_definitions = other
                .sprites
                .iter()
                .filter(|(_, sprite)| Arc::ptr_eq(&sprite.sprite_sheet, sheet))
                .map(|(sprite_name, sprite)| (sprite_name.clone(), sprite.rectangle))
                .collect();
            self.insert_sheet(Arc::clone(sheet), sprite_definitions);
        }
    }

    #[inline]
    pub fn get_sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// Sprites currently served by the sheet called `sheet_name`, sorted. Names
    /// a later sheet took over are not included.
    pub fn sprite_names(&self, sheet_name: &str) -> Vec<&str> {
        let Some(sheet) = self.spritesheets.get(sheet_name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .sprites
            .iter()
            .filter(|(_, sprite)| Arc::ptr_eq(&sprite.sprite_sheet, sheet))
            .map(|(sprite_name, _)| sprite_name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    #[inline]
    pub fn get_spritesheet(&self, name: &str) -> Option<&Arc<Spritesheet>> {
        self.spritesheets.get(name)
    }

    #[inline]
    pub fn num_spritesheets(&self) -> usize {
        self.spritesheets.len()
    }

    #[inline]
    pub fn num_sprites(&self) -> usize {
        self.sprites.len()
    }
}
