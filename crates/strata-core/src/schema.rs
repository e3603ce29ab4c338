mod embedded;
pub use embedded::Embedded;

mod join;
pub use join::Join;

mod junction;
pub use junction::Junction;

mod relationship;
pub use relationship::{Matches, Relationship, RelationshipKind};

use crate::{map::NoMap, Error, MapRef, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Collections, their field maps, and how they relate to each other.
///
/// A schema is immutable; the `with_*` builders return a modified copy.
#[derive(Debug, Clone)]
pub struct Schema {
    default_map: MapRef,
    maps: IndexMap<String, MapRef>,
    relationships: IndexMap<String, Vec<Relationship>>,
    embedded: IndexMap<String, Vec<Embedded>>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            default_map: Arc::new(NoMap),
            maps: IndexMap::new(),
            relationships: IndexMap::new(),
            embedded: IndexMap::new(),
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map used for collections without one of their own.
    pub fn with_default_map(self, map: MapRef) -> Self {
        Self {
            default_map: map,
            ..self
        }
    }

    pub fn with_map(mut self, collection: impl Into<String>, map: MapRef) -> Self {
        self.maps.insert(collection.into(), map);
        self
    }

    /// Adds a relationship. It is recorded for both collections, so it can
    /// be found from either side.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        let reverse = relationship.swapped();

        for relationship in [relationship, reverse] {
            let list = self
                .relationships
                .entry(relationship.collection().to_string())
                .or_default();
            if !list.contains(&relationship) {
                list.push(relationship);
            }
        }

        self
    }

    pub fn with_one_to_one<I, K, V>(self, collection: &str, related: &str, matches: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let relationship = Relationship::new(RelationshipKind::OneToOne, collection, related, matches)?;
        Ok(self.with_relationship(relationship))
    }

    pub fn with_one_to_many<I, K, V>(self, collection: &str, related: &str, matches: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let relationship = Relationship::new(RelationshipKind::OneToMany, collection, related, matches)?;
        Ok(self.with_relationship(relationship))
    }

    pub fn with_many_to_one<I, K, V>(self, collection: &str, related: &str, matches: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let relationship = Relationship::new(RelationshipKind::ManyToOne, collection, related, matches)?;
        Ok(self.with_relationship(relationship))
    }

    /// `matches` joins the collection to the junction.
    pub fn with_many_to_many<I, K, V>(
        self,
        collection: &str,
        matches: I,
        junction: Junction,
        related: &str,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let relationship = Relationship::many_to_many(collection, matches, junction, related)?;
        Ok(self.with_relationship(relationship))
    }

    pub fn with_embedded(mut self, collection: impl Into<String>, embedded: Embedded) -> Self {
        self.embedded
            .entry(collection.into())
            .or_default()
            .push(embedded);
        self
    }

    /// The map of a collection, or the default map.
    pub fn map_of(&self, collection: &str) -> MapRef {
        self.maps
            .get(collection)
            .unwrap_or(&self.default_map)
            .clone()
    }

    pub fn relationships_of(&self, collection: &str) -> &[Relationship] {
        self.relationships
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn embedded_of(&self, collection: &str) -> &[Embedded] {
        self.embedded
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Finds the one relationship from `collection` to `related`.
    ///
    /// With `matches`, only relationships joining on exactly those fields
    /// are considered.
    pub fn relationship(
        &self,
        collection: &str,
        related: &str,
        matches: Option<&Matches>,
    ) -> Result<&Relationship> {
        let found: Vec<&Relationship> = self
            .relationships_of(collection)
            .iter()
            .filter(|relationship| relationship.related() == related)
            .filter(|relationship| matches.map_or(true, |m| relationship.matches() == m))
            .collect();

        let criteria = match matches {
            Some(matches) => format!(" matching {matches:?}"),
            None => String::new(),
        };

        match found.as_slice() {
            [relationship] => Ok(relationship),
            [] => Err(Error::lookup(format!(
                "no relationship found between `{collection}` and `{related}`{criteria}"
            ))),
            _ => Err(Error::lookup(format!(
                "multiple relationships found between `{collection}` and `{related}`{criteria}"
            ))),
        }
    }

    /// Finds the one relationship of `collection` that joins on `field` alone.
    pub fn relationship_for_field(&self, collection: &str, field: &str) -> Result<&Relationship> {
        let found: Vec<&Relationship> = self
            .relationships_of(collection)
            .iter()
            .filter(|relationship| {
                let mut keys = relationship.matches().keys();
                keys.next().is_some_and(|key| key == field) && keys.next().is_none()
            })
            .collect();

        match found.as_slice() {
            [relationship] => Ok(relationship),
            [] => Err(Error::lookup(format!(
                "no relationship found for field `{field}` of `{collection}`"
            ))),
            _ => Err(Error::lookup(format!(
                "multiple relationships found for field `{field}` of `{collection}`"
            ))),
        }
    }
}
