use super::{Map, MapRef, Mapped, NestedMap};
use crate::{Error, Opt, Result, Schema, Value};

use std::{collections::HashMap, sync::Arc};

/// The map of a schema collection, including the maps of embedded
/// sub-documents and of related items attached by lookups and hydrates.
#[derive(Debug, Clone)]
pub struct SchemaMap {
    collection: String,
    schema: Arc<Schema>,
    map: NestedMap,
}

impl SchemaMap {
    pub fn new(collection: impl Into<String>, schema: Arc<Schema>) -> Self {
        let collection = collection.into();
        let map = collection_map(&schema, &collection, &mut vec![]);

        Self {
            collection,
            schema,
            map,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

impl Map for SchemaMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        self.map.apply_to_field(field)
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        self.map.apply_to_pair(field, value)
    }

    fn apply(&self, item: &Value) -> Value {
        self.map.apply(item)
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        self.map.apply_inverse(item)
    }

    fn with_opts(&self, opts: &[Opt]) -> Result<Option<MapRef>> {
        if !opts.iter().any(Opt::is_relation) {
            return Ok(None);
        }

        let map = nest(&self.schema, &self.collection, self.map.clone(), opts)?;

        Ok(Some(Arc::new(SchemaMap {
            collection: self.collection.clone(),
            schema: self.schema.clone(),
            map,
        })))
    }
}

/// The map of `collection` with its embedded sub-documents nested in.
fn collection_map(schema: &Schema, collection: &str, seen: &mut Vec<String>) -> NestedMap {
    let mut map = NestedMap::new(schema.map_of(collection));

    seen.push(collection.to_string());
    for embedded in schema.embedded_of(collection) {
        // Self-embedding documents only map the outermost level
        if seen.iter().any(|c| c == embedded.collection()) {
            continue;
        }
        let child = collection_map(schema, embedded.collection(), seen);
        map = map.with_mapped_field(&embedded.map_field(), Arc::new(child));
    }
    seen.pop();

    map
}

/// Nests the maps of related collections at the paths the options attach them.
fn nest(schema: &Schema, collection: &str, mut map: NestedMap, opts: &[Opt]) -> Result<NestedMap> {
    // path of an attached item -> its collection
    let mut collections = HashMap::from([(String::new(), collection.to_string())]);

    for opt in opts {
        let (Some(kind), Some(field)) = (opt.relation_kind(), opt.relation_field()) else {
            continue;
        };

        if matches!(opt, Opt::Lookup(lookup) if lookup.is_count()) {
            continue;
        }

        let target = opt.relation_target().unwrap_or_default();
        let Some(parent) = collections.get(target).cloned() else {
            return Err(Error::lookup(format!(
                "{kind} `{field}` is for `{target}`, which no lookup or hydrate attaches"
            )));
        };

        let (related, many) = resolve(schema, &parent, opt)
            .map_err(|err| err.context(crate::err!("resolving {kind} `{field}`")))?;

        tracing::trace!(%parent, %related, %field, attach_to = target, many, "nesting related collection map");

        let child = nest(
            schema,
            &related,
            collection_map(schema, &related, &mut vec![]),
            opt.relation_opts().unwrap_or_default(),
        )?;

        let path = match target {
            "" => field.to_string(),
            target => format!("{target}.{field}"),
        };
        let key = if many { format!("{path}[]") } else { path.clone() };

        map = map.with_mapped_field(&key, Arc::new(child));
        collections.insert(path, related);
    }

    Ok(map)
}

/// The related collection of a lookup or hydrate, and whether it attaches many items.
fn resolve(schema: &Schema, parent: &str, opt: &Opt) -> Result<(String, bool)> {
    match opt {
        Opt::Lookup(lookup) => {
            let relationship = schema.relationship(parent, lookup.related(), None)?;
            Ok((
                relationship.related().to_string(),
                relationship.kind().is_to_many(),
            ))
        }
        Opt::Hydrate(hydrate) => {
            let relationship = schema.relationship_for_field(parent, hydrate.field())?;
            Ok((relationship.related().to_string(), false))
        }
        _ => Err(crate::err!("{opt:?} does not attach related items")),
    }
}
