use super::{Join, Junction};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::{fmt, str::FromStr};

/// Pairs of fields that must be equal for two items to be related.
pub type Matches = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipKind {
    /// The kind seen from the related collection.
    pub fn swapped(self) -> Self {
        match self {
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            other => other,
        }
    }

    /// Returns `true` when an item has any number of related items.
    pub fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "one-to-one" => Ok(Self::OneToOne),
            "one-to-many" => Ok(Self::OneToMany),
            "many-to-one" => Ok(Self::ManyToOne),
            "many-to-many" => Ok(Self::ManyToMany),
            _ => Err(Error::invalid_schema(format!(
                "unknown relationship type `{s}`"
            ))),
        }
    }
}

/// How items of `collection` relate to items of `related`.
///
/// For many-to-many relationships `matches` joins the collection to the
/// junction, and the junction holds the matches to the related collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    kind: RelationshipKind,
    collection: String,
    related: String,
    matches: Matches,
    junction: Option<Junction>,
}

impl Relationship {
    pub fn new<I, K, V>(
        kind: RelationshipKind,
        collection: impl Into<String>,
        related: impl Into<String>,
        matches: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::build(kind, collection.into(), related.into(), collect(matches), None)
    }

    /// A many-to-many relationship through `junction`, joining the collection
    /// to the junction on `matches`.
    pub fn many_to_many<I, K, V>(
        collection: impl Into<String>,
        matches: I,
        junction: Junction,
        related: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::build(
            RelationshipKind::ManyToMany,
            collection.into(),
            related.into(),
            collect(matches),
            Some(junction),
        )
    }

    fn build(
        kind: RelationshipKind,
        collection: String,
        related: String,
        matches: Matches,
        junction: Option<Junction>,
    ) -> Result<Self> {
        if matches.is_empty() {
            return Err(Error::invalid_schema(format!(
                "relationship between `{collection}` and `{related}` has no matching fields"
            )));
        }

        match (kind, &junction) {
            (RelationshipKind::ManyToMany, None) => {
                return Err(Error::invalid_schema(format!(
                    "many-to-many relationship between `{collection}` and `{related}` needs a junction"
                )))
            }
            (RelationshipKind::ManyToMany, Some(junction)) if junction.related_matches().is_empty() => {
                return Err(Error::invalid_schema(format!(
                    "junction `{}` has no matching fields for `{related}`",
                    junction.collection()
                )))
            }
            (kind, Some(junction)) if kind != RelationshipKind::ManyToMany => {
                return Err(Error::invalid_schema(format!(
                    "{kind} relationship between `{collection}` and `{related}` cannot use junction `{}`",
                    junction.collection()
                )))
            }
            _ => {}
        }

        Ok(Self {
            kind,
            collection,
            related,
            matches,
            junction,
        })
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn related(&self) -> &str {
        &self.related
    }

    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    pub fn junction(&self) -> Option<&Junction> {
        self.junction.as_ref()
    }

    /// The same relationship seen from the related collection.
    pub fn swapped(&self) -> Relationship {
        let (matches, junction) = match &self.junction {
            Some(junction) => (
                flip(junction.related_matches()),
                Some(junction.with_related_matches(flip(&self.matches))),
            ),
            None => (flip(&self.matches), None),
        };

        Relationship {
            kind: self.kind.swapped(),
            collection: self.related.clone(),
            related: self.collection.clone(),
            matches,
            junction,
        }
    }

    /// The joins that lead from the collection to the related collection.
    pub fn joins(&self) -> Vec<Join> {
        match &self.junction {
            Some(junction) => vec![
                Join {
                    from: self.collection.clone(),
                    to: junction.collection().to_string(),
                    on: self.matches.clone(),
                },
                Join {
                    from: junction.collection().to_string(),
                    to: self.related.clone(),
                    on: junction.related_matches().clone(),
                },
            ],
            None => vec![Join {
                from: self.collection.clone(),
                to: self.related.clone(),
                on: self.matches.clone(),
            }],
        }
    }
}

fn collect<I, K, V>(matches: I) -> Matches
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    matches
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn flip(matches: &Matches) -> Matches {
    matches
        .iter()
        .map(|(k, v)| (v.clone(), k.clone()))
        .collect()
}
