use super::Opt;
use crate::Filter;

/// Attach items of a related collection to each result item.
///
/// By default the items are stored under the related collection's name.
/// A lookup with a target is meant for an item attached by another lookup
/// or hydrate and is nested under it before the query runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOption {
    related: String,
    field: String,
    target: Option<String>,
    filter: Filter,
    opts: Vec<Opt>,
    count: bool,
}

impl LookupOption {
    pub fn new(related: impl Into<String>) -> Self {
        let related = related.into();
        Self {
            field: related.clone(),
            related,
            target: None,
            filter: Filter::default(),
            opts: vec![],
            count: false,
        }
    }

    /// Store the looked up items under `field` instead.
    pub fn as_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    /// Nest under the item attached at `target`.
    pub fn for_target(self, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..self
        }
    }

    /// Only attach related items matching `filter`.
    pub fn having(self, filter: impl Into<Filter>) -> Self {
        Self {
            filter: filter.into(),
            ..self
        }
    }

    /// Options applied when querying the related collection.
    pub fn with<I, O>(mut self, opts: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Opt>,
    {
        self.opts.extend(opts.into_iter().map(Into::into));
        self
    }

    /// Attach the number of related items instead of the items.
    pub fn count(self) -> Self {
        Self {
            count: true,
            ..self
        }
    }

    pub fn related(&self) -> &str {
        &self.related
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn opts(&self) -> &[Opt] {
        &self.opts
    }

    pub fn is_count(&self) -> bool {
        self.count
    }
}

/// Replace a foreign key field by the item it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrateOption {
    field: String,
    target: Option<String>,
    opts: Vec<Opt>,
}

impl HydrateOption {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target: None,
            opts: vec![],
        }
    }

    /// Nest under the item attached at `target`.
    pub fn for_target(self, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..self
        }
    }

    pub fn with<I, O>(mut self, opts: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Opt>,
    {
        self.opts.extend(opts.into_iter().map(Into::into));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn opts(&self) -> &[Opt] {
        &self.opts
    }
}

/// Accessors shared by lookups and hydrates, the options that attach
/// related items.
impl Opt {
    pub fn is_relation(&self) -> bool {
        matches!(self, Opt::Lookup(_) | Opt::Hydrate(_))
    }

    /// `"lookup"` or `"hydrate"`, for messages.
    pub fn relation_kind(&self) -> Option<&'static str> {
        match self {
            Opt::Lookup(_) => Some("lookup"),
            Opt::Hydrate(_) => Some("hydrate"),
            _ => None,
        }
    }

    pub fn relation_field(&self) -> Option<&str> {
        match self {
            Opt::Lookup(lookup) => Some(&lookup.field),
            Opt::Hydrate(hydrate) => Some(&hydrate.field),
            _ => None,
        }
    }

    pub fn relation_target(&self) -> Option<&str> {
        match self {
            Opt::Lookup(lookup) => lookup.target(),
            Opt::Hydrate(hydrate) => hydrate.target(),
            _ => None,
        }
    }

    /// The full path the related item is attached at: target and field.
    pub fn relation_path(&self) -> Option<String> {
        let field = self.relation_field()?;
        Some(match self.relation_target() {
            Some(target) => format!("{target}.{field}"),
            None => field.to_string(),
        })
    }

    pub fn relation_opts(&self) -> Option<&[Opt]> {
        match self {
            Opt::Lookup(lookup) => Some(&lookup.opts),
            Opt::Hydrate(hydrate) => Some(&hydrate.opts),
            _ => None,
        }
    }

    pub fn relation_opts_mut(&mut self) -> Option<&mut Vec<Opt>> {
        match self {
            Opt::Lookup(lookup) => Some(&mut lookup.opts),
            Opt::Hydrate(hydrate) => Some(&mut hydrate.opts),
            _ => None,
        }
    }

    /// Sets or clears the target of a lookup or hydrate. Other options are unchanged.
    pub fn set_relation_target(&mut self, target: Option<String>) {
        match self {
            Opt::Lookup(lookup) => lookup.target = target,
            Opt::Hydrate(hydrate) => hydrate.target = target,
            _ => {}
        }
    }
}
