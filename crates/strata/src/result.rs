use strata_core::{Record, Result, Value};

use std::{
    cell::{Cell, OnceCell},
    fmt,
};

type MetaFn = Box<dyn FnOnce() -> Result<Record> + Send>;

/// The items returned by a gateway, with metadata such as the total count.
///
/// Items are produced lazily. Metadata may be computed lazily too; it is
/// evaluated at most once, the first time it is asked for.
pub struct QueryResult<T = Value> {
    items: Box<dyn Iterator<Item = Result<T>> + Send>,
    meta: Meta,
}

struct Meta {
    value: OnceCell<Result<Record>>,
    pending: Cell<Option<MetaFn>>,
}

impl Meta {
    fn ready(meta: Record) -> Self {
        Self {
            value: OnceCell::from(Ok(meta)),
            pending: Cell::new(None),
        }
    }

    fn deferred(f: MetaFn) -> Self {
        Self {
            value: OnceCell::new(),
            pending: Cell::new(Some(f)),
        }
    }

    fn get(&self) -> &Result<Record> {
        self.value.get_or_init(|| match self.pending.take() {
            Some(f) => f(),
            None => Ok(Record::new()),
        })
    }
}

impl<T: Send + 'static> QueryResult<T> {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_results(items.into_iter().map(Ok))
    }

    pub fn from_results<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<T>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            items: Box::new(items.into_iter()),
            meta: Meta::ready(Record::new()),
        }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self::new(items)
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn with_meta(self, meta: Record) -> Self {
        Self {
            meta: Meta::ready(meta),
            ..self
        }
    }

    /// Computes the metadata on first access.
    pub fn with_lazy_meta<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Result<Record> + Send + 'static,
    {
        Self {
            meta: Meta::deferred(Box::new(f)),
            ..self
        }
    }

    pub fn meta(&self) -> Result<&Record> {
        self.meta.get().as_ref().map_err(Clone::clone)
    }

    /// The `count` metadata entry, when present.
    pub fn total(&self) -> Result<Option<i64>> {
        Ok(self.meta()?.get("count").and_then(Value::as_i64))
    }

    /// Lazily maps each item. Metadata is kept.
    pub fn map<U, F>(self, mut f: F) -> QueryResult<U>
    where
        F: FnMut(T) -> U + Send + 'static,
    {
        QueryResult {
            items: Box::new(self.items.map(move |item| item.map(&mut f))),
            meta: self.meta,
        }
    }

    /// Lazily maps each item with a fallible function.
    pub fn try_map<U, F>(self, mut f: F) -> QueryResult<U>
    where
        F: FnMut(T) -> Result<U> + Send + 'static,
    {
        QueryResult {
            items: Box::new(self.items.map(move |item| item.and_then(&mut f))),
            meta: self.meta,
        }
    }

    /// Lazily keeps the items matching `predicate`. Errors are kept.
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        Self {
            items: Box::new(self.items.filter(move |item| match item {
                Ok(item) => predicate(item),
                Err(_) => true,
            })),
            meta: self.meta,
        }
    }

    pub fn into_vec(self) -> Result<Vec<T>> {
        self.items.collect()
    }

    pub fn first(mut self) -> Result<Option<T>> {
        self.items.next().transpose()
    }
}

impl<T> Iterator for QueryResult<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        self.items.next()
    }
}

impl<T> fmt::Debug for QueryResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("meta", &self.meta.value.get())
            .finish_non_exhaustive()
    }
}
