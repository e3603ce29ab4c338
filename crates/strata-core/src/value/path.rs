use super::{Record, Value};

impl Value {
    /// Returns the value at a dotted path such as `author.address.city`.
    ///
    /// Numeric segments index into lists.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |value, segment| value.entry(segment))
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.get_path(path).is_some()
    }

    /// Sets the value at a dotted path, creating intermediate records.
    ///
    /// Any scalar found along the way is replaced by a record.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let mut current = self;
        for segment in path.split('.') {
            current = current.entry_or_insert(segment);
        }
        *current = value;
    }

    /// Removes and returns the value at a dotted path.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        if !self.contains_path(path) {
            return None;
        }

        let (parent, last) = match path.rsplit_once('.') {
            Some((parent, last)) => (parent.split('.').try_fold(self, Value::entry_mut)?, last),
            None => (self, path),
        };

        match parent {
            Value::Record(record) => record.remove(last),
            Value::List(items) => list_index(last, items.len()).map(|index| items.remove(index)),
            _ => None,
        }
    }

    fn entry(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(segment),
            Value::List(items) => list_index(segment, items.len()).map(|index| &items[index]),
            _ => None,
        }
    }

    fn entry_mut(&mut self, segment: &str) -> Option<&mut Value> {
        match self {
            Value::Record(record) => record.get_mut(segment),
            Value::List(items) => list_index(segment, items.len()).map(|index| &mut items[index]),
            _ => None,
        }
    }

    fn entry_or_insert(&mut self, segment: &str) -> &mut Value {
        let index = match self {
            Value::List(items) => list_index(segment, items.len()),
            _ => None,
        };

        if index.is_none() && !self.is_record() {
            *self = Value::Record(Record::new());
        }

        match (self, index) {
            (Value::List(items), Some(index)) => &mut items[index],
            (Value::Record(record), _) => record.entry(segment),
            _ => unreachable!("segment container was created above"),
        }
    }
}

fn list_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse().ok().filter(|index| *index < len)
}
