use indexmap::{IndexMap, IndexSet};

/// Ordered name→value registry with the distinct values in first-seen order.
///
/// Rebuilt on every full update. The distinct-value sequence gives ordinal
/// domains (legend order, measure indices) a deterministic insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: IndexMap<String, String>,
    distinct_values: IndexSet<String>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` unless it is already present. Returns `true` when inserted.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        let value = value.into();
        self.distinct_values.insert(value.clone());
        self.entries.insert(name, value);
        true
    }

    /// Value registered for `name`.
    ///
    /// # Panics
    ///
    /// Panics when `name` was never registered. Callers only look up names
    /// taken from the same update's rows, so a miss means the style keys and
    /// the data have diverged and no safe default exists.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        match self.entries.get(name) {
            Some(value) => value,
            None => panic!("dictionary lookup of unregistered name {name:?}"),
        }
    }

    #[must_use]
    pub fn try_value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Position of `name` in insertion order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn distinct_values(&self) -> Vec<&str> {
        self.distinct_values.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.distinct_values.clear();
    }

    /// Registers every name with its insertion index as value.
    #[must_use]
    pub fn indexed<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dictionary = Self::new();
        for name in names {
            let next = dictionary.len().to_string();
            dictionary.insert_if_absent(name, next);
        }
        dictionary
    }
}
