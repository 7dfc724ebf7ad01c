use std::collections::{HashMap, hash_map};

/// Variable bindings visible to a formula.
///
/// Blocks never share a scope: every block works on its own copy and hands a
/// copy on to the next block.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope<V> {
    bindings: HashMap<String, V>,
}

impl<V> Default for Scope<V> {
    fn default() -> Self {
        Self { bindings: HashMap::new() }
    }
}

impl<V> Scope<V> {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.bindings.get(name)
    }

    /// Binds `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: V) {
        self.bindings.insert(name.into(), value);
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Removes a binding, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.bindings.remove(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterates over all bindings in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, V> {
        self.bindings.iter()
    }
}

impl<V> FromIterator<(String, V)> for Scope<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        Self { bindings: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_independent() {
        let mut original = Scope::new();
        original.set("x", 1);

        let mut copy = original.clone();
        copy.set("x", 2);
        copy.set("y", 3);

        assert_eq!(original.get("x"), Some(&1));
        assert!(!original.contains("y"));
        assert_eq!(copy.names(), vec!["x", "y"]);
    }
}
