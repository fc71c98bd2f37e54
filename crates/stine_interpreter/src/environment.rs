use std::collections::HashMap;

/// Flat, global name table. There is no scoping: binding a name again replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    store: HashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.store.get(name).copied()
    }

    /// Bind `name`, overwriting any previous binding.
    pub fn define(&mut self, name: String, value: i64) {
        self.store.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
