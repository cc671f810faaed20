//! Storage-name to declared-name mapping.

/// Maps column (storage) names to the declared member names they came from.
///
/// Only members whose storage name differs from their declared name appear
/// here: key-role members not named after their role, and renamed regular
/// properties. Entries keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    entries: Vec<(String, &'static str)>,
}

impl RenameTable {
    /// Adds an entry. Returns false, leaving the table unchanged, if the
    /// storage name is already present.
    pub(crate) fn insert(&mut self, storage: String, declared: &'static str) -> bool {
        if self.contains(&storage) {
            return false;
        }
        self.entries.push((storage, declared));
        true
    }

    /// Declared member name for a storage name.
    #[must_use]
    pub fn declared_name(&self, storage: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| name == storage)
            .map(|(_, declared)| *declared)
    }

    /// Storage name for a declared member name.
    #[must_use]
    pub fn storage_name(&self, declared: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, name)| *name == declared)
            .map(|(storage, _)| storage.as_str())
    }

    #[must_use]
    pub fn contains(&self, storage: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == storage)
    }

    /// Iterates `(storage, declared)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(storage, declared)| (storage.as_str(), *declared))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
