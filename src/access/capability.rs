use std::collections::BTreeMap;

/// One entry of a [`CapabilitySet`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilityEntry {
    pub name: String,
    pub granted: bool,
}

/// Ordered list of primitive capabilities a meta capability check resolved to.
///
/// Insertion order is preserved and the same name may appear more than once,
/// as it can in the host's own lists. Lookups are exact string matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(Vec<CapabilityEntry>);

impl CapabilitySet {
    pub fn new() -> Self {
        CapabilitySet(Vec::new())
    }

    /// Appends a granted entry. Existing entries with the same name are kept.
    pub fn push(&mut self, name: impl Into<String>) {
        self.push_entry(name, true);
    }

    pub fn push_entry(&mut self, name: impl Into<String>, granted: bool) {
        self.0.push(CapabilityEntry { name: name.into(), granted });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|e| e.name == name)
    }

    /// Value of the first entry named `name`.
    pub fn granted(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|e| e.name == name).map(|e| e.granted)
    }

    /// Number of entries named `name`.
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|e| e.name == name).count()
    }

    /// Removes every entry named `name`, keeping the relative order of the
    /// rest. Returns how many were removed.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|e| e.name != name);
        before - self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[CapabilityEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().map(|name| CapabilityEntry { name: name.into(), granted: true }).collect())
    }
}

/// A user's full capability map, as consulted by the editor-group grant.
pub type AllCaps = BTreeMap<String, bool>;
