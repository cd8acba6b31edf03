use std::collections::HashMap;

/// Chromosome-name-to-length mapping loaded from a sizes table.
///
/// Loaded once, then read-only for the duration of the aggregation pass.
/// Defines the universe of valid seqids: any annotation record referencing
/// an id outside this set is rejected.
#[derive(Debug, Clone, Default)]
pub struct GenomeSizes {
    sizes: HashMap<String, u64>,
}

impl GenomeSizes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chromosome. A repeated id replaces the earlier length
    /// (last occurrence wins).
    pub fn insert(&mut self, name: impl Into<String>, length: u64) {
        self.sizes.insert(name.into(), length);
    }

    /// Length in base pairs for a chromosome, or `None` if unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.sizes.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sizes.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterate over (name, length) pairs. Order is unspecified; callers that
    /// need determinism sort downstream.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.sizes.iter().map(|(name, length)| (name.as_str(), *length))
    }
}

impl FromIterator<(String, u64)> for GenomeSizes {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}
