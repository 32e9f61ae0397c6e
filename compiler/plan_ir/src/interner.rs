//! Per-environment name interner.
//!
//! Every environment owns exactly one `NameTable`. Interning the same text
//! twice returns the same [`Name`], so member and tag comparisons downstream
//! are index comparisons.

use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The table ran out of 32-bit indices.
    #[error("name table exceeded capacity: {count} names, max is {}", u32::MAX)]
    Overflow { count: usize },
}

/// Name interner owned by a single environment.
///
/// Not shared across threads: the owning environment is single-writer, so the
/// table is plain data with no locking.
pub struct NameTable {
    /// Map from text to its handle.
    map: FxHashMap<Box<str>, Name>,
    /// Text for each handle, indexed by `Name::index`.
    strings: Vec<Box<str>>,
}

impl NameTable {
    /// Create a table holding only the empty string.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a table with room for `capacity` names before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut map = FxHashMap::default();
        map.reserve(capacity + 1);
        let mut strings = Vec::with_capacity(capacity + 1);
        map.insert(Box::from(""), Name::EMPTY);
        strings.push(Box::from(""));
        Self { map, strings }
    }

    /// Try to intern `s`, returning its canonical handle.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }

        let index = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let name = Name::new(index);
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), name);
        Ok(name)
    }

    /// Look up an already-interned name without interning.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Look up the text for a name.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this table.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Whether `name` is a handle this table could have produced.
    pub fn contains(&self, name: Name) -> bool {
        name.index() < self.strings.len()
    }

    /// Number of interned names, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True when only the empty string is present.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NameTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameTable")
            .field("len", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
