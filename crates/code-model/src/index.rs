use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Dense ordinal assignment for every analyzed code unit.
///
/// Ordinals follow the lexicographic order of the fully-qualified names and
/// never change once the index is built. All relation and similarity matrices
/// are addressed through this index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CodeUnitIndex {
    names: Vec<String>,
    ordinals: HashMap<String, usize>,
}

impl CodeUnitIndex {
    /// Build the index from any collection of names; duplicates collapse.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        let names: Vec<String> = sorted.into_iter().collect();
        let ordinals = names
            .iter()
            .enumerate()
            .map(|(ordinal, name)| (name.clone(), ordinal))
            .collect();
        Self { names, ordinals }
    }

    /// Ordinal of a unit, if it is part of the analysis
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.ordinals.get(name).copied()
    }

    /// Name behind an ordinal
    pub fn name(&self, ordinal: usize) -> Option<&str> {
        self.names.get(ordinal).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ordinals.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in ordinal order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(ordinal, name)` pairs in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(ordinal, name)| (ordinal, name.as_str()))
    }
}

impl From<Vec<String>> for CodeUnitIndex {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<CodeUnitIndex> for Vec<String> {
    fn from(index: CodeUnitIndex) -> Self {
        index.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ordinals_follow_name_order() {
        let index = CodeUnitIndex::from_names(["org.b.Zeta", "org.a.Alpha", "org.b.Beta"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.ordinal("org.a.Alpha"), Some(0));
        assert_eq!(index.ordinal("org.b.Beta"), Some(1));
        assert_eq!(index.ordinal("org.b.Zeta"), Some(2));
        assert_eq!(index.name(1), Some("org.b.Beta"));
        assert_eq!(index.name(3), None);
        assert_eq!(index.ordinal("org.c.Missing"), None);
    }

    #[test]
    fn duplicates_collapse_to_one_ordinal() {
        let index = CodeUnitIndex::from_names(["a.A", "a.A", "a.B"]);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.iter().collect::<Vec<_>>(),
            vec![(0, "a.A"), (1, "a.B")]
        );
    }

    #[test]
    fn serializes_as_name_list() {
        let index = CodeUnitIndex::from_names(["a.B", "a.A"]);
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"["a.A","a.B"]"#);
        let back: CodeUnitIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
