//! Variable rosters for factor analysis.
//!
//! A [`VariableSet`] is the ordered list of column names that enter an
//! analysis. Order matters: loadings, communalities and residuals are all
//! reported in roster order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a variable roster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariableSetError {
    /// The roster is empty.
    #[error("variable list is empty")]
    Empty,

    /// A variable name appears more than once.
    #[error("duplicate variable name: {0}")]
    Duplicate(String),

    /// A variable name is blank after trimming.
    #[error("blank variable name at position {0}")]
    Blank(usize),
}

/// Ordered, duplicate-free list of variable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct VariableSet {
    names: Vec<String>,
}

impl VariableSet {
    /// Build a roster from a list of names, rejecting blanks and duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, VariableSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.into().trim().to_string())
            .collect();

        if names.is_empty() {
            return Err(VariableSetError::Empty);
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(VariableSetError::Blank(i));
            }
            if names[..i].contains(name) {
                return Err(VariableSetError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Parse a comma-separated roster, e.g. `"n1,n2,n3,w1,w2"`.
    pub fn from_comma_list(list: &str) -> Result<Self, VariableSetError> {
        Self::new(list.split(','))
    }

    /// Variable names in roster order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of variables in the roster.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster is empty. Construction rejects empty rosters, so
    /// this is only `true` for a roster obtained through deserialization of
    /// pathological input.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check whether a name is in the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl TryFrom<Vec<String>> for VariableSet {
    type Error = VariableSetError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<VariableSet> for Vec<String> {
    fn from(set: VariableSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_comma_list() {
        let set = VariableSet::from_comma_list("n1,n2,n3").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("n2"));
        assert!(!set.contains("n4"));
    }

    #[test]
    fn test_trims_whitespace() {
        let set = VariableSet::from_comma_list("n1, n2 ,n3").unwrap();
        assert_eq!(set.names(), &["n1", "n2", "n3"]);
    }

    #[rstest]
    #[case("", VariableSetError::Blank(0))]
    #[case("n1,,n3", VariableSetError::Blank(1))]
    #[case("n1,n2,n1", VariableSetError::Duplicate("n1".to_string()))]
    fn test_rejects_bad_rosters(#[case] list: &str, #[case] expected: VariableSetError) {
        assert_eq!(VariableSet::from_comma_list(list).unwrap_err(), expected);
    }

    #[test]
    fn test_rejects_empty_iterator() {
        let names: Vec<String> = vec![];
        assert_eq!(VariableSet::new(names).unwrap_err(), VariableSetError::Empty);
    }

    #[test]
    fn test_roundtrip_vec() {
        let set = VariableSet::from_comma_list("a,b").unwrap();
        let v: Vec<String> = set.clone().into();
        assert_eq!(VariableSet::try_from(v).unwrap(), set);
    }
}
