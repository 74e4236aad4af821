//! ORDER BY clauses and composite index declarations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }

    pub fn is_descending(&self) -> bool {
        *self == Direction::Descending
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ORDER BY key: a field path below the document root plus a
/// direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    /// Keys from the document root, never empty
    pub path: Vec<String>,
    pub direction: Direction,
}

impl OrderClause {
    pub fn new(path: Vec<String>, direction: Direction) -> Self {
        Self { path, direction }
    }

    /// Ascending clause on a dotted path (`"a.b"`)
    pub fn asc(path: &str) -> Self {
        Self::new(split_dotted(path), Direction::Ascending)
    }

    /// Descending clause on a dotted path
    pub fn desc(path: &str) -> Self {
        Self::new(split_dotted(path), Direction::Descending)
    }

    /// Slash-delimited form used by index declarations (`/a/b`)
    pub fn index_path(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

fn split_dotted(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// One field of a composite index, in its wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeIndexField {
    /// Slash-delimited path, e.g. `/a/b`
    pub path: String,
    pub order: Direction,
}

impl CompositeIndexField {
    pub fn new(path: impl Into<String>, order: Direction) -> Self {
        Self {
            path: path.into(),
            order,
        }
    }

    pub fn ascending(path: impl Into<String>) -> Self {
        Self::new(path, Direction::Ascending)
    }

    pub fn descending(path: impl Into<String>) -> Self {
        Self::new(path, Direction::Descending)
    }
}

/// A declared composite index: ordered fields
pub type CompositeIndexSpec = Vec<CompositeIndexField>;

/// True iff some index has exactly the clauses' (path, direction) pairs in
/// the same order
pub fn has_matching_index(clauses: &[OrderClause], indexes: &[CompositeIndexSpec]) -> bool {
    indexes.iter().any(|index| {
        index.len() == clauses.len()
            && index
                .iter()
                .zip(clauses)
                .all(|(field, clause)| field.path == clause.index_path() && field.order == clause.direction)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_path() {
        assert_eq!(OrderClause::asc("a.b").index_path(), "/a/b");
        assert_eq!(OrderClause::desc("name").index_path(), "/name");
    }

    #[test]
    fn test_matching_index() {
        let clauses = vec![OrderClause::asc("a"), OrderClause::desc("b")];
        let good = vec![
            CompositeIndexField::ascending("/a"),
            CompositeIndexField::descending("/b"),
        ];
        let wrong_dir = vec![
            CompositeIndexField::ascending("/a"),
            CompositeIndexField::ascending("/b"),
        ];
        let wrong_order = vec![
            CompositeIndexField::descending("/b"),
            CompositeIndexField::ascending("/a"),
        ];

        assert!(has_matching_index(&clauses, &[wrong_dir.clone(), good]));
        assert!(!has_matching_index(&clauses, &[wrong_dir, wrong_order]));
        assert!(!has_matching_index(&clauses, &[]));
    }

    #[test]
    fn test_wire_form() {
        let field: CompositeIndexField =
            serde_json::from_value(json!({"path": "/a/b", "order": "descending"})).unwrap();
        assert_eq!(field, CompositeIndexField::descending("/a/b"));
        assert_eq!(
            serde_json::to_value(CompositeIndexField::ascending("/x")).unwrap(),
            json!({"path": "/x", "order": "ascending"})
        );
    }
}
