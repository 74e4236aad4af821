//! Static partition-key containment
//!
//! A path is contained when the WHERE clause provably pins it to a single
//! value: an `=` between the binding-rooted path and a literal or parameter,
//! reached through `AND` (either side) or `OR` (both sides).

use super::ast::{BinaryOperator, Expr, SelectQuery};

/// Returns whether the filter equality-constrains every slash-delimited path
/// in `paths` (e.g. `/address/city`)
pub fn contains_partition_keys<S: AsRef<str>>(query: &SelectQuery, paths: &[S]) -> bool {
    let binding = query.from.binding();
    paths.iter().all(|path| {
        let keys: Vec<&str> = path
            .as_ref()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match &query.filter {
            Some(filter) => constrains(filter, binding, &keys),
            None => false,
        }
    })
}

fn constrains(expr: &Expr, binding: &str, keys: &[&str]) -> bool {
    match expr {
        Expr::Binary {
            op: BinaryOperator::And,
            left,
            right,
        } => constrains(left, binding, keys) || constrains(right, binding, keys),
        Expr::Binary {
            op: BinaryOperator::Or,
            left,
            right,
        } => constrains(left, binding, keys) && constrains(right, binding, keys),
        Expr::Binary {
            op: BinaryOperator::Eq,
            left,
            right,
        } => {
            (is_path(left, binding, keys) && is_constant(right))
                || (is_path(right, binding, keys) && is_constant(left))
        }
        _ => false,
    }
}

fn is_path(expr: &Expr, binding: &str, keys: &[&str]) -> bool {
    match expr.as_path() {
        Some((root, path)) => root == binding && !path.is_empty() && path == keys,
        None => false,
    }
}

fn is_constant(expr: &Expr) -> bool {
    matches!(expr, Expr::Literal(_) | Expr::Parameter(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::parse;

    fn contains(text: &str, paths: &[&str]) -> bool {
        contains_partition_keys(&parse(text).unwrap(), paths)
    }

    #[test]
    fn test_simple_equality() {
        assert!(contains("SELECT * FROM c WHERE c.pk = 'a'", &["/pk"]));
        assert!(contains("SELECT * FROM c WHERE 'a' = c.pk", &["/pk"]));
        assert!(contains("SELECT * FROM c WHERE c.pk = @pk", &["/pk"]));
    }

    #[test]
    fn test_nested_path() {
        assert!(contains(
            "SELECT * FROM c WHERE c.address.city = 'x'",
            &["/address/city"]
        ));
        assert!(!contains("SELECT * FROM c WHERE c.address = 'x'", &["/address/city"]));
    }

    #[test]
    fn test_and_or() {
        assert!(contains("SELECT * FROM c WHERE c.a > 1 AND c.pk = 1", &["/pk"]));
        assert!(contains(
            "SELECT * FROM c WHERE c.pk = 1 OR c.pk = 2",
            &["/pk"]
        ));
        assert!(!contains("SELECT * FROM c WHERE c.pk = 1 OR c.a = 2", &["/pk"]));
    }

    #[test]
    fn test_not_constrained() {
        assert!(!contains("SELECT * FROM c", &["/pk"]));
        assert!(!contains("SELECT * FROM c WHERE c.pk > 1", &["/pk"]));
        assert!(!contains("SELECT * FROM c WHERE c.pk = c.other", &["/pk"]));
        assert!(!contains("SELECT * FROM c WHERE NOT (c.pk = 1)", &["/pk"]));
    }

    #[test]
    fn test_multiple_paths() {
        let text = "SELECT * FROM c WHERE c.a = 1 AND c.b = 2";
        assert!(contains(text, &["/a", "/b"]));
        assert!(!contains(text, &["/a", "/c"]));
    }

    #[test]
    fn test_alias_respected() {
        assert!(contains("SELECT * FROM root r WHERE r.pk = 1", &["/pk"]));
    }

    #[test]
    fn test_empty_path_list() {
        assert!(contains("SELECT * FROM c", &[]));
    }
}
