//! Sort specification and order-by emission

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// The default order applied when no valid sort is requested.
pub const DEFAULT_ORDER_BY: &str = "CreatedDate DESC";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the order-by keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A requested column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Builds the order-by expression for a query.
///
/// A sort on a field outside the sortable subset is rejected and the default
/// order ([`DEFAULT_ORDER_BY`], creation time descending) applies.
pub fn build_order_by(sort: Option<&SortSpec>, sortable: &HashSet<String>) -> String {
    match sort {
        Some(spec) if sortable.contains(&spec.field) => {
            format!("{} {}", spec.field, spec.direction.keyword())
        }
        _ => DEFAULT_ORDER_BY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sortable(fields: &[&str]) -> HashSet<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_sort() {
        let spec = SortSpec::new("Name", Direction::Asc);
        assert_eq!(
            build_order_by(Some(&spec), &sortable(&["Name"])),
            "Name ASC"
        );
        let spec = SortSpec::new("Name", Direction::Desc);
        assert_eq!(
            build_order_by(Some(&spec), &sortable(&["Name"])),
            "Name DESC"
        );
    }

    #[test]
    fn test_non_sortable_field_falls_back_to_default() {
        let spec = SortSpec::new("Industry", Direction::Asc);
        assert_eq!(
            build_order_by(Some(&spec), &sortable(&["Name"])),
            DEFAULT_ORDER_BY
        );
    }

    #[test]
    fn test_no_sort_uses_default() {
        assert_eq!(build_order_by(None, &sortable(&["Name"])), DEFAULT_ORDER_BY);
    }
}
