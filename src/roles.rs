use crate::data::{ColumnMeta, Role};

/// Look in the column metadata list for the given role. We need exactly one
/// match; zero or more than one means there is no usable handle, so both
/// collapse to `None` and downstream validators treat the role as absent.
pub fn resolve_role(columns: &[ColumnMeta], role: Role) -> Option<usize> {
    let mut matches = columns
        .iter()
        .enumerate()
        .filter(|(_, col)| col.has_role(role));
    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}

/// Collect the full measure set: every column whose role set contains
/// `measure` and that is not simultaneously tagged as the category grouping
/// field. The count of this set feeds the shape validator.
pub fn collect_measures(columns: &[ColumnMeta]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, col)| col.has_role(Role::Measure) && !col.has_role(Role::Category))
        .map(|(index, _)| index)
        .collect()
}

/// Role handles resolved once per transform invocation.
#[derive(Debug, Clone)]
pub struct ResolvedRoles {
    pub category: Option<usize>,
    pub series: Option<usize>,
    pub measures: Vec<usize>,
}

impl ResolvedRoles {
    pub fn resolve(columns: &[ColumnMeta]) -> Self {
        ResolvedRoles {
            category: resolve_role(columns, Role::Category),
            series: resolve_role(columns, Role::Series),
            measures: collect_measures(columns),
        }
    }

    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }
}
